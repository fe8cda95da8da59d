//! Orion: crew capsule and service module with four solar arrays in an X.

use std::f64::consts::{FRAC_PI_2, FRAC_PI_3, PI};

use cad_kernel::{DimTag, Model};
use glam::DVec3;
use mesh_sizing::SizingPlan;

use super::{Footprint, Module, DOCKING_LENGTH, DOCKING_RADIUS, TOLERANCE};
use crate::common::{apply_sizes, numbered_groups, rotated_copy, volume_surface_group};
use crate::error::BuildResult;

const CREW_LENGTH: f64 = 3.3528;
const CREW_RADIUS: f64 = 5.0292 / 2.0;
const SERVICE_LENGTH: f64 = CREW_LENGTH;
const SERVICE_RADIUS: f64 = 4.0 / 2.0;
const HEATSHIELD_THICKNESS: f64 = 1.0;
const ARM_LENGTH: f64 = 0.05;
const ARM_PROTRUSION: f64 = 1.0;
const PANEL_PROTRUSION: f64 = 7.0 - ARM_PROTRUSION;
const PANEL_WIDTH: f64 = 2.0;

const SIZE_MODULE: f64 = 0.1 * CREW_RADIUS;
const SIZE_PANEL: f64 = 0.1 * PANEL_PROTRUSION;

/// Four copies of a part around the module axis: the part itself, its
/// mirror, and the same pair turned by a further third of a turn.
fn x_pattern(model: &mut Model, first: DimTag, axis_point: DVec3) -> BuildResult<Vec<DimTag>> {
    let second = rotated_copy(model, first, axis_point, DVec3::Y, PI)?;
    let third = rotated_copy(model, first, axis_point, DVec3::Y, 4.0 * FRAC_PI_3)?;
    let fourth = rotated_copy(model, third, axis_point, DVec3::Y, PI)?;
    Ok(vec![first, second, third, fourth])
}

pub(super) fn build(model: &mut Model, origin: DVec3) -> BuildResult<Module> {
    let o = origin;
    let y = |length: f64| DVec3::new(0.0, length, 0.0);
    let capsule = 2.0 * DOCKING_LENGTH;
    let array_station = CREW_LENGTH + 7.0 / 8.0 * SERVICE_LENGTH;

    let module = DimTag::volume(model.add_cylinder(o, y(capsule), DOCKING_RADIUS, None)?);
    let mut tools: Vec<DimTag> = [
        model.add_cone(o + y(capsule), y(CREW_LENGTH), DOCKING_RADIUS, CREW_RADIUS)?,
        model.add_cylinder(o + y(capsule + CREW_LENGTH), y(SERVICE_LENGTH), SERVICE_RADIUS, None)?,
        model.add_cylinder(
            o + y(capsule + CREW_LENGTH - HEATSHIELD_THICKNESS / 2.0),
            y(HEATSHIELD_THICKNESS),
            CREW_RADIUS,
            None,
        )?,
        // Engine bell
        model.add_cone(o + y(capsule + CREW_LENGTH + SERVICE_LENGTH), y(1.0), 0.5, 1.0)?,
    ]
    .into_iter()
    .map(DimTag::volume)
    .collect();

    let arm = DimTag::volume(model.add_box(
        o + DVec3::new(-ARM_LENGTH / 2.0, array_station - ARM_LENGTH / 2.0, SERVICE_RADIUS - 0.2),
        DVec3::new(ARM_LENGTH, ARM_LENGTH, ARM_PROTRUSION + 0.2),
    )?);
    model.rotate(&[arm], o, DVec3::Y, FRAC_PI_3)?;
    tools.extend(x_pattern(model, arm, o)?);
    model.fuse(&[module], &tools)?;

    let panel_base = o + DVec3::new(0.0, array_station, SERVICE_RADIUS + TOLERANCE + ARM_PROTRUSION);
    let panel = DimTag::volume(model.add_box(
        panel_base + DVec3::new(-ARM_LENGTH / 2.0, -PANEL_WIDTH / 2.0, 0.0),
        DVec3::new(ARM_LENGTH, PANEL_WIDTH, PANEL_PROTRUSION),
    )?);
    model.rotate(&[panel], panel_base, DVec3::Z, FRAC_PI_2)?;
    model.rotate(&[panel], o, DVec3::Y, FRAC_PI_3)?;
    let panels = x_pattern(model, panel, o)?;

    let body = volume_surface_group(model, module.tag, "Orion")?;
    let arrays = numbered_groups(model, &panels, "Orion Panel")?;
    let mut plan = SizingPlan::new().then(body, SIZE_MODULE);
    plan.extend(arrays.into_iter().map(|g| (g, SIZE_PANEL)));
    apply_sizes(model, &plan)?;

    let mut volumes = vec![module];
    volumes.extend(panels);
    Ok(Module {
        volumes,
        footprint: Footprint::axial(capsule + CREW_LENGTH + SERVICE_LENGTH),
    })
}
