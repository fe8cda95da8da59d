//! Dragon XL cargo vehicle with a pair of solar arrays, docked to the
//! outer end of ESPRIT.

use std::f64::consts::{FRAC_PI_2, PI};

use cad_kernel::{DimTag, Model};
use glam::DVec3;
use mesh_sizing::SizingPlan;

use super::{Footprint, Module, DOCKING_LENGTH, DOCKING_RADIUS, TOLERANCE};
use crate::common::{apply_sizes, rotated_copy, volume_surface_group};
use crate::error::BuildResult;

const RADIUS: f64 = 1.5;
const LENGTH: f64 = 6.1;
const SLOPE_LENGTH: f64 = 0.3;
const BACK_LENGTH: f64 = 1.5;
const BACK_RADIUS: f64 = 1.2;
const ARM_LENGTH: f64 = 0.1;
const ARM_PROTRUSION: f64 = 0.75;
const PANEL_WIDTH: f64 = 2.0;
const PANEL_PROTRUSION: f64 = 7.5;

const SIZE_MODULE: f64 = 0.1 * RADIUS;
const SIZE_PANEL: f64 = 0.1 * PANEL_PROTRUSION;

pub(super) fn build(model: &mut Model, origin: DVec3) -> BuildResult<Module> {
    let o = origin;
    let y = |length: f64| DVec3::new(0.0, length, 0.0);
    let body_length = LENGTH - 2.0 * SLOPE_LENGTH - BACK_LENGTH;
    let array_station = LENGTH - BACK_LENGTH / 2.0 - ARM_LENGTH / 2.0;

    let module = DimTag::volume(model.add_cylinder(o + y(SLOPE_LENGTH), y(body_length), RADIUS, None)?);
    let port = model.add_cylinder(o, y(-DOCKING_LENGTH), DOCKING_RADIUS, None)?;
    let back = model.add_cylinder(o + y(body_length), y(BACK_LENGTH), BACK_RADIUS, None)?;
    let nose = model.add_cone(o, y(SLOPE_LENGTH), DOCKING_RADIUS, RADIUS)?;

    let arm1 = DimTag::volume(model.add_box(
        o + DVec3::new(-ARM_LENGTH / 2.0, array_station, BACK_RADIUS - 0.2),
        DVec3::new(ARM_LENGTH, ARM_LENGTH, ARM_PROTRUSION + 0.2),
    )?);
    let arm2 = rotated_copy(model, arm1, o, DVec3::Y, PI)?;
    model.fuse(
        &[module],
        &[DimTag::volume(nose), DimTag::volume(port), DimTag::volume(back), arm1, arm2],
    )?;

    let panel1 = DimTag::volume(model.add_box(
        o + DVec3::new(-PANEL_WIDTH / 2.0, array_station, TOLERANCE + BACK_RADIUS + ARM_PROTRUSION),
        DVec3::new(PANEL_WIDTH, ARM_LENGTH, PANEL_PROTRUSION),
    )?);
    let panel2 = rotated_copy(model, panel1, o, DVec3::Y, PI)?;

    let volumes = vec![module, panel1, panel2];
    model.rotate(&volumes, o, DVec3::Z, FRAC_PI_2)?;

    let body = volume_surface_group(model, module.tag, "Dragon XL")?;
    let array1 = volume_surface_group(model, panel1.tag, "Dragon XL Panel 1")?;
    let array2 = volume_surface_group(model, panel2.tag, "Dragon XL Panel 2")?;
    apply_sizes(
        model,
        &SizingPlan::new()
            .then(body, SIZE_MODULE)
            .then(array1, SIZE_PANEL)
            .then(array2, SIZE_PANEL),
    )?;

    Ok(Module {
        volumes,
        footprint: Footprint::axial(LENGTH + DOCKING_LENGTH),
    })
}
