//! International Habitation module: a plain cylinder with end and side
//! ports and a pair of solar arrays.

use std::f64::consts::PI;

use cad_kernel::{DimTag, Model};
use glam::DVec3;
use mesh_sizing::SizingPlan;

use super::{Footprint, Module, DOCKING_LENGTH, DOCKING_RADIUS, TOLERANCE};
use crate::common::{apply_sizes, rotated_copy, volume_surface_group};
use crate::error::BuildResult;

const RADIUS: f64 = 3.6 / 2.0;
const LENGTH: f64 = 6.1;
const ARM_LENGTH: f64 = 0.05;
const ARM_PROTRUSION: f64 = 1.0;
const PANEL_WIDTH: f64 = 2.0;
const PANEL_PROTRUSION: f64 = 6.0;

const SIZE_MODULE: f64 = 0.1 * RADIUS;
const SIZE_PANEL: f64 = 0.1 * PANEL_PROTRUSION;

pub(super) fn build(model: &mut Model, origin: DVec3) -> BuildResult<Module> {
    let o = origin + DVec3::new(0.0, DOCKING_LENGTH, 0.0);
    let y = |length: f64| DVec3::new(0.0, length, 0.0);
    let side_reach = RADIUS + 2.0 * DOCKING_LENGTH;
    let array_station = 3.0 / 4.0 * LENGTH;

    let module = DimTag::volume(model.add_cylinder(o, y(LENGTH), RADIUS, None)?);
    let arm1 = DimTag::volume(model.add_box(
        o + DVec3::new(-ARM_LENGTH / 2.0, array_station - ARM_LENGTH / 2.0, RADIUS - 0.2),
        DVec3::new(ARM_LENGTH, ARM_LENGTH, ARM_PROTRUSION + 0.2),
    )?);
    let arm2 = rotated_copy(model, arm1, o, DVec3::Y, PI)?;
    let ports = [
        model.add_cylinder(o, y(-DOCKING_LENGTH), DOCKING_RADIUS, None)?,
        model.add_cylinder(o + y(LENGTH), y(DOCKING_LENGTH), DOCKING_RADIUS, None)?,
        model.add_cylinder(o + y(LENGTH / 2.0), DVec3::new(side_reach, 0.0, 0.0), DOCKING_RADIUS, None)?,
        model.add_cylinder(o + y(LENGTH / 2.0), DVec3::new(-side_reach, 0.0, 0.0), DOCKING_RADIUS, None)?,
    ];
    let mut tools: Vec<DimTag> = ports.into_iter().map(DimTag::volume).collect();
    tools.extend([arm1, arm2]);
    model.fuse(&[module], &tools)?;

    let panel1 = DimTag::volume(model.add_box(
        o + DVec3::new(
            -ARM_LENGTH / 2.0,
            array_station - PANEL_WIDTH / 2.0,
            TOLERANCE + RADIUS + ARM_PROTRUSION,
        ),
        DVec3::new(ARM_LENGTH, PANEL_WIDTH, PANEL_PROTRUSION),
    )?);
    let panel2 = rotated_copy(model, panel1, o, DVec3::Y, PI)?;

    let body = volume_surface_group(model, module.tag, "I-HAB")?;
    let array1 = volume_surface_group(model, panel1.tag, "I-HAB Panel 1")?;
    let array2 = volume_surface_group(model, panel2.tag, "I-HAB Panel 2")?;
    apply_sizes(
        model,
        &SizingPlan::new()
            .then(body, SIZE_MODULE)
            .then(array1, SIZE_PANEL)
            .then(array2, SIZE_PANEL),
    )?;

    Ok(Module {
        volumes: vec![module, panel1, panel2],
        footprint: Footprint::with_side_port(
            LENGTH + 2.0 * DOCKING_LENGTH,
            side_reach,
            LENGTH / 2.0 + DOCKING_LENGTH,
        ),
    })
}
