//! Power and Propulsion Element: a box bus with two solar arrays on arms.

use std::f64::consts::PI;

use cad_kernel::{DimTag, Model};
use glam::DVec3;
use mesh_sizing::SizingPlan;

use super::{Footprint, Module, DOCKING_LENGTH, DOCKING_RADIUS, TOLERANCE};
use crate::common::{apply_sizes, rotated_copy, volume_surface_group};
use crate::error::BuildResult;

const WIDTH: f64 = 2.4;
const DEPTH: f64 = 2.2;
const HEIGHT: f64 = 3.1;
const ARM_LENGTH: f64 = 0.1;
const ARM_PROTRUSION: f64 = 1.5;
const PANEL_WIDTH: f64 = 2.4;
const PANEL_PROTRUSION: f64 = 10.0;

const SIZE_MODULE: f64 = 0.1 * DEPTH;
const SIZE_PANEL: f64 = 0.1 * PANEL_PROTRUSION;

pub(super) fn build(model: &mut Model, origin: DVec3) -> BuildResult<Module> {
    let corner = origin - DVec3::new(WIDTH / 2.0, 0.0, DEPTH / 2.0);
    // Arrays are mirrored through the vertical axis of the bus.
    let pivot = corner + DVec3::new(WIDTH / 2.0, 0.0, DEPTH / 2.0);

    let module = DimTag::volume(model.add_box(corner, DVec3::new(WIDTH, HEIGHT, DEPTH))?);
    let arm1 = DimTag::volume(model.add_box(
        corner + DVec3::new(WIDTH / 2.0 - ARM_LENGTH / 2.0, HEIGHT / 2.0 - ARM_LENGTH / 2.0, 0.0),
        DVec3::new(ARM_LENGTH, ARM_LENGTH, -ARM_PROTRUSION),
    )?);
    let arm2 = rotated_copy(model, arm1, pivot, DVec3::Y, PI)?;
    let port = model.add_cylinder(
        corner + DVec3::new(WIDTH / 2.0, HEIGHT, DEPTH / 2.0),
        DVec3::new(0.0, DOCKING_LENGTH, 0.0),
        DOCKING_RADIUS,
        None,
    )?;
    model.fuse(&[module], &[arm1, arm2, DimTag::volume(port)])?;

    let panel1 = DimTag::volume(model.add_box(
        corner
            + DVec3::new(
                WIDTH / 2.0 - ARM_LENGTH / 2.0,
                HEIGHT / 2.0 - PANEL_WIDTH / 2.0,
                -ARM_PROTRUSION - TOLERANCE,
            ),
        DVec3::new(ARM_LENGTH, PANEL_WIDTH, -PANEL_PROTRUSION),
    )?);
    let panel2 = rotated_copy(model, panel1, pivot, DVec3::Y, PI)?;

    let body = volume_surface_group(model, module.tag, "PPE")?;
    let array1 = volume_surface_group(model, panel1.tag, "PPE Panel 1")?;
    let array2 = volume_surface_group(model, panel2.tag, "PPE Panel 2")?;
    apply_sizes(
        model,
        &SizingPlan::new()
            .then(body, SIZE_MODULE)
            .then(array1, SIZE_PANEL)
            .then(array2, SIZE_PANEL),
    )?;

    Ok(Module {
        volumes: vec![module, panel1, panel2],
        footprint: Footprint::axial(HEIGHT + DOCKING_LENGTH),
    })
}
