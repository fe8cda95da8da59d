//! Crew and science airlock on the I-HAB side port.

use std::f64::consts::FRAC_PI_2;

use cad_kernel::{DimTag, Model};
use glam::DVec3;
use mesh_sizing::SizingPlan;

use super::{Footprint, Module, DOCKING_LENGTH, DOCKING_RADIUS};
use crate::common::{apply_sizes, volume_surface_group};
use crate::error::BuildResult;

const RADIUS: f64 = 2.5 / 2.0;
const LENGTH: f64 = 3.5;

const SIZE_MODULE: f64 = 0.1 * RADIUS;

pub(super) fn build(model: &mut Model, origin: DVec3) -> BuildResult<Module> {
    let y = |length: f64| DVec3::new(0.0, length, 0.0);

    let module = DimTag::volume(model.add_cylinder(origin, y(DOCKING_LENGTH), DOCKING_RADIUS, None)?);
    let chamber = model.add_cylinder(origin + y(DOCKING_LENGTH), y(LENGTH), RADIUS, None)?;
    model.fuse(&[module], &[DimTag::volume(chamber)])?;
    model.rotate(&[module], origin, DVec3::Z, FRAC_PI_2)?;

    let body = volume_surface_group(model, module.tag, "Airlock")?;
    apply_sizes(model, &SizingPlan::new().then(body, SIZE_MODULE))?;

    Ok(Module {
        volumes: vec![module],
        footprint: Footprint::axial(LENGTH + DOCKING_LENGTH),
    })
}
