//! Habitation and Logistics Outpost: a tapered cylinder with ports at both
//! ends and on both sides.

use cad_kernel::{DimTag, Model};
use glam::DVec3;
use mesh_sizing::SizingPlan;

use super::{Footprint, Module, DOCKING_LENGTH, DOCKING_RADIUS};
use crate::common::{apply_sizes, volume_surface_group};
use crate::error::BuildResult;

const RADIUS: f64 = 1.5;
const LENGTH: f64 = 6.1;
const SLOPE_LENGTH: f64 = 0.3;

const SIZE_MODULE: f64 = 0.1 * RADIUS;

pub(super) fn build(model: &mut Model, origin: DVec3) -> BuildResult<Module> {
    let o = origin + DVec3::new(0.0, DOCKING_LENGTH, 0.0);
    let y = |length: f64| DVec3::new(0.0, length, 0.0);
    let side_reach = RADIUS + 2.0 * DOCKING_LENGTH;

    let module = DimTag::volume(model.add_cylinder(o + y(SLOPE_LENGTH), y(LENGTH - 2.0 * SLOPE_LENGTH), RADIUS, None)?);
    let tools = [
        model.add_cone(o, y(SLOPE_LENGTH), DOCKING_RADIUS, RADIUS)?,
        model.add_cone(o + y(LENGTH - SLOPE_LENGTH), y(SLOPE_LENGTH), RADIUS, DOCKING_RADIUS)?,
        model.add_cylinder(o, y(-DOCKING_LENGTH), DOCKING_RADIUS, None)?,
        model.add_cylinder(o + y(LENGTH), y(DOCKING_LENGTH), DOCKING_RADIUS, None)?,
        model.add_cylinder(o + y(LENGTH / 2.0), DVec3::new(side_reach, 0.0, 0.0), DOCKING_RADIUS, None)?,
        model.add_cylinder(o + y(LENGTH / 2.0), DVec3::new(-side_reach, 0.0, 0.0), DOCKING_RADIUS, None)?,
    ]
    .map(DimTag::volume);
    model.fuse(&[module], &tools)?;

    let body = volume_surface_group(model, module.tag, "HALO")?;
    apply_sizes(model, &SizingPlan::new().then(body, SIZE_MODULE))?;

    Ok(Module {
        volumes: vec![module],
        footprint: Footprint::with_side_port(
            LENGTH + 2.0 * DOCKING_LENGTH,
            side_reach,
            LENGTH / 2.0 + DOCKING_LENGTH,
        ),
    })
}
