//! Blue Moon lander docked nose first to the HALO side port, lying along
//! +X. Legs are left off.

use std::f64::consts::FRAC_PI_2;

use cad_kernel::{DimTag, Model};
use glam::DVec3;
use mesh_sizing::SizingPlan;

use super::{Footprint, Module, DOCKING_LENGTH, DOCKING_RADIUS, TOLERANCE};
use crate::blue_moon::{HEIGHT, RADIUS, TANK_RADIUS};
use crate::common::{apply_sizes, numbered_groups, rotated_copies, up, volume_surface_group};
use crate::error::BuildResult;

const SIZE_LOWER_FUSELAGE: f64 = 0.1 * RADIUS;
const SIZE_UPPER_FUSELAGE: f64 = 0.1 * (RADIUS - 0.5);
const SIZE_TANKS: f64 = 0.1 * TANK_RADIUS;

pub(super) fn build(model: &mut Model, origin: DVec3) -> BuildResult<Module> {
    // Built upright with the docking port ending at `origin`.
    let base = origin - up(HEIGHT + DOCKING_LENGTH + 2.0 * TOLERANCE);
    let split = 2.0 * HEIGHT / 5.0;

    let bottom = DimTag::volume(model.add_cone(base, up(split), RADIUS - 0.5, RADIUS)?);
    let top = DimTag::volume(model.add_cylinder(
        base + up(split + TOLERANCE),
        up(3.0 * HEIGHT / 5.0 + TOLERANCE),
        RADIUS,
        None,
    )?);
    let port = model.add_cylinder(base + up(HEIGHT + 2.0 * TOLERANCE), up(DOCKING_LENGTH), DOCKING_RADIUS, None)?;
    model.fuse(&[top], &[DimTag::volume(port)])?;

    let hole = model.add_cylinder(
        base + DVec3::new(RADIUS - 0.5, 0.0, 0.4),
        up(split - 1.3),
        TANK_RADIUS + 0.1,
        None,
    )?;
    let holes = rotated_copies(model, DimTag::volume(hole), 3, base, DVec3::Z, FRAC_PI_2)?;
    model.cut(&[bottom], &holes)?;

    let tank = model.add_cylinder(
        base + DVec3::new(RADIUS - 0.5, 0.0, 0.5),
        up(split - 1.5),
        TANK_RADIUS,
        None,
    )?;
    let tanks = rotated_copies(model, DimTag::volume(tank), 3, base, DVec3::Z, FRAC_PI_2)?;

    let mut volumes = tanks.clone();
    volumes.extend([bottom, top]);
    model.rotate(&volumes, origin, DVec3::Y, -FRAC_PI_2)?;

    let upper = volume_surface_group(model, top.tag, "Blue Moon Fuselage Top")?;
    let lower = volume_surface_group(model, bottom.tag, "Blue Moon Fuselage Bottom")?;
    let tank_groups = numbered_groups(model, &tanks, "Blue Moon Tank")?;

    let mut plan = SizingPlan::new()
        .then(lower, SIZE_LOWER_FUSELAGE)
        .then(upper, SIZE_UPPER_FUSELAGE);
    plan.extend(tank_groups.into_iter().map(|g| (g, SIZE_TANKS)));
    apply_sizes(model, &plan)?;

    Ok(Module {
        volumes,
        footprint: Footprint::axial(HEIGHT + DOCKING_LENGTH + 2.0 * TOLERANCE),
    })
}
