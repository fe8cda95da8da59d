//! # Blue Moon
//!
//! Lander with a conical lower fuselage carrying four radial tanks in
//! cut-outs, a cylindrical upper fuselage and four splayed landing legs,
//! standing in a cylindrical far field whose base is the lunar surface.

use std::f64::consts::{FRAC_PI_2, FRAC_PI_4};

use cad_kernel::{Dim, DimTag, Model};
use glam::DVec3;
use mesh_sizing::SizingPlan;

use crate::common::{numbered_groups, rotated_copies, surfaces_of, up, volume_surface_group, Scenario};
use crate::error::BuildResult;

/// Overall lander height.
pub const HEIGHT: f64 = 16.0;
pub const RADIUS: f64 = 3.0;
pub const TANK_RADIUS: f64 = 1.25;
pub const LEG_RADIUS: f64 = 0.2;
/// Gap between surfaces of different groups.
pub const TOLERANCE: f64 = 0.05;

pub const BOUNDARY_HEIGHT: f64 = 35.0;
pub const BOUNDARY_RADIUS: f64 = 15.0;
/// Height of the far-field base below the lander.
pub const BOUNDARY_BASE: f64 = -2.2;

pub const SIZE_LOWER_FUSELAGE: f64 = 0.2 * RADIUS;
pub const SIZE_UPPER_FUSELAGE: f64 = 0.2 * (RADIUS - 0.5);
pub const SIZE_TANKS: f64 = 0.2 * TANK_RADIUS;
pub const SIZE_LEGS: f64 = 0.3 * LEG_RADIUS;
pub const SIZE_SPACE: f64 = 0.5;
pub const SIZE_GROUND: f64 = 0.5;

/// Builds the lander and its far field.
pub fn build(model: &mut Model) -> BuildResult<Scenario> {
    let fuselage_split = 2.0 * HEIGHT / 5.0;

    // Fuselage
    let bottom = model.add_cone(DVec3::ZERO, up(fuselage_split), RADIUS - 0.5, RADIUS)?;
    let top = model.add_cylinder(
        up(fuselage_split + TOLERANCE),
        up(3.0 * HEIGHT / 5.0 + TOLERANCE),
        RADIUS,
        None,
    )?;

    // Tanks sit in cut-outs of the lower fuselage
    let hole = model.add_cylinder(
        DVec3::new(RADIUS - 0.5, 0.0, 0.4),
        up(fuselage_split - 1.3),
        TANK_RADIUS + 0.1,
        None,
    )?;
    let holes = rotated_copies(model, DimTag::volume(hole), 3, DVec3::ZERO, DVec3::Z, FRAC_PI_2)?;
    model.cut(&[DimTag::volume(bottom)], &holes)?;

    let tank = model.add_cylinder(
        DVec3::new(RADIUS - 0.5, 0.0, 0.5),
        up(fuselage_split - 1.5),
        TANK_RADIUS,
        None,
    )?;
    let tanks = rotated_copies(model, DimTag::volume(tank), 3, DVec3::ZERO, DVec3::Z, FRAC_PI_2)?;

    // Legs, trimmed clear of the fuselage by a slightly enlarged cone
    let leg = model.add_cylinder(
        DVec3::new(RADIUS - 0.2, 0.0, fuselage_split - 0.2),
        DVec3::new(2.5, 0.0, -(fuselage_split + 1.87)),
        LEG_RADIUS,
        None,
    )?;
    let clearance = model.add_cone(DVec3::ZERO, up(fuselage_split), RADIUS - 0.5 + TOLERANCE, RADIUS + TOLERANCE)?;
    model.cut(&[DimTag::volume(leg)], &[DimTag::volume(clearance)])?;
    model.rotate(&[DimTag::volume(leg)], DVec3::ZERO, DVec3::Z, FRAC_PI_4)?;
    let legs = rotated_copies(model, DimTag::volume(leg), 3, DVec3::ZERO, DVec3::Z, FRAC_PI_2)?;

    // Groups
    let top_group = volume_surface_group(model, top, "Fuselage Top")?;
    let bottom_group = volume_surface_group(model, bottom, "Fuselage Bottom")?;
    let tank_groups = numbered_groups(model, &tanks, "Tank")?;
    let leg_groups = numbered_groups(model, &legs, "Leg")?;

    // Far field
    let volumes = model.entities(Some(Dim::Volume));
    let boundary = model.add_cylinder(up(BOUNDARY_BASE), up(BOUNDARY_HEIGHT), BOUNDARY_RADIUS, None)?;
    let walls = surfaces_of(model, boundary)?;
    model.cut(&[DimTag::volume(boundary)], &volumes)?;

    let ground = model.add_physical_group(Dim::Surface, &[walls[2]], "Ground")?;
    let space = model.add_physical_group(Dim::Surface, &[walls[0], walls[1]], "Space")?;
    model.add_physical_group(Dim::Volume, &[boundary], "Volume")?;

    // Space shares both seam points with the ground, so the ground size
    // must come after it.
    let mut plan = SizingPlan::new()
        .then(bottom_group, SIZE_LOWER_FUSELAGE)
        .then(top_group, SIZE_UPPER_FUSELAGE)
        .then(space, SIZE_SPACE)
        .then(ground, SIZE_GROUND);
    plan.extend(tank_groups.into_iter().map(|g| (g, SIZE_TANKS)));
    plan.extend(leg_groups.into_iter().map(|g| (g, SIZE_LEGS)));

    log::info!("Blue Moon built: {} surfaces in the far field", surfaces_of(model, boundary)?.len());
    Ok(Scenario {
        boundary,
        plan,
        snapshots: Vec::new(),
        brep_file: None,
        msh_file: "blue_moon.msh",
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use cad_kernel::PhysicalGroup;

    #[test]
    fn test_groups_in_creation_order() {
        let mut model = Model::new();
        build(&mut model).unwrap();

        let names: Vec<&str> = model
            .physical_groups(Some(Dim::Surface))
            .into_iter()
            .map(|g| model.physical_name(g).unwrap())
            .collect();
        assert_eq!(
            names,
            [
                "Fuselage Top",
                "Fuselage Bottom",
                "Tank 1",
                "Tank 2",
                "Tank 3",
                "Tank 4",
                "Leg 1",
                "Leg 2",
                "Leg 3",
                "Leg 4",
                "Ground",
                "Space",
            ]
        );
        assert_eq!(
            model.physical_name(PhysicalGroup::new(Dim::Volume, 1)).unwrap(),
            "Volume"
        );
    }

    #[test]
    fn test_far_field_holds_only_boundary() {
        let mut model = Model::new();
        let scenario = build(&mut model).unwrap();

        assert_eq!(model.entities(Some(Dim::Volume)), vec![DimTag::volume(scenario.boundary)]);
        let ground = PhysicalGroup::new(Dim::Surface, 11);
        assert_eq!(model.entities_for_physical_group(ground).unwrap().len(), 1);
    }

    #[test]
    fn test_plan_sizes_ground_after_space() {
        let mut model = Model::new();
        let scenario = build(&mut model).unwrap();

        let plan: Vec<(String, f64)> = scenario
            .plan
            .iter()
            .map(|(g, size)| (model.physical_name(g).unwrap().to_string(), size))
            .collect();
        assert_eq!(plan.len(), 12);
        assert_eq!(plan[0], ("Fuselage Bottom".to_string(), SIZE_LOWER_FUSELAGE));
        assert_eq!(plan[1], ("Fuselage Top".to_string(), SIZE_UPPER_FUSELAGE));
        assert_eq!(plan[2].0, "Space");
        assert_eq!(plan[3].0, "Ground");
        assert!(plan[4..8].iter().all(|(_, s)| *s == SIZE_TANKS));
        assert!(plan[8..].iter().all(|(_, s)| *s == SIZE_LEGS));
    }
}
