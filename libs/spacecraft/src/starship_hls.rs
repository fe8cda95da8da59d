//! # Starship HLS
//!
//! Lunar lander variant of Starship: fuselage with a Bézier nose cone, an
//! engine bay with six engines, a ring of solar panels, four landing-leg
//! housings and four landing legs with feet, standing in a cylindrical far
//! field whose base is the lunar surface.
//!
//! Panels and legs keep their own groups; every other surface of the
//! vehicle is grouped as `Lander`.

use std::collections::BTreeSet;
use std::f64::consts::{FRAC_PI_2, FRAC_PI_3, FRAC_PI_4, TAU};

use cad_kernel::{Aabb, Dim, DimTag, Model, Tag};
use glam::DVec3;
use mesh_sizing::SizingPlan;

use crate::common::{first_of, numbered_groups, rotated_copies, surfaces_of, up, Scenario, Snapshot};
use crate::error::{BuildError, BuildResult};

pub const FUSELAGE_RADIUS: f64 = 4.5;
pub const FUSELAGE_HEIGHT: f64 = 36.28;
pub const NOSE_HEIGHT: f64 = 13.72;
/// Radius of the nose cone's middle Bézier control, relative to the
/// fuselage.
pub const NOSE_SHAPE: f64 = 0.75;

pub const ENGINE_BAY_HEIGHT: f64 = 7.32;
pub const ENGINE_BAY_THICKNESS: f64 = 0.5;
pub const ENGINE_RADIUS: f64 = 0.65;

pub const HOUSING_WIDTH: f64 = 2.0;
pub const HOUSING_HEIGHT: f64 = 10.0;
pub const LEG_LENGTH: f64 = 8.0;

pub const BOUNDARY_HEIGHT: f64 = 80.0;
pub const BOUNDARY_RADIUS: f64 = 30.0;
pub const BOUNDARY_BASE: f64 = -5.0;
/// Gap between the fuselage and the trimming box of the legs.
pub const SPACING: f64 = 0.1;

pub const SIZE_LANDER: f64 = 0.1 * FUSELAGE_RADIUS;
pub const SIZE_SOLAR_PANELS: f64 = 0.2;
pub const SIZE_LANDING_LEGS: f64 = 0.2;
pub const SIZE_LUNAR_SURFACE: f64 = 0.1 * BOUNDARY_RADIUS;
pub const SIZE_SPACE: f64 = 0.1 * BOUNDARY_RADIUS;

/// Points within this height of the lowest point count as the foot.
const FOOT_TOLERANCE: f64 = 1e-6;

/// Fuselage cylinder with the nose cone fused on top.
fn fuselage(model: &mut Model) -> BuildResult<DimTag> {
    let lander = DimTag::volume(model.add_cylinder(DVec3::ZERO, up(FUSELAGE_HEIGHT), FUSELAGE_RADIUS, None)?);

    let shoulder = model.add_point(DVec3::new(FUSELAGE_RADIUS, 0.0, FUSELAGE_HEIGHT))?;
    let control = model.add_point(DVec3::new(FUSELAGE_RADIUS * NOSE_SHAPE, 0.0, FUSELAGE_HEIGHT + NOSE_HEIGHT))?;
    let tip = model.add_point(up(FUSELAGE_HEIGHT + NOSE_HEIGHT))?;
    let center = model.add_point(up(FUSELAGE_HEIGHT))?;
    let outline = [
        model.add_bezier(&[shoulder, control, tip])?,
        model.add_line(tip, center)?,
        model.add_line(center, shoulder)?,
    ];
    let profile_loop = model.add_curve_loop(&outline)?;
    let profile = DimTag::surface(model.add_plane_surface(&[profile_loop])?);

    let swept = model.revolve(&[profile], DVec3::ZERO, DVec3::Z, TAU)?;
    let nose = first_of(&swept, Dim::Volume, "revolve")?;
    model.fuse(&[lander], &[nose])?;
    model.remove(&[profile], true)?;
    Ok(lander)
}

/// Hollows the engine bay and closes it with an inverted cone.
fn engine_bay(model: &mut Model, lander: DimTag) -> BuildResult<()> {
    let inner = FUSELAGE_RADIUS - ENGINE_BAY_THICKNESS;
    let bay = model.add_cylinder(DVec3::ZERO, up(ENGINE_BAY_HEIGHT), inner, None)?;
    let dome = model.add_cone(up(ENGINE_BAY_HEIGHT), up(-ENGINE_BAY_HEIGHT / 2.0), inner, 0.0)?;
    model.cut(&[lander], &[DimTag::volume(bay)])?;
    model.fuse(&[lander], &[DimTag::volume(dome)])?;
    Ok(())
}

/// Three large outer engines and three small inner ones, staggered.
fn engines(model: &mut Model, lander: DimTag) -> BuildResult<()> {
    let large = DimTag::volume(model.add_cone(
        DVec3::new(2.0 / 3.0 * FUSELAGE_RADIUS - ENGINE_BAY_THICKNESS, 0.0, 0.0),
        up(ENGINE_BAY_HEIGHT),
        2.0 * ENGINE_RADIUS,
        ENGINE_RADIUS,
    )?);
    let small = DimTag::volume(model.add_cone(
        DVec3::new(1.0 / 3.0 * FUSELAGE_RADIUS - ENGINE_BAY_THICKNESS, 0.0, 0.0),
        up(ENGINE_BAY_HEIGHT),
        ENGINE_RADIUS,
        ENGINE_RADIUS / 2.0,
    )?);
    model.rotate(&[small], DVec3::ZERO, DVec3::Z, FRAC_PI_3)?;

    let small_engines = rotated_copies(model, small, 2, DVec3::ZERO, DVec3::Z, 2.0 * FRAC_PI_3)?;
    let large_engines = rotated_copies(model, large, 2, DVec3::ZERO, DVec3::Z, 2.0 * FRAC_PI_3)?;
    model.fuse(&[lander], &small_engines)?;
    model.fuse(&[lander], &large_engines)?;
    Ok(())
}

/// Eight thin shell sectors around the upper fuselage.
fn solar_panels(model: &mut Model) -> BuildResult<Vec<DimTag>> {
    let base = up(FUSELAGE_HEIGHT * 13.0 / 16.0);
    let sweep = Some(0.8 * FRAC_PI_4);
    let outer = DimTag::volume(model.add_cylinder(base, up(6.0), FUSELAGE_RADIUS + 0.2, sweep)?);
    let inner = model.add_cylinder(base, up(6.0), FUSELAGE_RADIUS + 0.1, sweep)?;
    model.cut(&[outer], &[DimTag::volume(inner)])?;
    rotated_copies(model, outer, 7, DVec3::ZERO, DVec3::Z, FRAC_PI_4)
}

/// One leg housing: a tapered block against the fuselage with an indent
/// in its outer face.
fn leg_housing(model: &mut Model) -> BuildResult<DimTag> {
    let inner = FUSELAGE_RADIUS - ENGINE_BAY_THICKNESS;
    let outer = FUSELAGE_RADIUS + ENGINE_BAY_THICKNESS;
    let w = HOUSING_WIDTH;
    let h = HOUSING_HEIGHT;

    let corners = [
        DVec3::new(w, inner, 0.0),
        DVec3::new(-w, inner, 0.0),
        DVec3::new(-w, inner, h),
        DVec3::new(w, inner, h),
        DVec3::new(w - 0.2, outer, 0.0),
        DVec3::new(-(w - 0.2), outer, 0.0),
        DVec3::new(-(w - 0.9), outer, 3.0 / 5.0 * h),
        DVec3::new(w - 0.9, outer, 3.0 / 5.0 * h),
    ];
    let mut p = Vec::with_capacity(corners.len());
    for corner in corners {
        p.push(model.add_point(corner)?);
    }

    let edges = [
        (0, 1),
        (1, 2),
        (2, 3),
        (3, 0),
        (4, 5),
        (5, 6),
        (6, 7),
        (7, 4),
        (0, 4),
        (1, 5),
        (2, 6),
        (3, 7),
    ];
    let mut l = Vec::with_capacity(edges.len());
    for (a, b) in edges {
        l.push(model.add_line(p[a], p[b])?);
    }

    // Inner face, outer face, bottom, top, then the two slanted sides.
    let faces: [[usize; 4]; 6] = [
        [0, 1, 2, 3],
        [4, 5, 6, 7],
        [8, 4, 9, 0],
        [10, 6, 11, 2],
        [3, 8, 7, 11],
        [1, 10, 5, 9],
    ];
    let mut loops = Vec::with_capacity(faces.len());
    for face in faces {
        loops.push(model.add_curve_loop(&face.map(|i| l[i]))?);
    }
    let mut surfaces = Vec::with_capacity(loops.len());
    for &curve_loop in &loops[..4] {
        surfaces.push(model.add_plane_surface(&[curve_loop])?);
    }
    for &curve_loop in &loops[4..] {
        surfaces.push(model.add_surface_filling(curve_loop)?);
    }

    let shell = model.add_surface_loop(&[
        surfaces[0],
        surfaces[2],
        surfaces[1],
        surfaces[3],
        surfaces[4],
        surfaces[5],
    ])?;
    let housing = DimTag::volume(model.add_volume(&[shell])?);

    let indent = model.extrude(&[DimTag::surface(surfaces[1])], DVec3::new(0.0, -0.5, 0.0))?;
    let cavity = first_of(&indent, Dim::Volume, "extrude")?;
    model.cut(&[housing], &[cavity])?;
    model.remove(&indent, true)?;
    Ok(housing)
}

/// Centre of the lowest vertices of a solid.
///
/// Taken from the solid's own polygons: after a cut, the boundary of the
/// result can still list corners of trimmed-away tool faces.
fn lowest_point(model: &Model, volume: DimTag) -> BuildResult<DVec3> {
    let vertices: Vec<DVec3> = model
        .volume(volume.tag)?
        .polygons
        .iter()
        .flat_map(|polygon| polygon.vertices().iter().copied())
        .collect();
    let bottom = vertices.iter().map(|p| p.z).fold(f64::INFINITY, f64::min);
    let lowest = Aabb::from_points(vertices.into_iter().filter(|p| p.z - bottom <= FOOT_TOLERANCE));
    if lowest.is_empty() {
        return Err(BuildError::missing("landing leg", "point"));
    }
    Ok((lowest.min + lowest.max) / 2.0)
}

/// One landing leg: an angled strut trimmed at the fuselage, with a flat
/// foot under its lowest point.
fn landing_leg(model: &mut Model) -> BuildResult<DimTag> {
    let strut = DimTag::volume(model.add_box(
        DVec3::new(-0.2, FUSELAGE_RADIUS - 0.5, 2.0 / 5.0 * HOUSING_HEIGHT + 0.2),
        DVec3::new(0.4, LEG_LENGTH, 0.4),
    )?);
    model.rotate(
        &[strut],
        DVec3::new(0.0, FUSELAGE_RADIUS, 2.0 / 5.0 * HOUSING_HEIGHT),
        DVec3::X,
        -FRAC_PI_3,
    )?;
    model.translate(&[strut], DVec3::new(0.0, -0.25, -HOUSING_HEIGHT / 4.0))?;

    let clearance = FUSELAGE_RADIUS + SPACING;
    let trim = model.add_box(
        DVec3::new(-clearance, -clearance, -10.0),
        DVec3::new(2.0 * clearance, 2.0 * clearance, 50.0),
    )?;
    model.cut(&[strut], &[DimTag::volume(trim)])?;

    let anchor = lowest_point(model, strut)?;
    let pad = [
        DVec3::new(1.25, 2.0, -0.25),
        DVec3::new(1.5, -1.0, -0.25),
        DVec3::new(-1.25, 2.0, -0.25),
        DVec3::new(-1.5, -1.0, -0.25),
    ];
    let mut p = Vec::with_capacity(pad.len());
    for offset in pad {
        p.push(model.add_point(anchor + offset)?);
    }
    let outline = [
        model.add_line(p[0], p[2])?,
        model.add_line(p[2], p[3])?,
        model.add_line(p[3], p[1])?,
        model.add_line(p[1], p[0])?,
    ];
    let pad_loop = model.add_curve_loop(&outline)?;
    let sole = model.add_plane_surface(&[pad_loop])?;

    let extruded = model.extrude(&[DimTag::surface(sole)], up(0.25))?;
    let foot = first_of(&extruded, Dim::Volume, "extrude")?;
    model.fuse(&[strut], &[foot])?;
    model.remove(&extruded, true)?;
    Ok(strut)
}

fn all_surfaces(model: &Model, volumes: &[DimTag]) -> BuildResult<BTreeSet<Tag>> {
    let mut surfaces = BTreeSet::new();
    for volume in volumes {
        surfaces.extend(surfaces_of(model, volume.tag)?);
    }
    Ok(surfaces)
}

/// Builds the lander and its far field.
pub fn build(model: &mut Model) -> BuildResult<Scenario> {
    let lander = fuselage(model)?;
    let snapshots = vec![Snapshot::capture(model, "fuselage.brep")?];

    engine_bay(model, lander)?;
    engines(model, lander)?;
    let panels = solar_panels(model)?;

    let housing = leg_housing(model)?;
    let housings = rotated_copies(model, housing, 3, DVec3::ZERO, DVec3::Z, FRAC_PI_2)?;
    model.fuse(&[lander], &housings)?;

    let leg = landing_leg(model)?;
    let legs = rotated_copies(model, leg, 3, DVec3::ZERO, DVec3::Z, FRAC_PI_2)?;

    // Groups
    let mut not_lander = all_surfaces(model, &panels)?;
    not_lander.extend(all_surfaces(model, &legs)?);
    let panel_groups = numbered_groups(model, &panels, "Solar Panel")?;
    let leg_groups = numbered_groups(model, &legs, "Landing Leg")?;

    let volumes = model.entities(Some(Dim::Volume));
    let boundary = model.add_cylinder(up(BOUNDARY_BASE), up(BOUNDARY_HEIGHT), BOUNDARY_RADIUS, None)?;
    let walls = surfaces_of(model, boundary)?;
    model.cut(&[DimTag::volume(boundary)], &volumes)?;
    not_lander.extend(walls.iter().copied());

    let space = model.add_physical_group(Dim::Surface, &[walls[0], walls[1]], "Space")?;
    let lunar_surface = model.add_physical_group(Dim::Surface, &[walls[2]], "Lunar Surface")?;
    let vehicle: Vec<Tag> = model
        .entities(Some(Dim::Surface))
        .into_iter()
        .map(|s| s.tag)
        .filter(|tag| !not_lander.contains(tag))
        .collect();
    let lander_group = model.add_physical_group(Dim::Surface, &vehicle, "Lander")?;
    model.add_physical_group(Dim::Volume, &[boundary], "Volume")?;

    let mut plan = SizingPlan::new().then(lander_group, SIZE_LANDER);
    plan.extend(panel_groups.into_iter().map(|g| (g, SIZE_SOLAR_PANELS)));
    plan.extend(leg_groups.into_iter().map(|g| (g, SIZE_LANDING_LEGS)));
    plan.push(lunar_surface, SIZE_LUNAR_SURFACE);
    plan.push(space, SIZE_SPACE);

    log::info!("Starship HLS built: {} lander surfaces", vehicle.len());
    Ok(Scenario {
        boundary,
        plan,
        snapshots,
        brep_file: Some("starship_hls.brep"),
        msh_file: "starship_hls.msh",
    })
}
