//! Tests for construction operations.

use crate::entity::{Dim, DimTag, Tag};
use crate::error::ModelError;
use crate::model::Model;
use crate::topology::SurfaceKind;
use approx::assert_relative_eq;
use glam::DVec3;
use std::f64::consts::{FRAC_PI_2, PI, TAU};

fn counts(model: &Model) -> [usize; 4] {
    Dim::ALL.map(|dim| model.entities(Some(dim)).len())
}

fn faces(model: &Model, volume: Tag) -> Vec<Tag> {
    model.adjacencies(DimTag::volume(volume)).unwrap().downward
}

/// Signed volume enclosed by a volume's polygons (positive when they face
/// outward).
fn enclosed_volume(model: &Model, volume: Tag) -> f64 {
    model
        .volume(volume)
        .unwrap()
        .polygons
        .iter()
        .flat_map(|p| p.triangles().collect::<Vec<_>>())
        .map(|[a, b, c]| a.dot(b.cross(c)) / 6.0)
        .sum()
}

/// Closed quadrilateral face from four new points.
fn square_surface(model: &mut Model, corners: [DVec3; 4]) -> Tag {
    let points: Vec<Tag> = corners.iter().map(|c| model.add_point(*c).unwrap()).collect();
    let lines: Vec<Tag> = (0..4)
        .map(|i| model.add_line(points[i], points[(i + 1) % 4]).unwrap())
        .collect();
    let curve_loop = model.add_curve_loop(&lines).unwrap();
    model.add_plane_surface(&[curve_loop]).unwrap()
}

// =============================================================================
// PRIMITIVES
// =============================================================================

#[test]
fn test_box_topology() {
    let mut model = Model::new();
    let cube = model.add_box(DVec3::ZERO, DVec3::new(1.0, 2.0, 3.0)).unwrap();
    assert_eq!(counts(&model), [8, 12, 6, 1]);
    assert_eq!(faces(&model, cube), vec![1, 2, 3, 4, 5, 6]);
    assert_relative_eq!(enclosed_volume(&model, cube), 6.0, epsilon = 1e-9);

    // Each face is bounded by four edges and four corners.
    for face in 1..=6 {
        assert_eq!(model.adjacencies(DimTag::surface(face)).unwrap().downward.len(), 4);
        assert_eq!(model.surface_points(face).unwrap().len(), 4);
    }
}

#[test]
fn test_box_face_order() {
    let mut model = Model::new();
    model.add_box(DVec3::ZERO, DVec3::ONE).unwrap();
    let expected = [
        DVec3::new(-1.0, 0.0, 0.0),
        DVec3::new(1.0, 0.0, 0.0),
        DVec3::new(0.0, -1.0, 0.0),
        DVec3::new(0.0, 1.0, 0.0),
        DVec3::new(0.0, 0.0, -1.0),
        DVec3::new(0.0, 0.0, 1.0),
    ];
    for (face, normal) in (1..=6).zip(expected) {
        let patch = &model.surface(face).unwrap().patch;
        assert!((patch[0].plane().normal() - normal).length() < 1e-12);
    }
}

#[test]
fn test_box_negative_extent() {
    let mut model = Model::new();
    let cube = model.add_box(DVec3::ZERO, DVec3::new(1.0, 1.0, -2.0)).unwrap();
    let bounds = model.entity_bounds(DimTag::volume(cube)).unwrap();
    assert_relative_eq!(bounds.min.z, -2.0);
    assert_relative_eq!(bounds.max.z, 0.0);
    assert_relative_eq!(enclosed_volume(&model, cube), 2.0, epsilon = 1e-9);
}

#[test]
fn test_box_rejects_flat() {
    let mut model = Model::new();
    assert!(matches!(
        model.add_box(DVec3::ZERO, DVec3::new(1.0, 0.0, 1.0)),
        Err(ModelError::DegenerateGeometry { .. })
    ));
}

#[test]
fn test_cylinder_topology() {
    let mut model = Model::new();
    let cylinder = model.add_cylinder(DVec3::ZERO, DVec3::new(0.0, 0.0, 2.0), 1.0, None).unwrap();
    assert_eq!(counts(&model), [2, 3, 3, 1]);

    let surfaces = faces(&model, cylinder);
    let (lateral, top, bottom) = (surfaces[0], surfaces[1], surfaces[2]);
    assert_eq!(model.surface(lateral).unwrap().kind, SurfaceKind::Cylinder);
    // Top at z = 2, bottom at z = 0.
    assert_relative_eq!(model.entity_bounds(DimTag::surface(top)).unwrap().min.z, 2.0);
    assert_relative_eq!(model.entity_bounds(DimTag::surface(bottom)).unwrap().max.z, 0.0);
    // Both seam points bound the lateral face.
    assert_eq!(model.surface_points(lateral).unwrap(), vec![1, 2]);
    assert!(enclosed_volume(&model, cylinder) > 0.9 * 2.0 * PI);
}

#[test]
fn test_cylinder_on_tilted_axis() {
    let mut model = Model::new();
    let axis = DVec3::new(2.5, 0.0, -8.27);
    let cylinder = model.add_cylinder(DVec3::new(2.8, 0.0, 6.2), axis, 0.2, None).unwrap();
    let expected = PI * 0.04 * axis.length();
    let volume = enclosed_volume(&model, cylinder);
    assert!(volume > 0.95 * expected && volume <= expected);
}

#[test]
fn test_cylinder_sector_topology() {
    let mut model = Model::new();
    let sector = model
        .add_cylinder(DVec3::ZERO, DVec3::new(0.0, 0.0, 6.0), 4.7, Some(0.8 * PI / 4.0))
        .unwrap();
    assert_eq!(counts(&model), [6, 9, 5, 1]);
    assert_eq!(faces(&model, sector).len(), 5);
    assert!(enclosed_volume(&model, sector) > 0.0);
}

#[test]
fn test_full_turn_sector_is_cylinder() {
    let mut model = Model::new();
    model.add_cylinder(DVec3::ZERO, DVec3::Z, 1.0, Some(TAU)).unwrap();
    assert_eq!(counts(&model), [2, 3, 3, 1]);
}

#[test]
fn test_frustum_and_apex_cones() {
    let mut model = Model::new();
    let frustum = model.add_cone(DVec3::ZERO, DVec3::new(0.0, 0.0, 6.4), 2.5, 3.0).unwrap();
    assert_eq!(faces(&model, frustum).len(), 3);
    assert_eq!(model.surface(faces(&model, frustum)[0]).unwrap().kind, SurfaceKind::Cone);

    let mut model = Model::new();
    let apex_up = model.add_cone(DVec3::ZERO, DVec3::Z, 1.0, 0.0).unwrap();
    assert_eq!(counts(&model), [2, 2, 2, 1]);
    assert!(enclosed_volume(&model, apex_up) > 0.0);

    let mut model = Model::new();
    let apex_down = model.add_cone(DVec3::ZERO, DVec3::Z, 0.0, 1.0).unwrap();
    assert_eq!(counts(&model), [2, 2, 2, 1]);
    assert!(enclosed_volume(&model, apex_down) > 0.0);

    assert!(Model::new().add_cone(DVec3::ZERO, DVec3::Z, 0.0, 0.0).is_err());
}

#[test]
fn test_sphere_topology() {
    let mut model = Model::new();
    let sphere = model.add_sphere(DVec3::new(1.0, 2.0, 3.0), 2.0).unwrap();
    assert_eq!(counts(&model), [2, 1, 1, 1]);
    let volume = enclosed_volume(&model, sphere);
    let exact = 4.0 / 3.0 * PI * 8.0;
    assert!(volume > 0.9 * exact && volume < exact);
}

// =============================================================================
// BUILDERS
// =============================================================================

#[test]
fn test_curve_loop_infers_orientation() {
    let mut model = Model::new();
    let p: Vec<Tag> = [DVec3::ZERO, DVec3::X, DVec3::new(1.0, 1.0, 0.0)]
        .iter()
        .map(|c| model.add_point(*c).unwrap())
        .collect();
    let a = model.add_line(p[0], p[1]).unwrap();
    let b = model.add_line(p[2], p[1]).unwrap();
    let c = model.add_line(p[2], p[0]).unwrap();
    let curve_loop = model.add_curve_loop(&[a, b, c]).unwrap();
    let surface = model.add_plane_surface(&[curve_loop]).unwrap();
    assert_eq!(model.surface_points(surface).unwrap(), p);
}

#[test]
fn test_curve_loop_must_close() {
    let mut model = Model::new();
    let p: Vec<Tag> = [DVec3::ZERO, DVec3::X, DVec3::Y]
        .iter()
        .map(|c| model.add_point(*c).unwrap())
        .collect();
    let a = model.add_line(p[0], p[1]).unwrap();
    let b = model.add_line(p[1], p[2]).unwrap();
    assert!(model.add_curve_loop(&[a, b]).is_err());
}

#[test]
fn test_plane_surface_rejects_holes() {
    let mut model = Model::new();
    let s = square_surface(&mut model, [DVec3::ZERO, DVec3::X, DVec3::new(1.0, 1.0, 0.0), DVec3::Y]);
    assert!(model.surface(s).is_ok());
    assert!(matches!(model.add_plane_surface(&[1, 1]), Err(ModelError::Unsupported { .. })));
}

#[test]
fn test_bezier_ends_on_controls() {
    let mut model = Model::new();
    let p1 = model.add_point(DVec3::new(4.5, 0.0, 0.0)).unwrap();
    let p2 = model.add_point(DVec3::new(3.0, 0.0, 10.0)).unwrap();
    let p3 = model.add_point(DVec3::new(0.0, 0.0, 10.0)).unwrap();
    let bezier = model.add_bezier(&[p1, p2, p3]).unwrap();
    let curve = model.curve(bezier).unwrap();
    assert_eq!(curve.points(), vec![p1, p3]);
    assert_eq!(curve.samples.first(), Some(&DVec3::new(4.5, 0.0, 0.0)));
    assert!((*curve.samples.last().unwrap() - DVec3::new(0.0, 0.0, 10.0)).length() < 1e-12);
}

#[test]
fn test_volume_from_surface_loop() {
    let mut model = Model::new();
    // Unit cube from six independently wound squares sharing no entities.
    let c = |x: f64, y: f64, z: f64| DVec3::new(x, y, z);
    let squares = [
        [c(0., 0., 0.), c(1., 0., 0.), c(1., 1., 0.), c(0., 1., 0.)],
        [c(0., 0., 1.), c(1., 0., 1.), c(1., 1., 1.), c(0., 1., 1.)],
        [c(0., 0., 0.), c(1., 0., 0.), c(1., 0., 1.), c(0., 0., 1.)],
        [c(0., 1., 0.), c(1., 1., 0.), c(1., 1., 1.), c(0., 1., 1.)],
        [c(0., 0., 0.), c(0., 1., 0.), c(0., 1., 1.), c(0., 0., 1.)],
        [c(1., 0., 0.), c(1., 1., 0.), c(1., 1., 1.), c(1., 0., 1.)],
    ];
    let surfaces: Vec<Tag> = squares.into_iter().map(|s| square_surface(&mut model, s)).collect();
    let shell = model.add_surface_loop(&surfaces).unwrap();
    let volume = model.add_volume(&[shell]).unwrap();
    assert_eq!(faces(&model, volume), surfaces);
    assert_relative_eq!(enclosed_volume(&model, volume), 1.0, epsilon = 1e-9);
}

#[test]
fn test_surface_filling_non_planar() {
    let mut model = Model::new();
    let corners = [
        DVec3::new(2.0, 4.0, 10.0),
        DVec3::new(2.0, 4.0, 0.0),
        DVec3::new(1.8, 5.0, 0.0),
        DVec3::new(1.1, 5.0, 6.0),
    ];
    let points: Vec<Tag> = corners.iter().map(|c| model.add_point(*c).unwrap()).collect();
    let lines: Vec<Tag> = (0..4)
        .map(|i| model.add_line(points[i], points[(i + 1) % 4]).unwrap())
        .collect();
    let curve_loop = model.add_curve_loop(&lines).unwrap();
    assert!(model.add_plane_surface(&[curve_loop]).is_err());

    let filling = model.add_surface_filling(curve_loop).unwrap();
    let surface = model.surface(filling).unwrap();
    assert_eq!(surface.kind, SurfaceKind::Filling);
    assert_eq!(surface.patch.len(), 4);
}

// =============================================================================
// SWEEPS
// =============================================================================

#[test]
fn test_extrude_square() {
    let mut model = Model::new();
    let square = square_surface(&mut model, [DVec3::ZERO, DVec3::X, DVec3::new(1.0, 1.0, 0.0), DVec3::Y]);
    let out = model.extrude(&[DimTag::surface(square)], DVec3::new(0.0, 0.0, 2.0)).unwrap();

    assert_eq!(out.len(), 6);
    assert_eq!(out[0].dim, Dim::Surface);
    assert_eq!(out[1].dim, Dim::Volume);
    assert!(out[2..].iter().all(|e| e.dim == Dim::Surface));
    assert_relative_eq!(enclosed_volume(&model, out[1].tag), 2.0, epsilon = 1e-9);
    // Box-like topology: the profile's 4 points plus 4 new ones.
    assert_eq!(counts(&model), [8, 12, 6, 1]);
}

#[test]
fn test_extrude_against_normal() {
    let mut model = Model::new();
    let square = square_surface(&mut model, [DVec3::ZERO, DVec3::X, DVec3::new(1.0, 1.0, 0.0), DVec3::Y]);
    let out = model.extrude(&[DimTag::surface(square)], DVec3::new(0.0, 0.0, -0.5)).unwrap();
    assert_relative_eq!(enclosed_volume(&model, out[1].tag), 0.5, epsilon = 1e-9);
}

#[test]
fn test_extrude_rejects_volume() {
    let mut model = Model::new();
    let cube = model.add_box(DVec3::ZERO, DVec3::ONE).unwrap();
    assert!(matches!(
        model.extrude(&[DimTag::volume(cube)], DVec3::Z),
        Err(ModelError::Unsupported { .. })
    ));
}

/// Right triangle in the xz-plane with a leg on the z axis.
fn profile(model: &mut Model) -> Tag {
    let a = model.add_point(DVec3::new(0.0, 0.0, 0.0)).unwrap();
    let b = model.add_point(DVec3::new(1.0, 0.0, 0.0)).unwrap();
    let c = model.add_point(DVec3::new(0.0, 0.0, 1.0)).unwrap();
    let lines = [
        model.add_line(a, b).unwrap(),
        model.add_line(b, c).unwrap(),
        model.add_line(c, a).unwrap(),
    ];
    let curve_loop = model.add_curve_loop(&lines).unwrap();
    model.add_plane_surface(&[curve_loop]).unwrap()
}

#[test]
fn test_revolve_full_turn_makes_cone() {
    let mut model = Model::new();
    let surface = profile(&mut model);
    let out = model
        .revolve(&[DimTag::surface(surface)], DVec3::ZERO, DVec3::Z, TAU)
        .unwrap();

    // Volume, then the disk and the cone; the axis leg sweeps nothing.
    assert_eq!(out[0].dim, Dim::Volume);
    assert_eq!(out.len(), 3);
    let volume = enclosed_volume(&model, out[0].tag);
    let exact = PI / 3.0;
    assert!(volume > 0.95 * exact && volume <= exact + 1e-9);
    assert_eq!(model.surface(out[1].tag).unwrap().kind, SurfaceKind::Plane);
    assert_eq!(model.surface(out[2].tag).unwrap().kind, SurfaceKind::Cone);
}

#[test]
fn test_revolve_partial_has_end_cap() {
    let mut model = Model::new();
    let surface = profile(&mut model);
    let out = model
        .revolve(&[DimTag::surface(surface)], DVec3::ZERO, DVec3::Z, FRAC_PI_2)
        .unwrap();
    assert_eq!(out[0].dim, Dim::Surface);
    assert_eq!(out[1].dim, Dim::Volume);
    assert!(enclosed_volume(&model, out[1].tag) > 0.0);
    assert_eq!(faces(&model, out[1].tag)[0], surface);
}

// =============================================================================
// BOOLEANS
// =============================================================================

#[test]
fn test_fuse_keeps_first_object() {
    let mut model = Model::new();
    let a = model.add_box(DVec3::ZERO, DVec3::new(2.0, 1.0, 1.0)).unwrap();
    let b = model.add_box(DVec3::new(1.0, 0.0, 0.0), DVec3::new(2.0, 1.0, 1.0)).unwrap();
    let out = model.fuse(&[DimTag::volume(a)], &[DimTag::volume(b)]).unwrap();

    assert_eq!(out, vec![DimTag::volume(a)]);
    assert_eq!(model.entities(Some(Dim::Volume)), vec![DimTag::volume(a)]);
    assert_relative_eq!(enclosed_volume(&model, a), 3.0, epsilon = 1e-9);
    // a's xmax and b's xmin faces are swallowed.
    assert_eq!(faces(&model, a).len(), 10);
}

#[test]
fn test_cut_removes_tool_and_keeps_cavity_faces() {
    let mut model = Model::new();
    let outer = model.add_cylinder(DVec3::ZERO, DVec3::new(0.0, 0.0, 4.0), 3.0, None).unwrap();
    let hole = model.add_cylinder(DVec3::new(0.0, 0.0, 1.0), DVec3::Z, 1.0, None).unwrap();
    let hole_faces = faces(&model, hole);

    let out = model.cut(&[DimTag::volume(outer)], &[DimTag::volume(hole)]).unwrap();
    assert_eq!(out, vec![DimTag::volume(outer)]);
    assert!(model.volume(hole).is_err());

    let outer_faces = faces(&model, outer);
    assert_eq!(outer_faces.len(), 6);
    assert!(hole_faces.iter().all(|f| outer_faces.contains(f)));
    let exact = PI * 9.0 * 4.0 - PI;
    let volume = enclosed_volume(&model, outer);
    assert!((volume - exact).abs() < 0.05 * exact);
}

#[test]
fn test_cut_prunes_outside_tool_faces() {
    let mut model = Model::new();
    let a = model.add_box(DVec3::ZERO, DVec3::splat(2.0)).unwrap();
    let b = model.add_box(DVec3::splat(1.0), DVec3::splat(2.0)).unwrap();
    model.cut(&[DimTag::volume(a)], &[DimTag::volume(b)]).unwrap();

    // 6 faces of a plus the 3 notch walls from b.
    assert_eq!(faces(&model, a).len(), 9);
    assert_eq!(model.entities(Some(Dim::Surface)).len(), 9);
    assert_relative_eq!(enclosed_volume(&model, a), 7.0, epsilon = 1e-9);
}

#[test]
fn test_boolean_rejects_non_volumes() {
    let mut model = Model::new();
    let a = model.add_box(DVec3::ZERO, DVec3::ONE).unwrap();
    assert!(model.fuse(&[DimTag::volume(a)], &[DimTag::surface(1)]).is_err());
    assert!(model.cut(&[DimTag::volume(9)], &[DimTag::volume(a)]).is_err());
}

// =============================================================================
// TRANSFORMS
// =============================================================================

#[test]
fn test_copy_creates_fresh_tags() {
    let mut model = Model::new();
    let cylinder = model.add_cylinder(DVec3::ZERO, DVec3::Z, 1.0, None).unwrap();
    let copy = model.copy(&[DimTag::volume(cylinder)]).unwrap();

    assert_eq!(copy, vec![DimTag::volume(2)]);
    assert_eq!(counts(&model), [4, 6, 6, 2]);
    assert_eq!(faces(&model, 2), vec![4, 5, 6]);
    assert!(model.volume(2).unwrap().polygons.iter().all(|p| (4..=6).contains(&p.face())));
}

#[test]
fn test_rotate_moves_whole_closure_once() {
    let mut model = Model::new();
    let cube = model.add_box(DVec3::new(1.0, 0.0, 0.0), DVec3::ONE).unwrap();
    model
        .rotate(&[DimTag::volume(cube), DimTag::surface(1)], DVec3::ZERO, DVec3::Z, FRAC_PI_2)
        .unwrap();
    let bounds = model.entity_bounds(DimTag::volume(cube)).unwrap();
    assert_relative_eq!(bounds.min.x, -1.0, epsilon = 1e-12);
    assert_relative_eq!(bounds.min.y, 1.0, epsilon = 1e-12);
    assert_relative_eq!(model.point_position(1).unwrap().y, 1.0, epsilon = 1e-12);
}

#[test]
fn test_translate_point() {
    let mut model = Model::new();
    let p = model.add_point(DVec3::ONE).unwrap();
    model.translate(&[DimTag::point(p)], DVec3::new(0.0, -0.25, -2.5)).unwrap();
    assert_eq!(model.point_position(p).unwrap(), DVec3::new(1.0, 0.75, -1.5));
}

#[test]
fn test_remove_keeps_bound_entities() {
    let mut model = Model::new();
    let square = square_surface(&mut model, [DVec3::ZERO, DVec3::X, DVec3::new(1.0, 1.0, 0.0), DVec3::Y]);
    let out = model.extrude(&[DimTag::surface(square)], DVec3::Z).unwrap();

    // The profile still bounds the volume.
    model.remove(&[DimTag::surface(square)], true).unwrap();
    assert!(model.surface(square).is_ok());

    // Removing the extrusion recursively frees the profile with it.
    model.remove(&out, true).unwrap();
    assert!(model.surface(square).is_err());
    // Unknown entities are skipped.
    model.remove(&[DimTag::surface(square), DimTag::volume(99)], true).unwrap();
    assert!(model.entities(None).is_empty());
}
