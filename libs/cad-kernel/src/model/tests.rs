//! Tests for model storage, queries, groups and sizes.

use super::*;
use glam::DVec3;

fn cylinder_model() -> (Model, Tag) {
    let mut model = Model::new();
    let tag = model.add_cylinder(DVec3::ZERO, DVec3::new(0.0, 0.0, 2.0), 1.0, None).unwrap();
    (model, tag)
}

// =============================================================================
// TAGS AND QUERIES
// =============================================================================

#[test]
fn test_tags_start_at_one_per_dimension() {
    let (model, volume) = cylinder_model();
    assert_eq!(volume, 1);
    assert_eq!(
        model.entities(Some(Dim::Point)),
        vec![DimTag::point(1), DimTag::point(2)]
    );
    assert_eq!(model.entities(Some(Dim::Curve)).len(), 3);
    assert_eq!(model.entities(Some(Dim::Surface)).len(), 3);
    assert_eq!(model.entities(None).len(), 9);
}

#[test]
fn test_tags_not_reused_after_remove() {
    let (mut model, volume) = cylinder_model();
    model.remove(&[DimTag::volume(volume)], true).unwrap();
    assert!(model.entities(None).is_empty());

    let next = model.add_box(DVec3::ZERO, DVec3::ONE).unwrap();
    assert_eq!(next, 2);
    assert_eq!(model.entities(Some(Dim::Point))[0], DimTag::point(3));
}

#[test]
fn test_adjacencies_both_directions() {
    let (model, volume) = cylinder_model();
    let faces = model.adjacencies(DimTag::volume(volume)).unwrap();
    assert_eq!(faces.downward, vec![1, 2, 3]);
    assert!(faces.upward.is_empty());

    // Lateral face: bottom circle, seam, top circle.
    let lateral = model.adjacencies(DimTag::surface(1)).unwrap();
    assert_eq!(lateral.downward, vec![1, 3, 2]);
    assert_eq!(lateral.upward, vec![volume]);

    let seam = model.adjacencies(DimTag::curve(3)).unwrap();
    assert_eq!(seam.downward, vec![1, 2]);
    assert_eq!(seam.upward, vec![1]);

    let bottom_point = model.adjacencies(DimTag::point(1)).unwrap();
    assert_eq!(bottom_point.upward, vec![1, 3]);
}

#[test]
fn test_adjacencies_unknown_entity() {
    let (model, _) = cylinder_model();
    let err = model.adjacencies(DimTag::surface(99)).unwrap_err();
    assert!(matches!(err, ModelError::UnknownEntity { .. }));
}

#[test]
fn test_boundary_recursive_reaches_points() {
    let mut model = Model::new();
    let cube = model.add_box(DVec3::ZERO, DVec3::ONE).unwrap();
    let faces = model.boundary(&[DimTag::volume(cube)], false).unwrap();
    assert_eq!(faces.len(), 6);
    assert!(faces.iter().all(|f| f.dim == Dim::Surface));

    let points = model.boundary(&[DimTag::volume(cube)], true).unwrap();
    assert_eq!(points.len(), 8);
    assert!(points.iter().all(|p| p.dim == Dim::Point));
}

#[test]
fn test_surface_points_walk() {
    let (model, _) = cylinder_model();
    assert_eq!(model.surface_points(1).unwrap(), vec![1, 2]);
    assert_eq!(model.surface_points(2).unwrap(), vec![2]);
    assert_eq!(model.surface_points(3).unwrap(), vec![1]);
}

#[test]
fn test_bounding_box() {
    let (model, _) = cylinder_model();
    let bounds = model.bounding_box();
    assert!((bounds.min.z - 0.0).abs() < 1e-12);
    assert!((bounds.max.z - 2.0).abs() < 1e-12);
    assert!((bounds.max.x - 1.0).abs() < 1e-12);
}

// =============================================================================
// PHYSICAL GROUPS
// =============================================================================

#[test]
fn test_physical_group_tags_per_dimension() {
    let (mut model, volume) = cylinder_model();
    let surfaces = model.add_physical_group(Dim::Surface, &[1, 2], "Walls").unwrap();
    let solid = model.add_physical_group(Dim::Volume, &[volume], "Volume").unwrap();
    let more = model.add_physical_group(Dim::Surface, &[3, 3], "Floor").unwrap();

    assert_eq!(surfaces, PhysicalGroup::new(Dim::Surface, 1));
    assert_eq!(solid, PhysicalGroup::new(Dim::Volume, 1));
    assert_eq!(more, PhysicalGroup::new(Dim::Surface, 2));
    assert_eq!(model.entities_for_physical_group(more).unwrap(), vec![3]);
    assert_eq!(model.physical_groups(Some(Dim::Surface)).len(), 2);
    assert_eq!(model.physical_name(solid).unwrap(), "Volume");
}

#[test]
fn test_physical_group_rejects_wrong_dimension() {
    let (mut model, volume) = cylinder_model();
    // Volume 1 exists, surface 7 does not.
    let err = model.add_physical_group(Dim::Surface, &[1, 7], "Mixed").unwrap_err();
    assert!(matches!(err, ModelError::UnknownEntity { entity } if entity == DimTag::surface(7)));
    assert!(model.physical_groups(None).is_empty());

    assert!(model.add_physical_group(Dim::Point, &[volume, 3], "Points").is_err());
}

#[test]
fn test_unknown_group() {
    let (model, _) = cylinder_model();
    let group = PhysicalGroup::new(Dim::Surface, 5);
    assert!(!model.has_physical_group(group));
    assert!(matches!(
        model.entities_for_physical_group(group),
        Err(ModelError::UnknownGroup { .. })
    ));
}

#[test]
fn test_group_skips_removed_members() {
    let mut model = Model::new();
    let a = model.add_box(DVec3::ZERO, DVec3::ONE).unwrap();
    let b = model.add_box(DVec3::splat(0.5), DVec3::ONE).unwrap();
    let b_faces = model.adjacencies(DimTag::volume(b)).unwrap().downward;
    let group = model.add_physical_group(Dim::Surface, &b_faces, "Tool").unwrap();

    model.cut(&[DimTag::volume(a)], &[DimTag::volume(b)]).unwrap();
    let live = model.entities_for_physical_group(group).unwrap();
    // Only the three faces of the tool bounding the notch remain.
    assert_eq!(live.len(), 3);
    assert!(live.iter().all(|s| b_faces.contains(s)));
}

// =============================================================================
// MESH SIZES
// =============================================================================

#[test]
fn test_set_size_last_write_wins() {
    let (mut model, _) = cylinder_model();
    model.set_size(&[DimTag::point(1), DimTag::point(2)], 0.5).unwrap();
    model.set_size(&[DimTag::point(1)], 0.2).unwrap();
    assert_eq!(model.size_of(1), Some(0.2));
    assert_eq!(model.size_of(2), Some(0.5));
    assert_eq!(model.sizes().count(), 2);
}

#[test]
fn test_set_size_rejects_invalid() {
    let (mut model, _) = cylinder_model();
    assert!(matches!(
        model.set_size(&[DimTag::point(1)], 0.0),
        Err(ModelError::InvalidSize { .. })
    ));
    assert!(model.set_size(&[DimTag::point(1)], f64::NAN).is_err());
    assert!(matches!(
        model.set_size(&[DimTag::curve(1)], 1.0),
        Err(ModelError::WrongDimension { .. })
    ));
    // Nothing is written when any entity is invalid.
    assert!(model.set_size(&[DimTag::point(1), DimTag::point(9)], 1.0).is_err());
    assert_eq!(model.size_of(1), None);
}
