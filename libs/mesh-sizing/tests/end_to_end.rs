//! Group sizing through the real kernel and mesher.

use cad_kernel::{Dim, DimTag, Model};
use cad_mesh::{generate, ElementKind, MeshDim, MeshOptions};
use glam::DVec3;
use mesh_sizing::{GroupMeshSizer, SizingPlan};

#[test]
fn test_sized_cylinder_mesh_edges_within_target() {
    let mut model = Model::new();
    let cylinder = model
        .add_cylinder(DVec3::ZERO, DVec3::new(0.0, 0.0, 2.0), 1.0, None)
        .unwrap();
    let faces = model.adjacencies(DimTag::volume(cylinder)).unwrap().downward;
    let hull = model.add_physical_group(Dim::Surface, &faces, "Hull").unwrap();

    let sized = GroupMeshSizer::new(&mut model).apply_size(hull, 0.3).unwrap();
    assert_eq!(sized, vec![DimTag::point(1), DimTag::point(2)]);

    let mesh = generate(&model, &MeshOptions::default().with_dimension(MeshDim::Surface)).unwrap();
    assert!(mesh.count_of(ElementKind::Triangle) > 0);

    let longest = mesh
        .edge_lengths(ElementKind::Triangle)
        .fold(0.0, f64::max);
    assert!(longest <= 0.3 + 1e-9, "longest edge {longest}");
}

#[test]
fn test_far_field_cylinder_ground_overrides_space() {
    let mut model = Model::new();
    let boundary = model
        .add_cylinder(DVec3::new(0.0, 0.0, -2.2), DVec3::new(0.0, 0.0, 35.0), 15.0, None)
        .unwrap();
    let faces = model.adjacencies(DimTag::volume(boundary)).unwrap().downward;
    let space = model
        .add_physical_group(Dim::Surface, &[faces[0], faces[1]], "Space")
        .unwrap();
    let ground = model.add_physical_group(Dim::Surface, &[faces[2]], "Ground").unwrap();

    let plan = SizingPlan::new().then(space, 0.5).then(ground, 0.25);
    GroupMeshSizer::new(&mut model).apply_plan(&plan).unwrap();

    // Point 1 lies on the bottom circle shared with the ground face.
    assert_eq!(model.size_of(1), Some(0.25));
    assert_eq!(model.size_of(2), Some(0.5));
}

#[test]
fn test_sizes_survive_until_points_removed() {
    let mut model = Model::new();
    let outer = model.add_box(DVec3::ZERO, DVec3::splat(4.0)).unwrap();
    let tool = model.add_box(DVec3::splat(3.0), DVec3::splat(2.0)).unwrap();
    let tool_faces = model.adjacencies(DimTag::volume(tool)).unwrap().downward;
    let group = model.add_physical_group(Dim::Surface, &tool_faces, "Tool").unwrap();
    GroupMeshSizer::new(&mut model).apply_size(group, 0.1).unwrap();

    model
        .cut(&[DimTag::volume(outer)], &[DimTag::volume(tool)])
        .unwrap();

    // Only the tool faces inside the box survive as walls of the notch.
    let live = model.entities_for_physical_group(group).unwrap();
    assert_eq!(live.len(), 3);
    let resized = GroupMeshSizer::new(&mut model).apply_size(group, 0.2).unwrap();
    assert!(!resized.is_empty());
    for point in resized {
        assert_eq!(model.size_of(point.tag), Some(0.2));
    }
}
