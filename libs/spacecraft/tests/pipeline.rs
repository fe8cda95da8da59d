//! Export pipeline on a small far field, written into a temporary
//! directory.

use std::fs;

use cad_kernel::{Dim, DimTag, Model};
use cad_mesh::{MeshDim, MeshOptions};
use glam::DVec3;
use mesh_sizing::SizingPlan;
use spacecraft::common::surfaces_of;
use spacecraft::{run, Scenario, Snapshot};

fn small_scenario(model: &mut Model) -> Scenario {
    let body = model.add_box(DVec3::splat(-0.5), DVec3::ONE).unwrap();
    let body_group = model
        .add_physical_group(Dim::Surface, &surfaces_of(model, body).unwrap(), "Body")
        .unwrap();
    let snapshot = Snapshot::capture(model, "body.brep").unwrap();

    let boundary = model.add_box(DVec3::splat(-3.0), DVec3::splat(6.0)).unwrap();
    let walls = surfaces_of(model, boundary).unwrap();
    model
        .cut(&[DimTag::volume(boundary)], &[DimTag::volume(body)])
        .unwrap();
    let space = model.add_physical_group(Dim::Surface, &walls, "Space").unwrap();
    model.add_physical_group(Dim::Volume, &[boundary], "Volume").unwrap();

    Scenario {
        boundary,
        plan: SizingPlan::new().then(body_group, 0.25).then(space, 1.5),
        snapshots: vec![snapshot],
        brep_file: Some("far_field.brep"),
        msh_file: "far_field.msh",
    }
}

#[test]
fn test_run_writes_every_file() {
    let dir = tempfile::tempdir().unwrap();
    let mut model = Model::new();
    let scenario = small_scenario(&mut model);

    let options = MeshOptions::default()
        .with_dimension(MeshDim::Surface)
        .with_max_octree_depth(3);
    let mesh = run(&mut model, &scenario, dir.path(), &options).unwrap();
    assert!(!mesh.is_empty());

    let snapshot = fs::read_to_string(dir.path().join("body.brep")).unwrap();
    assert_eq!(snapshot, scenario.snapshots[0].brep);
    assert!(dir.path().join("far_field.brep").exists());

    let msh = fs::read_to_string(dir.path().join("far_field.msh")).unwrap();
    assert!(msh.starts_with("$MeshFormat\n2.2 0 8\n$EndMeshFormat\n"));
    assert!(msh.contains("\"Body\""));
    assert!(msh.contains("\"Space\""));
}

#[test]
fn test_run_applies_plan_in_order() {
    let dir = tempfile::tempdir().unwrap();
    let mut model = Model::new();
    let scenario = small_scenario(&mut model);

    let options = MeshOptions::default().with_dimension(MeshDim::Surface);
    run(&mut model, &scenario, dir.path(), &options).unwrap();

    // Body and walls share no points, so each keeps its own size.
    let sizes: Vec<f64> = model.sizes().map(|(_, size)| size).collect();
    assert_eq!(sizes.len(), 16);
    assert_eq!(sizes.iter().filter(|&&s| s == 0.25).count(), 8);
    assert_eq!(sizes.iter().filter(|&&s| s == 1.5).count(), 8);
}

#[test]
fn test_run_reports_missing_directory() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("missing");
    let mut model = Model::new();
    let scenario = small_scenario(&mut model);

    let err = run(&mut model, &scenario, &missing, &MeshOptions::default()).unwrap_err();
    assert!(matches!(err, spacecraft::BuildError::Io(_)));
}
