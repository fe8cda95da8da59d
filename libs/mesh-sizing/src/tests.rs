//! Tests for the group mesh sizer against an in-memory engine.

use std::collections::{BTreeMap, BTreeSet};

use cad_kernel::{Adjacency, Dim, DimTag, ModelError, PhysicalGroup, Tag};

use crate::{GroupMeshSizer, SizingEngine, SizingError, SizingPlan};

/// Engine holding only the face -> curve -> point structure and recording
/// every size directive it receives.
#[derive(Default)]
struct FakeEngine {
    groups: BTreeMap<PhysicalGroup, Vec<Tag>>,
    faces: BTreeMap<Tag, Vec<Tag>>,
    curves: BTreeMap<Tag, Vec<Tag>>,
    sizes: BTreeMap<Tag, f64>,
    calls: Vec<(Vec<DimTag>, f64)>,
}

impl FakeEngine {
    fn face(mut self, face: Tag, curves: &[Tag]) -> Self {
        self.faces.insert(face, curves.to_vec());
        self
    }

    fn curve(mut self, curve: Tag, points: &[Tag]) -> Self {
        self.curves.insert(curve, points.to_vec());
        self
    }

    fn group(mut self, tag: Tag, faces: &[Tag]) -> Self {
        self.groups
            .insert(PhysicalGroup::new(Dim::Surface, tag), faces.to_vec());
        self
    }
}

impl SizingEngine for FakeEngine {
    fn physical_group_exists(&self, group: PhysicalGroup) -> bool {
        self.groups.contains_key(&group)
    }

    fn entities_for_physical_group(&self, group: PhysicalGroup) -> Result<Vec<Tag>, ModelError> {
        self.groups
            .get(&group)
            .cloned()
            .ok_or(ModelError::UnknownGroup { group })
    }

    fn adjacencies(&self, entity: DimTag) -> Result<Adjacency, ModelError> {
        let downward = match entity.dim {
            Dim::Surface => self.faces.get(&entity.tag),
            Dim::Curve => self.curves.get(&entity.tag),
            _ => None,
        };
        downward
            .map(|downward| Adjacency {
                upward: Vec::new(),
                downward: downward.clone(),
            })
            .ok_or_else(|| ModelError::unknown(entity))
    }

    fn set_size(&mut self, points: &[DimTag], size: f64) -> Result<(), ModelError> {
        for point in points {
            self.sizes.insert(point.tag, size);
        }
        self.calls.push((points.to_vec(), size));
        Ok(())
    }
}

/// A cylinder: lateral face 1 (curves 1, 2, 3), top face 2 (curve 2),
/// bottom face 3 (curve 1). Seam curve 3 joins points 1 and 2.
fn cylinder() -> FakeEngine {
    FakeEngine::default()
        .curve(1, &[1, 1])
        .curve(2, &[2, 2])
        .curve(3, &[1, 2])
        .face(1, &[1, 3, 2])
        .face(2, &[2])
        .face(3, &[1])
}

fn surface_group(tag: Tag) -> PhysicalGroup {
    PhysicalGroup::new(Dim::Surface, tag)
}

fn points(tags: &[Tag]) -> Vec<DimTag> {
    tags.iter().copied().map(DimTag::point).collect()
}

// =============================================================================
// SINGLE GROUP
// =============================================================================

#[test]
fn test_sizes_every_bounding_point() {
    let mut engine = cylinder().group(1, &[1, 2, 3]);
    let sized = GroupMeshSizer::new(&mut engine)
        .apply_size(surface_group(1), 0.3)
        .unwrap();

    assert_eq!(sized, points(&[1, 2]));
    assert_eq!(engine.sizes.get(&1), Some(&0.3));
    assert_eq!(engine.sizes.get(&2), Some(&0.3));
}

#[test]
fn test_shared_points_sized_once_in_one_call() {
    // Two quads sharing curve 12 (points 2 and 3).
    let mut engine = FakeEngine::default()
        .curve(10, &[1, 2])
        .curve(11, &[4, 1])
        .curve(12, &[2, 3])
        .curve(13, &[3, 4])
        .curve(14, &[2, 5])
        .curve(15, &[5, 6])
        .curve(16, &[6, 3])
        .face(1, &[10, 12, 13, 11])
        .face(2, &[14, 15, 16, 12])
        .group(1, &[1, 2]);

    let sized = GroupMeshSizer::new(&mut engine)
        .apply_size(surface_group(1), 0.5)
        .unwrap();

    assert_eq!(sized, points(&[1, 2, 3, 4, 5, 6]));
    assert_eq!(engine.calls.len(), 1);
    let unique: BTreeSet<_> = engine.calls[0].0.iter().collect();
    assert_eq!(unique.len(), engine.calls[0].0.len());
}

#[test]
fn test_deterministic_across_engines() {
    let run = || {
        let mut engine = cylinder().group(1, &[3, 1, 2]);
        let sized = GroupMeshSizer::new(&mut engine)
            .apply_size(surface_group(1), 0.7)
            .unwrap();
        (sized, engine.calls)
    };
    assert_eq!(run(), run());
}

#[test]
fn test_idempotent_within_group() {
    let mut engine = cylinder().group(1, &[1, 2, 3]);
    let mut sizer = GroupMeshSizer::new(&mut engine);
    let first = sizer.apply_size(surface_group(1), 0.4).unwrap();
    let second = sizer.apply_size(surface_group(1), 0.4).unwrap();

    assert_eq!(first, second);
    assert_eq!(engine.calls[0], engine.calls[1]);
    assert_eq!(engine.sizes.len(), 2);
}

#[test]
fn test_empty_group_is_a_no_op() {
    let mut engine = cylinder().group(1, &[]);
    let sized = GroupMeshSizer::new(&mut engine)
        .apply_size(surface_group(1), 0.3)
        .unwrap();

    assert!(sized.is_empty());
    assert!(engine.calls.is_empty());
    assert!(engine.sizes.is_empty());
}

// =============================================================================
// OVERLAPPING GROUPS
// =============================================================================

#[test]
fn test_last_write_wins_on_shared_points() {
    // Space = lateral + top, Ground = bottom; both contain seam point 1.
    let engine = || cylinder().group(1, &[1, 2]).group(2, &[3]);

    let mut forward = engine();
    GroupMeshSizer::new(&mut forward)
        .apply_plan(&SizingPlan::new().then(surface_group(1), 0.5).then(surface_group(2), 0.25))
        .unwrap();
    assert_eq!(forward.sizes.get(&1), Some(&0.25));
    assert_eq!(forward.sizes.get(&2), Some(&0.5));

    let mut reversed = engine();
    GroupMeshSizer::new(&mut reversed)
        .apply_plan(&SizingPlan::new().then(surface_group(2), 0.25).then(surface_group(1), 0.5))
        .unwrap();
    assert_eq!(reversed.sizes.get(&1), Some(&0.5));
    assert_eq!(reversed.sizes.get(&2), Some(&0.5));
}

#[test]
fn test_plan_applies_in_insertion_order() {
    let mut engine = cylinder().group(1, &[2]).group(2, &[3]).group(3, &[1]);
    let plan: SizingPlan = [(surface_group(3), 1.0), (surface_group(1), 2.0), (surface_group(2), 3.0)]
        .into_iter()
        .collect();

    let total = GroupMeshSizer::new(&mut engine).apply_plan(&plan).unwrap();

    assert_eq!(total, 4);
    let sizes: Vec<f64> = engine.calls.iter().map(|(_, size)| *size).collect();
    assert_eq!(sizes, vec![1.0, 2.0, 3.0]);
    assert_eq!(engine.sizes.get(&1), Some(&3.0));
    assert_eq!(engine.sizes.get(&2), Some(&2.0));
}

// =============================================================================
// VALIDATION
// =============================================================================

#[test]
fn test_rejects_invalid_sizes_before_touching_engine() {
    let mut engine = cylinder().group(1, &[1]);
    let mut sizer = GroupMeshSizer::new(&mut engine);
    for size in [0.0, -1.0, f64::NAN, f64::INFINITY] {
        let err = sizer.apply_size(surface_group(1), size).unwrap_err();
        assert!(matches!(err, SizingError::InvalidSize { .. }));
    }
    assert!(engine.calls.is_empty());
}

#[test]
fn test_rejects_non_surface_group() {
    let mut engine = cylinder();
    engine.groups.insert(PhysicalGroup::new(Dim::Volume, 1), vec![1]);

    let err = GroupMeshSizer::new(&mut engine)
        .apply_size(PhysicalGroup::new(Dim::Volume, 1), 0.3)
        .unwrap_err();
    assert!(matches!(err, SizingError::InvalidGroup { .. }));
}

#[test]
fn test_rejects_unknown_group() {
    let mut engine = cylinder();
    let err = GroupMeshSizer::new(&mut engine)
        .apply_size(surface_group(9), 0.3)
        .unwrap_err();
    assert!(matches!(err, SizingError::InvalidGroup { .. }));
}

#[test]
fn test_invalid_size_checked_before_group() {
    let mut engine = cylinder();
    let err = GroupMeshSizer::new(&mut engine)
        .apply_size(surface_group(9), -2.0)
        .unwrap_err();
    assert!(matches!(err, SizingError::InvalidSize { .. }));
}

#[test]
fn test_engine_failure_propagates() {
    // Face 7 is listed by the group but unknown to the engine.
    let mut engine = cylinder().group(1, &[1, 7]);
    let err = GroupMeshSizer::new(&mut engine)
        .apply_size(surface_group(1), 0.3)
        .unwrap_err();

    assert!(matches!(err, SizingError::Engine(ModelError::UnknownEntity { .. })));
    assert!(engine.calls.is_empty());
}
