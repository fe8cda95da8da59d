//! # Scenario Building Blocks
//!
//! Shared helpers for the scenario builders: patterned copies, surface
//! groups and the [`Scenario`] record a builder hands to the pipeline.

use cad_kernel::io::to_brep_string;
use cad_kernel::{Dim, DimTag, Model, PhysicalGroup, Tag};
use glam::DVec3;
use mesh_sizing::{GroupMeshSizer, SizingPlan};

use crate::error::{BuildError, BuildResult};

/// A topology dump captured part way through construction.
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    pub file_name: &'static str,
    pub brep: String,
}

impl Snapshot {
    /// Captures the current state of the model.
    pub fn capture(model: &Model, file_name: &'static str) -> BuildResult<Self> {
        let brep = to_brep_string(model)?;
        log::info!("captured {}", file_name);
        Ok(Self { file_name, brep })
    }
}

/// A built scenario, ready for sizing and meshing.
#[derive(Debug, Clone)]
pub struct Scenario {
    /// The far-field volume.
    pub boundary: Tag,
    /// Group sizes still to apply, in order.
    pub plan: SizingPlan,
    /// Dumps captured during construction.
    pub snapshots: Vec<Snapshot>,
    /// Topology dump written after sizing, before meshing.
    pub brep_file: Option<&'static str>,
    pub msh_file: &'static str,
}

/// Copies `entity` `count` times, each copy taken from the previous one and
/// rotated by `angle` about the axis through `point`.
///
/// Returns the original followed by the copies.
pub fn rotated_copies(
    model: &mut Model,
    entity: DimTag,
    count: usize,
    point: DVec3,
    axis: DVec3,
    angle: f64,
) -> BuildResult<Vec<DimTag>> {
    let mut entities = vec![entity];
    for _ in 0..count {
        let last = entities[entities.len() - 1];
        let copy = first_of(&model.copy(&[last])?, last.dim, "copy")?;
        model.rotate(&[copy], point, axis, angle)?;
        entities.push(copy);
    }
    Ok(entities)
}

/// Copies an entity and rotates the copy.
pub fn rotated_copy(model: &mut Model, entity: DimTag, point: DVec3, axis: DVec3, angle: f64) -> BuildResult<DimTag> {
    let copies = rotated_copies(model, entity, 1, point, axis, angle)?;
    Ok(copies[1])
}

/// First entity of dimension `dim` in an operation's result.
pub fn first_of(entities: &[DimTag], dim: Dim, operation: &'static str) -> BuildResult<DimTag> {
    entities
        .iter()
        .copied()
        .find(|e| e.dim == dim)
        .ok_or_else(|| BuildError::missing(operation, dim_name(dim)))
}

fn dim_name(dim: Dim) -> &'static str {
    match dim {
        Dim::Point => "point",
        Dim::Curve => "curve",
        Dim::Surface => "surface",
        Dim::Volume => "volume",
    }
}

/// Bounding surfaces of a volume.
pub fn surfaces_of(model: &Model, volume: Tag) -> BuildResult<Vec<Tag>> {
    Ok(model.adjacencies(DimTag::volume(volume))?.downward)
}

/// Creates a surface group over the bounding surfaces of a volume.
pub fn volume_surface_group(model: &mut Model, volume: Tag, name: &str) -> BuildResult<PhysicalGroup> {
    let surfaces = surfaces_of(model, volume)?;
    Ok(model.add_physical_group(Dim::Surface, &surfaces, name)?)
}

/// Creates numbered surface groups `"{prefix} 1"`, `"{prefix} 2"`, ... over
/// a list of volumes.
pub fn numbered_groups(model: &mut Model, volumes: &[DimTag], prefix: &str) -> BuildResult<Vec<PhysicalGroup>> {
    volumes
        .iter()
        .enumerate()
        .map(|(i, volume)| volume_surface_group(model, volume.tag, &format!("{} {}", prefix, i + 1)))
        .collect()
}

/// Applies a sizing plan immediately.
pub fn apply_sizes(model: &mut Model, plan: &SizingPlan) -> BuildResult<()> {
    GroupMeshSizer::new(model).apply_plan(plan)?;
    Ok(())
}

/// Shorthand for an axis-aligned vector along Z.
pub fn up(length: f64) -> DVec3 {
    DVec3::new(0.0, 0.0, length)
}
