//! # Sizing Engine
//!
//! The queries and commands the sizer needs from a CAD engine.

use cad_kernel::{Adjacency, DimTag, Model, ModelError, PhysicalGroup, Tag};

/// CAD engine operations used to size a physical group.
pub trait SizingEngine {
    /// Whether the group exists.
    fn physical_group_exists(&self, group: PhysicalGroup) -> bool;

    /// Live member tags of the group.
    fn entities_for_physical_group(&self, group: PhysicalGroup) -> Result<Vec<Tag>, ModelError>;

    /// Upward and downward adjacencies of an entity.
    fn adjacencies(&self, entity: DimTag) -> Result<Adjacency, ModelError>;

    /// Sets the target mesh size on a batch of points.
    fn set_size(&mut self, points: &[DimTag], size: f64) -> Result<(), ModelError>;
}

impl SizingEngine for Model {
    fn physical_group_exists(&self, group: PhysicalGroup) -> bool {
        self.has_physical_group(group)
    }

    fn entities_for_physical_group(&self, group: PhysicalGroup) -> Result<Vec<Tag>, ModelError> {
        Model::entities_for_physical_group(self, group)
    }

    fn adjacencies(&self, entity: DimTag) -> Result<Adjacency, ModelError> {
        Model::adjacencies(self, entity)
    }

    fn set_size(&mut self, points: &[DimTag], size: f64) -> Result<(), ModelError> {
        Model::set_size(self, points, size)
    }
}
