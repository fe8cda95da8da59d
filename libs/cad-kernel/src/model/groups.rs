//! # Physical Groups
//!
//! Named labels over entities of one dimension.
//!
//! Membership is fixed at creation. Members removed later by booleans or
//! `remove` stay recorded but are skipped when the group is enumerated.

use super::{Model, ModelResult};
use crate::entity::{Dim, DimTag, PhysicalGroup, Tag};
use crate::error::ModelError;

/// Stored name and members of a group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupRecord {
    pub name: String,
    pub members: Vec<Tag>,
}

impl Model {
    /// Creates a physical group over existing entities of dimension `dim`.
    ///
    /// Duplicate tags are recorded once. Fails without creating anything if
    /// a member does not exist.
    ///
    /// # Example
    ///
    /// ```rust
    /// use cad_kernel::{Dim, DimTag, Model};
    /// use glam::DVec3;
    ///
    /// let mut model = Model::new();
    /// let cube = model.add_box(DVec3::ZERO, DVec3::ONE).unwrap();
    /// let faces = model.adjacencies(DimTag::volume(cube)).unwrap().downward;
    /// let group = model.add_physical_group(Dim::Surface, &faces, "Cube").unwrap();
    /// assert_eq!(model.physical_name(group).unwrap(), "Cube");
    /// assert_eq!(model.entities_for_physical_group(group).unwrap().len(), 6);
    /// ```
    pub fn add_physical_group(&mut self, dim: Dim, tags: &[Tag], name: &str) -> ModelResult<PhysicalGroup> {
        let mut members = Vec::with_capacity(tags.len());
        for &tag in tags {
            let entity = DimTag::new(dim, tag);
            if !self.contains(entity) {
                return Err(ModelError::unknown(entity));
            }
            if !members.contains(&tag) {
                members.push(tag);
            }
        }

        let group = PhysicalGroup::new(dim, self.allocate_group(dim));
        log::debug!("{} \"{}\" with {} members", group, name, members.len());
        self.groups.insert(
            group,
            GroupRecord {
                name: name.to_string(),
                members,
            },
        );
        Ok(group)
    }

    fn group(&self, group: PhysicalGroup) -> ModelResult<&GroupRecord> {
        self.groups
            .get(&group)
            .ok_or(ModelError::UnknownGroup { group })
    }

    /// Whether the group exists.
    pub fn has_physical_group(&self, group: PhysicalGroup) -> bool {
        self.groups.contains_key(&group)
    }

    /// Live members of a group, in creation order.
    pub fn entities_for_physical_group(&self, group: PhysicalGroup) -> ModelResult<Vec<Tag>> {
        Ok(self
            .group(group)?
            .members
            .iter()
            .copied()
            .filter(|&tag| self.contains(DimTag::new(group.dim, tag)))
            .collect())
    }

    /// Groups of one dimension, or all groups, ascending.
    pub fn physical_groups(&self, dim: Option<Dim>) -> Vec<PhysicalGroup> {
        self.groups
            .keys()
            .filter(|group| dim.map_or(true, |dim| group.dim == dim))
            .copied()
            .collect()
    }

    /// Name given to a group.
    pub fn physical_name(&self, group: PhysicalGroup) -> ModelResult<&str> {
        Ok(self.group(group)?.name.as_str())
    }
}
