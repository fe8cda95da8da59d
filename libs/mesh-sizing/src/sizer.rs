//! # Group Mesh Sizer

use std::collections::BTreeSet;

use cad_kernel::{Dim, DimTag, PhysicalGroup, Tag};

use crate::engine::SizingEngine;
use crate::error::{SizingError, SizingResult};
use crate::plan::SizingPlan;

/// Applies target mesh sizes to surface physical groups.
///
/// Borrows the engine mutably for its lifetime; every size directive goes
/// through [`SizingEngine::set_size`].
pub struct GroupMeshSizer<'a, E: SizingEngine> {
    engine: &'a mut E,
}

impl<'a, E: SizingEngine> GroupMeshSizer<'a, E> {
    /// Creates a sizer over an engine.
    pub fn new(engine: &'a mut E) -> Self {
        Self { engine }
    }

    /// Sets `size` on every point bounding the group's faces.
    ///
    /// Returns the sized points in ascending tag order. An empty group sizes
    /// nothing and issues no engine call.
    ///
    /// # Errors
    ///
    /// - [`SizingError::InvalidSize`] if `size` is not positive and finite.
    /// - [`SizingError::InvalidGroup`] if the group is not a surface group or
    ///   does not exist.
    /// - [`SizingError::Engine`] if an adjacency query or the size directive
    ///   fails.
    pub fn apply_size(&mut self, group: PhysicalGroup, size: f64) -> SizingResult<Vec<DimTag>> {
        if !size.is_finite() || size <= 0.0 {
            return Err(SizingError::InvalidSize { size });
        }

        let points: Vec<DimTag> = self
            .bounding_points(group)?
            .into_iter()
            .map(DimTag::point)
            .collect();

        if points.is_empty() {
            log::debug!("{} has no points, nothing sized", group);
            return Ok(points);
        }

        self.engine.set_size(&points, size)?;
        log::debug!("{} sized {} on {} points", group, size, points.len());
        Ok(points)
    }

    /// Applies every entry of a plan in order.
    ///
    /// Stops at the first failing entry; entries before it stay applied.
    pub fn apply_plan(&mut self, plan: &SizingPlan) -> SizingResult<usize> {
        let mut sized = 0;
        for (group, size) in plan.iter() {
            sized += self.apply_size(group, size)?.len();
        }
        log::info!("applied {} sizing entries ({} point directives)", plan.len(), sized);
        Ok(sized)
    }

    /// Distinct points reached through the group's faces and their curves.
    pub fn bounding_points(&self, group: PhysicalGroup) -> SizingResult<BTreeSet<Tag>> {
        if group.dim != Dim::Surface {
            return Err(SizingError::invalid_group(group, "not a surface group"));
        }
        if !self.engine.physical_group_exists(group) {
            return Err(SizingError::invalid_group(group, "no such group"));
        }

        let mut points = BTreeSet::new();
        for face in self.engine.entities_for_physical_group(group)? {
            let curves = self.engine.adjacencies(DimTag::surface(face))?.downward;
            for curve in curves {
                points.extend(self.engine.adjacencies(DimTag::curve(curve))?.downward);
            }
        }
        Ok(points)
    }
}
