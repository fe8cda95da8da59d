//! # Booleans
//!
//! Fuse and cut of volumes.
//!
//! Results keep surface provenance: a surface of either operand survives
//! if at least one of its polygons does. Intersection curves are not
//! created. Tool volumes are removed afterwards, together with boundary
//! entities that no longer bound anything.

use crate::entity::{Dim, DimTag, Tag};
use crate::error::ModelError;
use crate::geometry::bsp;
use crate::geometry::Polygon;
use crate::model::{Model, ModelResult};
use std::collections::BTreeSet;

/// Surfaces from `candidates` (in order, once each) that still own a
/// polygon.
fn surviving_surfaces(candidates: impl IntoIterator<Item = Tag>, polygons: &[Polygon]) -> Vec<Tag> {
    let present: BTreeSet<Tag> = polygons.iter().map(|p| p.face()).collect();
    let mut surfaces = Vec::new();
    for tag in candidates {
        if present.contains(&tag) && !surfaces.contains(&tag) {
            surfaces.push(tag);
        }
    }
    surfaces
}

impl Model {
    fn expect_volumes(&self, entities: &[DimTag]) -> ModelResult<()> {
        for &entity in entities {
            self.expect_dim(entity, Dim::Volume)?;
        }
        Ok(())
    }

    /// Fuses objects and tools into the first object.
    ///
    /// Returns the fused volume.
    pub fn fuse(&mut self, objects: &[DimTag], tools: &[DimTag]) -> ModelResult<Vec<DimTag>> {
        self.expect_volumes(objects)?;
        self.expect_volumes(tools)?;
        let Some(&keep) = objects.first() else {
            return Err(ModelError::boolean_failed("fuse without object"));
        };

        let mut operands: Vec<DimTag> = Vec::new();
        for &entity in objects.iter().chain(tools) {
            if !operands.contains(&entity) {
                operands.push(entity);
            }
        }
        let involved = self.closure(&operands)?;

        let mut polygons = Vec::new();
        let mut candidates = Vec::new();
        for entity in &operands {
            let volume = self.volume(entity.tag)?;
            candidates.extend(volume.surfaces.iter().copied());
            polygons = bsp::union(polygons, volume.polygons.clone());
        }
        let surfaces = surviving_surfaces(candidates, &polygons);

        for entity in operands.iter().filter(|e| **e != keep) {
            self.delete(*entity);
        }
        let volume = self
            .volumes
            .get_mut(&keep.tag)
            .ok_or_else(|| ModelError::unknown(keep))?;
        volume.surfaces = surfaces;
        volume.polygons = polygons;
        let pruned = self.prune_orphans(&involved);

        log::debug!(
            "fused {} volumes into {} ({} orphaned entities removed)",
            operands.len(),
            keep,
            pruned
        );
        Ok(vec![keep])
    }

    /// Cuts every tool out of every object and removes the tools.
    ///
    /// Returns the objects that still enclose something.
    pub fn cut(&mut self, objects: &[DimTag], tools: &[DimTag]) -> ModelResult<Vec<DimTag>> {
        self.expect_volumes(objects)?;
        self.expect_volumes(tools)?;
        let objects: Vec<DimTag> = objects.iter().filter(|o| !tools.contains(o)).copied().collect();

        let mut operands = objects.clone();
        operands.extend_from_slice(tools);
        let involved = self.closure(&operands)?;

        let mut tool_solids = Vec::with_capacity(tools.len());
        for tool in tools {
            let volume = self.volume(tool.tag)?;
            tool_solids.push((volume.surfaces.clone(), volume.polygons.clone()));
        }

        let mut survivors = Vec::with_capacity(objects.len());
        for &object in &objects {
            let volume = self.volume(object.tag)?;
            let mut candidates = volume.surfaces.clone();
            let mut polygons = volume.polygons.clone();
            for (surfaces, solid) in &tool_solids {
                polygons = bsp::subtract(polygons, solid.clone());
                candidates.extend(surfaces.iter().copied());
            }
            let surfaces = surviving_surfaces(candidates, &polygons);

            if polygons.is_empty() {
                log::warn!("cut removed all of {object}");
                self.delete(object);
                continue;
            }
            if let Some(volume) = self.volumes.get_mut(&object.tag) {
                volume.surfaces = surfaces;
                volume.polygons = polygons;
            }
            survivors.push(object);
        }

        for tool in tools {
            self.delete(*tool);
        }
        let pruned = self.prune_orphans(&involved);

        log::debug!(
            "cut {} tools from {} objects ({} orphaned entities removed)",
            tools.len(),
            objects.len(),
            pruned
        );
        Ok(survivors)
    }
}
