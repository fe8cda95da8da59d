//! # Model
//!
//! The modelling session: entity storage, tag allocation, topology queries
//! and mesh-size directives.
//!
//! A [`Model`] is an explicit handle; every operation takes it by reference
//! and nothing is shared between models. Construction operations live in
//! [`crate::occ`], physical groups in [`groups`].
//!
//! ## Tags
//!
//! Tags are allocated per dimension starting at 1 and are never reused, even
//! after an entity is removed. Construction loops have their own tag spaces.

pub mod groups;

#[cfg(test)]
mod tests;

use crate::entity::{Dim, DimTag, Tag};
use crate::error::ModelError;
use crate::geometry::Aabb;
use crate::topology::{Curve, CurveLoop, Point, Surface, SurfaceLoop, Volume};
use glam::DVec3;
use groups::GroupRecord;
use std::collections::{BTreeMap, BTreeSet};

pub use crate::entity::PhysicalGroup;

/// Result type for model operations.
pub type ModelResult<T> = Result<T, ModelError>;

/// Entities adjacent to an entity, one dimension up and one down.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Adjacency {
    /// Live entities of dimension + 1 bounded by the entity.
    pub upward: Vec<Tag>,
    /// Entities of dimension - 1 bounding the entity.
    pub downward: Vec<Tag>,
}

/// A geometric model under construction.
#[derive(Debug, Clone)]
pub struct Model {
    pub(crate) points: BTreeMap<Tag, Point>,
    pub(crate) curves: BTreeMap<Tag, Curve>,
    pub(crate) surfaces: BTreeMap<Tag, Surface>,
    pub(crate) volumes: BTreeMap<Tag, Volume>,
    pub(crate) curve_loops: BTreeMap<Tag, CurveLoop>,
    pub(crate) surface_loops: BTreeMap<Tag, SurfaceLoop>,
    pub(crate) groups: BTreeMap<PhysicalGroup, GroupRecord>,
    next_tag: [Tag; 4],
    next_group: [Tag; 4],
    next_curve_loop: Tag,
    next_surface_loop: Tag,
    sizes: BTreeMap<Tag, f64>,
}

impl Default for Model {
    fn default() -> Self {
        Self::new()
    }
}

impl Model {
    /// Creates an empty model.
    pub fn new() -> Self {
        Self {
            points: BTreeMap::new(),
            curves: BTreeMap::new(),
            surfaces: BTreeMap::new(),
            volumes: BTreeMap::new(),
            curve_loops: BTreeMap::new(),
            surface_loops: BTreeMap::new(),
            groups: BTreeMap::new(),
            next_tag: [1; 4],
            next_group: [1; 4],
            next_curve_loop: 1,
            next_surface_loop: 1,
            sizes: BTreeMap::new(),
        }
    }

    // =========================================================================
    // STORAGE
    // =========================================================================

    fn allocate(&mut self, dim: Dim) -> Tag {
        let tag = self.next_tag[dim.index()];
        self.next_tag[dim.index()] += 1;
        tag
    }

    pub(crate) fn allocate_group(&mut self, dim: Dim) -> Tag {
        let tag = self.next_group[dim.index()];
        self.next_group[dim.index()] += 1;
        tag
    }

    pub(crate) fn insert_point(&mut self, position: DVec3) -> Tag {
        let tag = self.allocate(Dim::Point);
        self.points.insert(tag, Point { position });
        tag
    }

    pub(crate) fn insert_curve(&mut self, curve: Curve) -> Tag {
        let tag = self.allocate(Dim::Curve);
        self.curves.insert(tag, curve);
        tag
    }

    pub(crate) fn insert_surface(&mut self, surface: Surface) -> Tag {
        let tag = self.allocate(Dim::Surface);
        self.surfaces.insert(tag, surface);
        tag
    }

    /// Reserves a surface tag before its polygons exist.
    pub(crate) fn reserve_surface(&mut self) -> Tag {
        self.allocate(Dim::Surface)
    }

    pub(crate) fn insert_surface_with_tag(&mut self, tag: Tag, surface: Surface) {
        self.surfaces.insert(tag, surface);
    }

    pub(crate) fn insert_volume(&mut self, volume: Volume) -> Tag {
        let tag = self.allocate(Dim::Volume);
        self.volumes.insert(tag, volume);
        tag
    }

    pub(crate) fn insert_curve_loop(&mut self, curve_loop: CurveLoop) -> Tag {
        let tag = self.next_curve_loop;
        self.next_curve_loop += 1;
        self.curve_loops.insert(tag, curve_loop);
        tag
    }

    pub(crate) fn insert_surface_loop(&mut self, surface_loop: SurfaceLoop) -> Tag {
        let tag = self.next_surface_loop;
        self.next_surface_loop += 1;
        self.surface_loops.insert(tag, surface_loop);
        tag
    }

    /// Deletes an entity record. Returns whether it existed.
    pub(crate) fn delete(&mut self, entity: DimTag) -> bool {
        match entity.dim {
            Dim::Point => self.points.remove(&entity.tag).is_some(),
            Dim::Curve => self.curves.remove(&entity.tag).is_some(),
            Dim::Surface => self.surfaces.remove(&entity.tag).is_some(),
            Dim::Volume => self.volumes.remove(&entity.tag).is_some(),
        }
    }

    // =========================================================================
    // ACCESSORS
    // =========================================================================

    /// Whether the entity exists.
    pub fn contains(&self, entity: DimTag) -> bool {
        match entity.dim {
            Dim::Point => self.points.contains_key(&entity.tag),
            Dim::Curve => self.curves.contains_key(&entity.tag),
            Dim::Surface => self.surfaces.contains_key(&entity.tag),
            Dim::Volume => self.volumes.contains_key(&entity.tag),
        }
    }

    pub fn point(&self, tag: Tag) -> ModelResult<&Point> {
        self.points
            .get(&tag)
            .ok_or_else(|| ModelError::unknown(DimTag::point(tag)))
    }

    pub fn curve(&self, tag: Tag) -> ModelResult<&Curve> {
        self.curves
            .get(&tag)
            .ok_or_else(|| ModelError::unknown(DimTag::curve(tag)))
    }

    pub fn surface(&self, tag: Tag) -> ModelResult<&Surface> {
        self.surfaces
            .get(&tag)
            .ok_or_else(|| ModelError::unknown(DimTag::surface(tag)))
    }

    pub fn volume(&self, tag: Tag) -> ModelResult<&Volume> {
        self.volumes
            .get(&tag)
            .ok_or_else(|| ModelError::unknown(DimTag::volume(tag)))
    }

    pub(crate) fn curve_loop(&self, tag: Tag) -> ModelResult<&CurveLoop> {
        self.curve_loops
            .get(&tag)
            .ok_or(ModelError::UnknownLoop { kind: "curve", tag })
    }

    pub(crate) fn surface_loop(&self, tag: Tag) -> ModelResult<&SurfaceLoop> {
        self.surface_loops
            .get(&tag)
            .ok_or(ModelError::UnknownLoop { kind: "surface", tag })
    }

    /// Ensures `entity` exists and has dimension `dim`.
    pub(crate) fn expect_dim(&self, entity: DimTag, dim: Dim) -> ModelResult<()> {
        if entity.dim != dim {
            return Err(ModelError::wrong_dimension(entity, dim));
        }
        if !self.contains(entity) {
            return Err(ModelError::unknown(entity));
        }
        Ok(())
    }

    // =========================================================================
    // QUERIES
    // =========================================================================

    /// Live entities of one dimension, or of all dimensions in ascending
    /// order.
    pub fn entities(&self, dim: Option<Dim>) -> Vec<DimTag> {
        let dims: &[Dim] = match dim {
            Some(ref dim) => std::slice::from_ref(dim),
            None => &Dim::ALL,
        };
        dims.iter()
            .flat_map(|&dim| self.tags(dim).into_iter().map(move |tag| DimTag::new(dim, tag)))
            .collect()
    }

    fn tags(&self, dim: Dim) -> Vec<Tag> {
        match dim {
            Dim::Point => self.points.keys().copied().collect(),
            Dim::Curve => self.curves.keys().copied().collect(),
            Dim::Surface => self.surfaces.keys().copied().collect(),
            Dim::Volume => self.volumes.keys().copied().collect(),
        }
    }

    /// Entities of dimension - 1 bounding `entity`.
    pub fn downward(&self, entity: DimTag) -> ModelResult<Vec<Tag>> {
        Ok(match entity.dim {
            Dim::Point => {
                self.point(entity.tag)?;
                Vec::new()
            }
            Dim::Curve => self.curve(entity.tag)?.points(),
            Dim::Surface => self.surface(entity.tag)?.curves(),
            Dim::Volume => self.volume(entity.tag)?.surfaces.clone(),
        })
    }

    /// Live entities of dimension + 1 bounded by `entity`.
    pub fn upward(&self, entity: DimTag) -> Vec<Tag> {
        match entity.dim {
            Dim::Point => self
                .curves
                .iter()
                .filter(|(_, curve)| curve.start == entity.tag || curve.end == entity.tag)
                .map(|(tag, _)| *tag)
                .collect(),
            Dim::Curve => self
                .surfaces
                .iter()
                .filter(|(_, surface)| surface.outline.iter().any(|c| c.tag == entity.tag))
                .map(|(tag, _)| *tag)
                .collect(),
            Dim::Surface => self
                .volumes
                .iter()
                .filter(|(_, volume)| volume.surfaces.contains(&entity.tag))
                .map(|(tag, _)| *tag)
                .collect(),
            Dim::Volume => Vec::new(),
        }
    }

    /// Upward and downward adjacencies of an entity.
    ///
    /// # Example
    ///
    /// ```rust
    /// use cad_kernel::{DimTag, Model};
    /// use glam::DVec3;
    ///
    /// let mut model = Model::new();
    /// let cylinder = model.add_cylinder(DVec3::ZERO, DVec3::Z, 1.0, None).unwrap();
    /// let faces = model.adjacencies(DimTag::volume(cylinder)).unwrap().downward;
    /// assert_eq!(faces.len(), 3);
    /// ```
    pub fn adjacencies(&self, entity: DimTag) -> ModelResult<Adjacency> {
        let downward = self.downward(entity)?;
        Ok(Adjacency {
            upward: self.upward(entity),
            downward,
        })
    }

    /// Boundary of a set of entities.
    ///
    /// Non-recursive: the distinct entities one dimension down. Recursive:
    /// the distinct points reached through the full downward closure. Both
    /// keep first-encounter order.
    pub fn boundary(&self, entities: &[DimTag], recursive: bool) -> ModelResult<Vec<DimTag>> {
        let mut seen = BTreeSet::new();
        let mut result = Vec::new();
        for &entity in entities {
            if recursive {
                let mut frontier = vec![entity];
                while let Some(current) = frontier.pop() {
                    match current.dim.lower() {
                        None => {
                            if seen.insert(current) {
                                result.push(current);
                            }
                        }
                        Some(lower) => {
                            let children = self.downward(current)?;
                            frontier.extend(children.into_iter().rev().map(|tag| DimTag::new(lower, tag)));
                        }
                    }
                }
            } else if let Some(lower) = entity.dim.lower() {
                for tag in self.downward(entity)? {
                    let child = DimTag::new(lower, tag);
                    if seen.insert(child) {
                        result.push(child);
                    }
                }
            }
        }
        Ok(result)
    }

    /// Downward closure of a set of entities, including the entities
    /// themselves.
    pub fn closure(&self, entities: &[DimTag]) -> ModelResult<BTreeSet<DimTag>> {
        let mut closure = BTreeSet::new();
        let mut frontier: Vec<DimTag> = entities.to_vec();
        while let Some(entity) = frontier.pop() {
            if !closure.insert(entity) {
                continue;
            }
            if let Some(lower) = entity.dim.lower() {
                frontier.extend(self.downward(entity)?.into_iter().map(|tag| DimTag::new(lower, tag)));
            }
        }
        Ok(closure)
    }

    /// Points reached by walking a surface's curves, ascending.
    pub fn surface_points(&self, surface: Tag) -> ModelResult<Vec<Tag>> {
        let mut points = BTreeSet::new();
        for curve in self.surface(surface)?.curves() {
            points.extend(self.curve(curve)?.points());
        }
        Ok(points.into_iter().collect())
    }

    /// Coordinates of a point.
    pub fn point_position(&self, tag: Tag) -> ModelResult<DVec3> {
        Ok(self.point(tag)?.position)
    }

    /// Bounds of one entity's geometry.
    pub fn entity_bounds(&self, entity: DimTag) -> ModelResult<Aabb> {
        Ok(match entity.dim {
            Dim::Point => Aabb::from_points([self.point(entity.tag)?.position]),
            Dim::Curve => Aabb::from_points(self.curve(entity.tag)?.samples.iter().copied()),
            Dim::Surface => Aabb::from_polygons(&self.surface(entity.tag)?.patch),
            Dim::Volume => Aabb::from_polygons(&self.volume(entity.tag)?.polygons),
        })
    }

    /// Bounds of every live entity.
    pub fn bounding_box(&self) -> Aabb {
        let points = Aabb::from_points(self.points.values().map(|p| p.position));
        let patches = self
            .surfaces
            .values()
            .fold(Aabb::EMPTY, |b, s| b.union(Aabb::from_polygons(&s.patch)));
        let solids = self
            .volumes
            .values()
            .fold(Aabb::EMPTY, |b, v| b.union(Aabb::from_polygons(&v.polygons)));
        points.union(patches).union(solids)
    }

    // =========================================================================
    // MESH SIZES
    // =========================================================================

    /// Sets the target mesh size at points; the last call for a point wins.
    ///
    /// All entities must be live points; nothing is written if any is not.
    pub fn set_size(&mut self, entities: &[DimTag], size: f64) -> ModelResult<()> {
        if !size.is_finite() || size <= 0.0 {
            return Err(ModelError::InvalidSize { size });
        }
        for &entity in entities {
            self.expect_dim(entity, Dim::Point)?;
        }
        for entity in entities {
            self.sizes.insert(entity.tag, size);
        }
        log::debug!("set mesh size {} on {} points", size, entities.len());
        Ok(())
    }

    /// Target mesh size at a point, if one was set.
    pub fn size_of(&self, point: Tag) -> Option<f64> {
        self.sizes.get(&point).copied()
    }

    /// Mesh size directives of live points, ascending by tag.
    pub fn sizes(&self) -> impl Iterator<Item = (Tag, f64)> + '_ {
        self.sizes
            .iter()
            .filter(|(tag, _)| self.points.contains_key(tag))
            .map(|(tag, size)| (*tag, *size))
    }

    // =========================================================================
    // PRUNING
    // =========================================================================

    /// Removes candidate surfaces, curves and points no longer bounding any
    /// live entity, highest dimension first.
    pub(crate) fn prune_orphans(&mut self, candidates: &BTreeSet<DimTag>) -> usize {
        let mut removed = 0;
        for dim in [Dim::Surface, Dim::Curve, Dim::Point] {
            for entity in candidates.iter().filter(|e| e.dim == dim) {
                if self.contains(*entity) && self.upward(*entity).is_empty() && self.delete(*entity) {
                    removed += 1;
                }
            }
        }
        removed
    }
}
