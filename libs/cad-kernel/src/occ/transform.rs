//! # Transforms
//!
//! Copy, rigid motions and removal.
//!
//! Transforms act on the downward closure of their inputs, touching each
//! entity exactly once even when several inputs share boundaries.

use crate::entity::{Dim, DimTag, Tag};
use crate::error::ModelError;
use crate::geometry::frame::rotate_about;
use crate::geometry::Polygon;
use crate::model::{Model, ModelResult};
use crate::topology::{Curve, OrientedCurve, Surface, Volume};
use glam::DVec3;
use std::collections::BTreeMap;

fn mapped_polygons(polygons: &[Polygon], f: &impl Fn(DVec3) -> DVec3) -> Vec<Polygon> {
    polygons.iter().filter_map(|p| p.map(f)).collect()
}

impl Model {
    /// Duplicates entities with all their boundaries.
    ///
    /// Returns the copies of `entities`, in order.
    pub fn copy(&mut self, entities: &[DimTag]) -> ModelResult<Vec<DimTag>> {
        let closure = self.closure(entities)?;
        let mut map: [BTreeMap<Tag, Tag>; 4] = Default::default();

        // The closure is ordered by dimension, so boundaries are copied first.
        for entity in &closure {
            let copy = match entity.dim {
                Dim::Point => {
                    let position = self.point_position(entity.tag)?;
                    self.insert_point(position)
                }
                Dim::Curve => {
                    let curve = self.curve(entity.tag)?;
                    let points = &map[Dim::Point.index()];
                    let copy = Curve {
                        kind: curve.kind,
                        start: points[&curve.start],
                        end: points[&curve.end],
                        samples: curve.samples.clone(),
                    };
                    self.insert_curve(copy)
                }
                Dim::Surface => {
                    let surface = self.surface(entity.tag)?.clone();
                    let curves = &map[Dim::Curve.index()];
                    let outline = surface
                        .outline
                        .iter()
                        .map(|c| OrientedCurve {
                            tag: curves[&c.tag],
                            reversed: c.reversed,
                        })
                        .collect();
                    let tag = self.reserve_surface();
                    let patch = surface
                        .patch
                        .into_iter()
                        .map(|mut p| {
                            p.set_face(tag);
                            p
                        })
                        .collect();
                    self.insert_surface_with_tag(
                        tag,
                        Surface {
                            kind: surface.kind,
                            outline,
                            patch,
                        },
                    );
                    tag
                }
                Dim::Volume => {
                    let volume = self.volume(entity.tag)?;
                    let surfaces = &map[Dim::Surface.index()];
                    let copy = Volume {
                        surfaces: volume.surfaces.iter().map(|s| surfaces[s]).collect(),
                        polygons: volume
                            .polygons
                            .iter()
                            .map(|p| {
                                let mut p = p.clone();
                                p.set_face(surfaces[&p.face()]);
                                p
                            })
                            .collect(),
                    };
                    self.insert_volume(copy)
                }
            };
            map[entity.dim.index()].insert(entity.tag, copy);
        }

        let copies: Vec<DimTag> = entities
            .iter()
            .map(|e| DimTag::new(e.dim, map[e.dim.index()][&e.tag]))
            .collect();
        log::debug!("copied {} entities ({} with boundaries)", entities.len(), closure.len());
        Ok(copies)
    }

    /// Applies a point map to the entities and their boundaries.
    fn transform(&mut self, entities: &[DimTag], f: impl Fn(DVec3) -> DVec3) -> ModelResult<()> {
        let closure = self.closure(entities)?;
        for entity in &closure {
            match entity.dim {
                Dim::Point => {
                    if let Some(point) = self.points.get_mut(&entity.tag) {
                        point.position = f(point.position);
                    }
                }
                Dim::Curve => {
                    if let Some(curve) = self.curves.get_mut(&entity.tag) {
                        for sample in &mut curve.samples {
                            *sample = f(*sample);
                        }
                    }
                }
                Dim::Surface => {
                    if let Some(surface) = self.surfaces.get_mut(&entity.tag) {
                        surface.patch = mapped_polygons(&surface.patch, &f);
                    }
                }
                Dim::Volume => {
                    if let Some(volume) = self.volumes.get_mut(&entity.tag) {
                        volume.polygons = mapped_polygons(&volume.polygons, &f);
                    }
                }
            }
        }
        Ok(())
    }

    /// Translates entities by `vector`.
    pub fn translate(&mut self, entities: &[DimTag], vector: DVec3) -> ModelResult<()> {
        self.transform(entities, |p| p + vector)?;
        log::debug!("translated {} entities by {vector}", entities.len());
        Ok(())
    }

    /// Rotates entities by `angle` radians about the axis through `point`.
    pub fn rotate(&mut self, entities: &[DimTag], point: DVec3, axis: DVec3, angle: f64) -> ModelResult<()> {
        if axis.try_normalize().is_none() {
            return Err(ModelError::degenerate("rotation about a zero-length axis"));
        }
        self.transform(entities, |p| rotate_about(p, point, axis, angle).unwrap_or(p))?;
        log::debug!("rotated {} entities by {angle} rad about {axis}", entities.len());
        Ok(())
    }

    /// Removes entities that no higher-dimensional entity still uses.
    ///
    /// With `recursive`, boundaries left unused are removed too. Unknown
    /// entities are skipped.
    pub fn remove(&mut self, entities: &[DimTag], recursive: bool) -> ModelResult<()> {
        let mut ordered: Vec<DimTag> = entities.iter().filter(|e| self.contains(**e)).copied().collect();
        ordered.sort_by(|a, b| b.dim.cmp(&a.dim).then(a.tag.cmp(&b.tag)));
        ordered.dedup();

        let candidates = if recursive {
            self.closure(&ordered)?
        } else {
            Default::default()
        };

        let mut removed = 0;
        for entity in &ordered {
            if self.upward(*entity).is_empty() && self.delete(*entity) {
                removed += 1;
            } else {
                log::debug!("kept {entity}: still bounds another entity");
            }
        }
        removed += self.prune_orphans(&candidates);

        log::debug!("removed {removed} entities");
        Ok(())
    }
}
