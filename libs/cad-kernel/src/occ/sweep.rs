//! # Sweeps
//!
//! Linear extrusion and revolution of surfaces into volumes.
//!
//! Both return, per input surface, `[top surface, volume, lateral
//! surfaces...]`. A full-turn revolution has no caps and returns
//! `[volume, lateral surfaces...]`.
//!
//! ## Lateral orientation
//!
//! The profile's outline is walked in loop order. When the sweep moves
//! along the outline's normal, each lateral quad is `[a, b, b', a']`;
//! otherwise `[a, a', b', b]`. Both give outward-facing walls.

use crate::entity::{Dim, DimTag, Tag};
use crate::error::ModelError;
use crate::geometry::frame::{arc_segments, is_full_turn};
use crate::geometry::{Plane, Polygon};
use crate::model::{Model, ModelResult};
use crate::topology::{Curve, CurveKind, OrientedCurve, Surface, SurfaceKind, Volume};
use config::constants::PLANE_EPSILON;
use glam::{DQuat, DVec3};
use std::collections::BTreeMap;

/// Curves of an outline used once, in loop order. Seams (used in both
/// directions) sweep onto themselves and are skipped.
fn sweepable(outline: &[OrientedCurve]) -> Vec<OrientedCurve> {
    outline
        .iter()
        .filter(|c| outline.iter().filter(|o| o.tag == c.tag).count() == 1)
        .copied()
        .collect()
}

/// Sum of area-weighted polygon normals.
fn patch_normal(patch: &[Polygon]) -> DVec3 {
    patch
        .iter()
        .flat_map(|p| p.triangles().collect::<Vec<_>>())
        .map(|[a, b, c]| (b - a).cross(c - a))
        .sum()
}

fn oriented(patch: Vec<Polygon>, towards: DVec3, face: Tag) -> Vec<Polygon> {
    let flip = patch_normal(&patch).dot(towards) < 0.0;
    patch
        .into_iter()
        .map(|mut p| {
            p.set_face(face);
            if flip {
                p.flip();
            }
            p
        })
        .collect()
}

/// Wall between a curve and its swept copy, as rings of (a, b, b', a').
fn wall_rings(start: &[DVec3], end: &[DVec3], along: bool) -> Vec<Vec<DVec3>> {
    (0..start.len().saturating_sub(1))
        .map(|k| {
            let (a, b, a2, b2) = (start[k], start[k + 1], end[k], end[k + 1]);
            if along {
                vec![a, b, b2, a2]
            } else {
                vec![a, a2, b2, b]
            }
        })
        .collect()
}

impl Model {
    fn sweep_profile(&self, entity: DimTag) -> ModelResult<(Surface, DVec3)> {
        if entity.dim != Dim::Surface {
            return Err(ModelError::unsupported(format!("sweeping {entity}; only surfaces sweep into volumes")));
        }
        let surface = self.surface(entity.tag)?.clone();
        if surface.outline.is_empty() {
            return Err(ModelError::degenerate(format!("{entity} has no outline")));
        }
        let outline = self.loop_outline(&surface.outline)?;
        let normal = Plane::from_polygon(&outline)
            .map(|plane| plane.normal())
            .unwrap_or_else(|| patch_normal(&surface.patch).normalize_or_zero());
        Ok((surface, normal))
    }

    // =========================================================================
    // EXTRUDE
    // =========================================================================

    /// Extrudes surfaces along `vector`.
    ///
    /// The input surface becomes the bottom of the new volume.
    pub fn extrude(&mut self, entities: &[DimTag], vector: DVec3) -> ModelResult<Vec<DimTag>> {
        if !vector.is_finite() || vector.length() < PLANE_EPSILON {
            return Err(ModelError::degenerate(format!("extrusion vector {vector}")));
        }
        let mut result = Vec::new();
        for &entity in entities {
            result.extend(self.extrude_surface(entity, vector)?);
        }
        Ok(result)
    }

    fn extrude_surface(&mut self, entity: DimTag, d: DVec3) -> ModelResult<Vec<DimTag>> {
        let (profile, normal) = self.sweep_profile(entity)?;
        let along = normal.dot(d) > 0.0;

        // Translated points and the lines joining them to their originals.
        let mut moved: BTreeMap<Tag, Tag> = BTreeMap::new();
        let mut joins: BTreeMap<Tag, Tag> = BTreeMap::new();
        for curve in profile.curves() {
            for point in self.curve(curve)?.points() {
                if moved.contains_key(&point) {
                    continue;
                }
                let at = self.point_position(point)?;
                let copy = self.insert_point(at + d);
                moved.insert(point, copy);
                joins.insert(point, self.add_line(point, copy)?);
            }
        }

        let mut curve_map: BTreeMap<Tag, Tag> = BTreeMap::new();
        for tag in profile.curves() {
            let curve = self.curve(tag)?.clone();
            let copy = self.insert_curve(Curve {
                kind: curve.kind,
                start: moved[&curve.start],
                end: moved[&curve.end],
                samples: curve.samples.iter().map(|p| *p + d).collect(),
            });
            curve_map.insert(tag, copy);
        }

        let top = self.reserve_surface();
        let mut laterals = Vec::new();
        let mut lateral_polygons = Vec::new();
        for oriented in sweepable(&profile.outline) {
            let curve = self.curve(oriented.tag)?.clone();
            let samples = curve.oriented_samples(oriented.reversed);
            let shifted: Vec<DVec3> = samples.iter().map(|p| *p + d).collect();

            let lateral = self.reserve_surface();
            let patch: Vec<Polygon> = wall_rings(&samples, &shifted, along)
                .into_iter()
                .filter_map(|ring| Polygon::new(ring, lateral))
                .collect();
            lateral_polygons.extend(patch.iter().cloned());
            self.insert_surface_with_tag(
                lateral,
                Surface {
                    kind: if curve.kind == CurveKind::Line { SurfaceKind::Plane } else { SurfaceKind::Ruled },
                    outline: vec![
                        OrientedCurve::forward(oriented.tag),
                        OrientedCurve::forward(joins[&curve.end]),
                        OrientedCurve::backward(curve_map[&oriented.tag]),
                        OrientedCurve::backward(joins[&curve.start]),
                    ],
                    patch,
                },
            );
            laterals.push(lateral);
        }

        let top_patch = oriented(
            profile.patch.iter().filter_map(|p| p.map(|v| v + d)).collect(),
            d,
            top,
        );
        self.insert_surface_with_tag(
            top,
            Surface {
                kind: profile.kind,
                outline: profile
                    .outline
                    .iter()
                    .map(|c| OrientedCurve {
                        tag: curve_map[&c.tag],
                        reversed: c.reversed,
                    })
                    .collect(),
                patch: top_patch.clone(),
            },
        );

        let mut polygons = oriented(profile.patch.clone(), -d, entity.tag);
        polygons.extend(top_patch);
        polygons.extend(lateral_polygons);
        let mut surfaces = vec![entity.tag, top];
        surfaces.extend(&laterals);
        let volume = self.insert_volume(Volume { surfaces, polygons });
        log::debug!("extruded {entity} along {d} into volume {volume}");

        let mut result = vec![DimTag::surface(top), DimTag::volume(volume)];
        result.extend(laterals.into_iter().map(DimTag::surface));
        Ok(result)
    }

    // =========================================================================
    // REVOLVE
    // =========================================================================

    /// Revolves surfaces by `angle` radians about the axis through `point`.
    pub fn revolve(&mut self, entities: &[DimTag], point: DVec3, axis: DVec3, angle: f64) -> ModelResult<Vec<DimTag>> {
        let axis = axis
            .try_normalize()
            .ok_or_else(|| ModelError::degenerate("revolution about a zero-length axis"))?;
        if !angle.is_finite() || angle.abs() < PLANE_EPSILON {
            return Err(ModelError::degenerate(format!("revolution angle {angle}")));
        }
        let mut result = Vec::new();
        for &entity in entities {
            result.extend(self.revolve_surface(entity, point, axis, angle)?);
        }
        Ok(result)
    }

    fn revolve_surface(&mut self, entity: DimTag, q: DVec3, k: DVec3, angle: f64) -> ModelResult<Vec<DimTag>> {
        let (profile, normal) = self.sweep_profile(entity)?;
        let full = is_full_turn(angle);
        let steps = arc_segments(angle);
        let rotations: Vec<DQuat> = (0..=steps)
            .map(|i| DQuat::from_axis_angle(k, angle * i as f64 / steps as f64))
            .collect();
        let rotate = |p: DVec3, i: usize| q + rotations[i] * (p - q);
        let on_axis = |p: DVec3| (p - q).cross(k).length() < PLANE_EPSILON;

        let outline_points = self.loop_outline(&profile.outline)?;
        let center = outline_points.iter().copied().sum::<DVec3>() / outline_points.len().max(1) as f64;
        let tangent = k.cross(center - q) * angle.signum();
        let along = normal.dot(tangent) > 0.0;

        // End positions of profile points and the curves they trace.
        let mut moved: BTreeMap<Tag, Tag> = BTreeMap::new();
        let mut traces: BTreeMap<Tag, Tag> = BTreeMap::new();
        for curve in profile.curves() {
            for point in self.curve(curve)?.points() {
                if moved.contains_key(&point) {
                    continue;
                }
                let at = self.point_position(point)?;
                if on_axis(at) {
                    moved.insert(point, point);
                    continue;
                }
                let end = if full { point } else { self.insert_point(rotate(at, steps)) };
                let mut samples: Vec<DVec3> = (0..=steps).map(|i| rotate(at, i)).collect();
                if full {
                    samples[steps] = at;
                }
                let kind = if full { CurveKind::Circle } else { CurveKind::Arc };
                let trace = self.insert_curve(Curve {
                    kind,
                    start: point,
                    end,
                    samples,
                });
                moved.insert(point, end);
                traces.insert(point, trace);
            }
        }

        let mut curve_map: BTreeMap<Tag, Tag> = BTreeMap::new();
        for tag in profile.curves() {
            let curve = self.curve(tag)?.clone();
            let fixed = curve.samples.iter().all(|p| on_axis(*p));
            let copy = if full || fixed {
                tag
            } else {
                self.insert_curve(Curve {
                    kind: curve.kind,
                    start: moved[&curve.start],
                    end: moved[&curve.end],
                    samples: curve.samples.iter().map(|p| rotate(*p, steps)).collect(),
                })
            };
            curve_map.insert(tag, copy);
        }

        let end_cap = if full { None } else { Some(self.reserve_surface()) };

        let mut laterals = Vec::new();
        let mut polygons = Vec::new();
        for oriented in sweepable(&profile.outline) {
            let curve = self.curve(oriented.tag)?.clone();
            if curve.samples.iter().all(|p| on_axis(*p)) {
                continue;
            }
            let samples = curve.oriented_samples(oriented.reversed);
            let lateral = self.reserve_surface();
            let mut patch = Vec::new();
            for i in 0..steps {
                let start: Vec<DVec3> = samples.iter().map(|p| rotate(*p, i)).collect();
                let end: Vec<DVec3> = samples.iter().map(|p| rotate(*p, i + 1)).collect();
                patch.extend(
                    wall_rings(&start, &end, along)
                        .into_iter()
                        .filter_map(|ring| Polygon::new(ring, lateral)),
                );
            }
            polygons.extend(patch.iter().cloned());

            let mut outline = vec![OrientedCurve::forward(oriented.tag)];
            if let Some(&trace) = traces.get(&curve.end) {
                outline.push(OrientedCurve::forward(trace));
            }
            outline.push(OrientedCurve::backward(curve_map[&oriented.tag]));
            if let Some(&trace) = traces.get(&curve.start) {
                outline.push(OrientedCurve::backward(trace));
            }
            self.insert_surface_with_tag(
                lateral,
                Surface {
                    kind: revolved_kind(&curve, k),
                    outline,
                    patch,
                },
            );
            laterals.push(lateral);
        }

        let mut surfaces = Vec::new();
        if let Some(end_cap) = end_cap {
            let end_patch = oriented(
                profile
                    .patch
                    .iter()
                    .filter_map(|p| p.map(|v| rotate(v, steps)))
                    .collect(),
                rotations[steps] * tangent,
                end_cap,
            );
            polygons.extend(oriented(profile.patch.clone(), -tangent, entity.tag));
            polygons.extend(end_patch.iter().cloned());
            self.insert_surface_with_tag(
                end_cap,
                Surface {
                    kind: profile.kind,
                    outline: profile
                        .outline
                        .iter()
                        .map(|c| OrientedCurve {
                            tag: curve_map[&c.tag],
                            reversed: c.reversed,
                        })
                        .collect(),
                    patch: end_patch,
                },
            );
            surfaces.push(entity.tag);
            surfaces.push(end_cap);
        }
        surfaces.extend(&laterals);

        let volume = self.insert_volume(Volume { surfaces, polygons });
        log::debug!("revolved {entity} by {angle} rad into volume {volume}");

        let mut result = Vec::new();
        if let Some(end_cap) = end_cap {
            result.push(DimTag::surface(end_cap));
        }
        result.push(DimTag::volume(volume));
        result.extend(laterals.into_iter().map(DimTag::surface));
        Ok(result)
    }
}

/// Kind of surface a curve sweeps when revolved about `axis`.
fn revolved_kind(curve: &Curve, axis: DVec3) -> SurfaceKind {
    if curve.kind != CurveKind::Line {
        return SurfaceKind::Revolution;
    }
    let direction = match (curve.samples.first(), curve.samples.last()) {
        (Some(a), Some(b)) => (*b - *a).normalize_or_zero(),
        _ => return SurfaceKind::Revolution,
    };
    let cos = direction.dot(axis).abs();
    if cos < PLANE_EPSILON {
        SurfaceKind::Plane
    } else if cos > 1.0 - PLANE_EPSILON {
        SurfaceKind::Cylinder
    } else {
        SurfaceKind::Cone
    }
}
