//! # Primitive Solids
//!
//! Boxes, cylinders, cones and spheres with OpenCASCADE topology.
//!
//! | primitive | points | curves | surfaces (order) |
//! |---|---|---|---|
//! | box | 8 | 12 | xmin, xmax, ymin, ymax, zmin, zmax |
//! | cylinder / frustum | 2 | bottom circle, top circle, seam | lateral, top, bottom |
//! | cone with apex | 2 | circle, seam | lateral, base |
//! | cylinder sector | 6 | 9 | lateral, top, bottom, start side, end side |
//! | sphere | 2 | seam | sphere |
//!
//! A full circle is a closed curve on a single seam point, which is why a
//! cylinder has only two points.

use crate::entity::Tag;
use crate::error::ModelError;
use crate::geometry::frame::{arc_segments, is_full_turn};
use crate::geometry::{Frame, Polygon};
use crate::model::{Model, ModelResult};
use crate::topology::{Curve, CurveKind, OrientedCurve, Surface, SurfaceKind, Volume};
use config::constants::{CIRCLE_SEGMENTS, EPSILON, SPHERE_RINGS};
use glam::DVec3;
use std::f64::consts::{FRAC_PI_2, PI, TAU};

// =============================================================================
// CONSTANTS
// =============================================================================

/// Box corner rings per face, outward winding. Corner `i` has bit 0 set for
/// max x, bit 1 for max y and bit 2 for max z.
const BOX_FACES: [[usize; 4]; 6] = [
    [0, 4, 6, 2],
    [1, 3, 7, 5],
    [0, 1, 5, 4],
    [2, 6, 7, 3],
    [0, 2, 3, 1],
    [4, 5, 7, 6],
];

/// Box edges as corner pairs: four along x, four along y, four along z.
const BOX_EDGES: [(usize, usize); 12] = [
    (0, 1),
    (2, 3),
    (4, 5),
    (6, 7),
    (0, 2),
    (1, 3),
    (4, 6),
    (5, 7),
    (0, 4),
    (1, 5),
    (2, 6),
    (3, 7),
];

/// A point entity together with its position.
#[derive(Debug, Clone, Copy)]
struct Corner {
    tag: Tag,
    at: DVec3,
}

impl Model {
    fn corner(&mut self, at: DVec3) -> Corner {
        Corner {
            tag: self.insert_point(at),
            at,
        }
    }

    fn line_curve(&mut self, start: Corner, end: Corner) -> Tag {
        self.insert_curve(Curve {
            kind: CurveKind::Line,
            start: start.tag,
            end: end.tag,
            samples: vec![start.at, end.at],
        })
    }

    fn sampled_curve(&mut self, kind: CurveKind, start: Tag, end: Tag, samples: Vec<DVec3>) -> Tag {
        self.insert_curve(Curve {
            kind,
            start,
            end,
            samples,
        })
    }

    fn patch_surface(&mut self, tag: Tag, kind: SurfaceKind, outline: Vec<OrientedCurve>, rings: Vec<Vec<DVec3>>) {
        let patch = rings.into_iter().filter_map(|ring| Polygon::new(ring, tag)).collect();
        self.insert_surface_with_tag(tag, Surface { kind, outline, patch });
    }

    /// Collects the surfaces' patches into a new volume.
    fn solid_from(&mut self, surfaces: Vec<Tag>) -> ModelResult<Tag> {
        let mut polygons = Vec::new();
        for &tag in &surfaces {
            polygons.extend(self.surface(tag)?.patch.iter().cloned());
        }
        Ok(self.insert_volume(Volume { surfaces, polygons }))
    }

    // =========================================================================
    // BOX
    // =========================================================================

    /// Adds an axis-aligned box spanning `origin` to `origin + extent`.
    ///
    /// Negative extents are allowed and grow the box the other way.
    pub fn add_box(&mut self, origin: DVec3, extent: DVec3) -> ModelResult<Tag> {
        let min = origin + extent.min(DVec3::ZERO);
        let size = extent.abs();
        if !size.is_finite() || size.min_element() < EPSILON {
            return Err(ModelError::degenerate(format!("box with extent {extent}")));
        }

        let corners: Vec<Corner> = (0..8)
            .map(|i| {
                let offset = DVec3::new(
                    (i & 1) as f64 * size.x,
                    ((i >> 1) & 1) as f64 * size.y,
                    ((i >> 2) & 1) as f64 * size.z,
                );
                self.corner(min + offset)
            })
            .collect();
        let edges: Vec<Tag> = BOX_EDGES
            .iter()
            .map(|&(a, b)| self.line_curve(corners[a], corners[b]))
            .collect();

        let mut surfaces = Vec::with_capacity(BOX_FACES.len());
        for ring in BOX_FACES {
            let outline = (0..4)
                .map(|k| {
                    let (a, b) = (ring[k], ring[(k + 1) % 4]);
                    match BOX_EDGES.iter().position(|&edge| edge == (a, b) || edge == (b, a)) {
                        Some(e) if BOX_EDGES[e] == (a, b) => Ok(OrientedCurve::forward(edges[e])),
                        Some(e) => Ok(OrientedCurve::backward(edges[e])),
                        None => Err(ModelError::degenerate("box face ring without edge")),
                    }
                })
                .collect::<ModelResult<Vec<_>>>()?;
            let tag = self.reserve_surface();
            let polygon = ring.iter().map(|&i| corners[i].at).collect();
            self.patch_surface(tag, SurfaceKind::Plane, outline, vec![polygon]);
            surfaces.push(tag);
        }

        let tag = self.solid_from(surfaces)?;
        log::debug!("box {tag} at {min} size {size}");
        Ok(tag)
    }

    // =========================================================================
    // CYLINDER / CONE
    // =========================================================================

    /// Adds a cylinder of `radius` from `origin` along `axis`.
    ///
    /// `angle` opens a sector of that many radians starting in the frame's
    /// reference half-plane; `None` or a full turn gives the whole cylinder.
    pub fn add_cylinder(&mut self, origin: DVec3, axis: DVec3, radius: f64, angle: Option<f64>) -> ModelResult<Tag> {
        if !(radius.is_finite() && radius > 0.0) {
            return Err(ModelError::degenerate(format!("cylinder radius {radius}")));
        }
        let frame = Frame::new(origin, axis)
            .ok_or_else(|| ModelError::degenerate("cylinder with zero-length axis"))?;
        let height = axis.length();

        let tag = match angle {
            Some(angle) if !is_full_turn(angle) => {
                if !(angle.is_finite() && angle > 0.0) {
                    return Err(ModelError::degenerate(format!("cylinder sector angle {angle}")));
                }
                self.sector(&frame, height, radius, angle)
            }
            _ => self.frustum(&frame, height, radius, radius),
        }?;
        log::debug!("cylinder {tag} at {origin} axis {axis} radius {radius}");
        Ok(tag)
    }

    /// Adds a truncated cone from radius `r1` at `origin` to `r2` at
    /// `origin + axis`. Either radius may be zero.
    pub fn add_cone(&mut self, origin: DVec3, axis: DVec3, r1: f64, r2: f64) -> ModelResult<Tag> {
        if !(r1.is_finite() && r2.is_finite()) || r1 < 0.0 || r2 < 0.0 || r1.max(r2) <= 0.0 {
            return Err(ModelError::degenerate(format!("cone radii {r1}, {r2}")));
        }
        let frame = Frame::new(origin, axis)
            .ok_or_else(|| ModelError::degenerate("cone with zero-length axis"))?;

        let tag = self.frustum(&frame, axis.length(), r1, r2)?;
        log::debug!("cone {tag} at {origin} axis {axis} radii {r1} -> {r2}");
        Ok(tag)
    }

    fn frustum(&mut self, frame: &Frame, height: f64, r1: f64, r2: f64) -> ModelResult<Tag> {
        let n = CIRCLE_SEGMENTS as usize;
        let ring = |radius: f64, z: f64| -> Vec<DVec3> {
            (0..n)
                .map(|j| frame.at(radius, TAU * j as f64 / n as f64, z))
                .collect()
        };
        let closed = |ring: &[DVec3]| -> Vec<DVec3> {
            let mut samples = ring.to_vec();
            samples.push(ring[0]);
            samples
        };
        let bottom = ring(r1, 0.0);
        let top = ring(r2, height);
        let lateral_kind = if r1 == r2 { SurfaceKind::Cylinder } else { SurfaceKind::Cone };

        if r1 > 0.0 && r2 > 0.0 {
            let pb = self.corner(bottom[0]);
            let pt = self.corner(top[0]);
            let bottom_circle = self.sampled_curve(CurveKind::Circle, pb.tag, pb.tag, closed(&bottom));
            let top_circle = self.sampled_curve(CurveKind::Circle, pt.tag, pt.tag, closed(&top));
            let seam = self.line_curve(pb, pt);

            let lateral = self.reserve_surface();
            let top_cap = self.reserve_surface();
            let bottom_cap = self.reserve_surface();

            let quads = (0..n)
                .map(|j| vec![bottom[j], bottom[(j + 1) % n], top[(j + 1) % n], top[j]])
                .collect();
            self.patch_surface(
                lateral,
                lateral_kind,
                vec![
                    OrientedCurve::forward(bottom_circle),
                    OrientedCurve::forward(seam),
                    OrientedCurve::backward(top_circle),
                    OrientedCurve::backward(seam),
                ],
                quads,
            );
            self.patch_surface(top_cap, SurfaceKind::Plane, vec![OrientedCurve::forward(top_circle)], vec![top]);
            let mut reversed = bottom;
            reversed.reverse();
            self.patch_surface(
                bottom_cap,
                SurfaceKind::Plane,
                vec![OrientedCurve::forward(bottom_circle)],
                vec![reversed],
            );
            return self.solid_from(vec![lateral, top_cap, bottom_cap]);
        }

        // One end collapses to an apex.
        let apex_on_top = r2 == 0.0;
        let (base_ring, apex_at) = if apex_on_top {
            (bottom, frame.at(0.0, 0.0, height))
        } else {
            (top, frame.origin)
        };
        let base = self.corner(base_ring[0]);
        let apex = self.corner(apex_at);
        let circle = self.sampled_curve(CurveKind::Circle, base.tag, base.tag, closed(&base_ring));
        let seam = self.line_curve(base, apex);

        let lateral = self.reserve_surface();
        let cap = self.reserve_surface();
        let triangles = (0..n)
            .map(|j| {
                let (a, b) = (base_ring[j], base_ring[(j + 1) % n]);
                if apex_on_top {
                    vec![a, b, apex_at]
                } else {
                    vec![apex_at, b, a]
                }
            })
            .collect();
        self.patch_surface(
            lateral,
            SurfaceKind::Cone,
            vec![
                OrientedCurve::forward(circle),
                OrientedCurve::forward(seam),
                OrientedCurve::backward(seam),
            ],
            triangles,
        );
        let mut cap_ring = base_ring;
        if apex_on_top {
            cap_ring.reverse();
        }
        self.patch_surface(cap, SurfaceKind::Plane, vec![OrientedCurve::forward(circle)], vec![cap_ring]);
        self.solid_from(vec![lateral, cap])
    }

    fn sector(&mut self, frame: &Frame, height: f64, radius: f64, angle: f64) -> ModelResult<Tag> {
        let n = arc_segments(angle);
        let bottom: Vec<DVec3> = (0..=n)
            .map(|j| frame.at(radius, angle * j as f64 / n as f64, 0.0))
            .collect();
        let top: Vec<DVec3> = (0..=n)
            .map(|j| frame.at(radius, angle * j as f64 / n as f64, height))
            .collect();

        let b0 = self.corner(bottom[0]);
        let bn = self.corner(bottom[n]);
        let t0 = self.corner(top[0]);
        let tn = self.corner(top[n]);
        let cb = self.corner(frame.origin);
        let ct = self.corner(frame.at(0.0, 0.0, height));

        let bottom_arc = self.sampled_curve(CurveKind::Arc, b0.tag, bn.tag, bottom.clone());
        let top_arc = self.sampled_curve(CurveKind::Arc, t0.tag, tn.tag, top.clone());
        let seam0 = self.line_curve(b0, t0);
        let seam1 = self.line_curve(bn, tn);
        let radial_b0 = self.line_curve(cb, b0);
        let radial_b1 = self.line_curve(cb, bn);
        let radial_t0 = self.line_curve(ct, t0);
        let radial_t1 = self.line_curve(ct, tn);
        let axis = self.line_curve(cb, ct);

        let lateral = self.reserve_surface();
        let top_cap = self.reserve_surface();
        let bottom_cap = self.reserve_surface();
        let side0 = self.reserve_surface();
        let side1 = self.reserve_surface();

        use OrientedCurve as C;
        self.patch_surface(
            lateral,
            SurfaceKind::Cylinder,
            vec![C::forward(bottom_arc), C::forward(seam1), C::backward(top_arc), C::backward(seam0)],
            (0..n)
                .map(|j| vec![bottom[j], bottom[j + 1], top[j + 1], top[j]])
                .collect(),
        );
        self.patch_surface(
            top_cap,
            SurfaceKind::Plane,
            vec![C::forward(radial_t0), C::forward(top_arc), C::backward(radial_t1)],
            (0..n).map(|j| vec![ct.at, top[j], top[j + 1]]).collect(),
        );
        self.patch_surface(
            bottom_cap,
            SurfaceKind::Plane,
            vec![C::forward(radial_b0), C::forward(bottom_arc), C::backward(radial_b1)],
            (0..n).map(|j| vec![cb.at, bottom[j + 1], bottom[j]]).collect(),
        );
        self.patch_surface(
            side0,
            SurfaceKind::Plane,
            vec![C::forward(axis), C::forward(radial_t0), C::backward(seam0), C::backward(radial_b0)],
            vec![vec![cb.at, b0.at, t0.at, ct.at]],
        );
        self.patch_surface(
            side1,
            SurfaceKind::Plane,
            vec![C::forward(radial_b1), C::forward(seam1), C::backward(radial_t1), C::backward(axis)],
            vec![vec![cb.at, ct.at, tn.at, bn.at]],
        );

        self.solid_from(vec![lateral, top_cap, bottom_cap, side0, side1])
    }

    // =========================================================================
    // SPHERE
    // =========================================================================

    /// Adds a sphere.
    pub fn add_sphere(&mut self, center: DVec3, radius: f64) -> ModelResult<Tag> {
        if !(radius.is_finite() && radius > 0.0) {
            return Err(ModelError::degenerate(format!("sphere radius {radius}")));
        }
        let rings = SPHERE_RINGS as usize;
        let segments = CIRCLE_SEGMENTS as usize;
        let at = |i: usize, j: usize| -> DVec3 {
            if i == 0 {
                return center - DVec3::Z * radius;
            }
            if i == rings {
                return center + DVec3::Z * radius;
            }
            let latitude = -FRAC_PI_2 + PI * i as f64 / rings as f64;
            let longitude = TAU * j as f64 / segments as f64;
            center
                + radius
                    * DVec3::new(
                        latitude.cos() * longitude.cos(),
                        latitude.cos() * longitude.sin(),
                        latitude.sin(),
                    )
        };

        let south = self.corner(at(0, 0));
        let north = self.corner(at(rings, 0));
        let seam = self.sampled_curve(
            CurveKind::Arc,
            south.tag,
            north.tag,
            (0..=rings).map(|i| at(i, 0)).collect(),
        );

        let surface = self.reserve_surface();
        let mut quads = Vec::with_capacity(rings * segments);
        for i in 0..rings {
            for j in 0..segments {
                let k = (j + 1) % segments;
                quads.push(vec![at(i, j), at(i, k), at(i + 1, k), at(i + 1, j)]);
            }
        }
        self.patch_surface(
            surface,
            SurfaceKind::Sphere,
            vec![OrientedCurve::forward(seam), OrientedCurve::backward(seam)],
            quads,
        );

        let tag = self.solid_from(vec![surface])?;
        log::debug!("sphere {tag} at {center} radius {radius}");
        Ok(tag)
    }
}
