//! # Bottom-up Builders
//!
//! Points, curves, loops, surfaces and volumes assembled from existing
//! entities.

use crate::entity::{Dim, DimTag, Tag};
use crate::error::ModelError;
use crate::geometry::triangulate::convex_pieces;
use crate::geometry::{Plane, Polygon};
use crate::model::{Model, ModelResult};
use crate::topology::{Curve, CurveKind, CurveLoop, OrientedCurve, Surface, SurfaceKind, SurfaceLoop, Volume};
use config::constants::{BEZIER_SAMPLES, PLANE_EPSILON};
use glam::DVec3;

impl Model {
    /// Adds a point.
    pub fn add_point(&mut self, position: DVec3) -> ModelResult<Tag> {
        if !position.is_finite() {
            return Err(ModelError::degenerate(format!("point at {position}")));
        }
        Ok(self.insert_point(position))
    }

    /// Adds a straight line between two existing points.
    pub fn add_line(&mut self, start: Tag, end: Tag) -> ModelResult<Tag> {
        let a = self.point_position(start)?;
        let b = self.point_position(end)?;
        if a.distance(b) < PLANE_EPSILON {
            return Err(ModelError::degenerate(format!(
                "line between coincident points {start} and {end}"
            )));
        }
        Ok(self.insert_curve(Curve {
            kind: CurveKind::Line,
            start,
            end,
            samples: vec![a, b],
        }))
    }

    /// Adds a Bézier curve through its first and last control points.
    ///
    /// Intermediate control points stay as free points of the model.
    pub fn add_bezier(&mut self, controls: &[Tag]) -> ModelResult<Tag> {
        if controls.len() < 2 {
            return Err(ModelError::degenerate("Bezier curve needs at least 2 control points"));
        }
        let positions = controls
            .iter()
            .map(|&tag| self.point_position(tag))
            .collect::<ModelResult<Vec<_>>>()?;

        let samples = (0..=BEZIER_SAMPLES)
            .map(|i| de_casteljau(&positions, i as f64 / BEZIER_SAMPLES as f64))
            .collect();
        Ok(self.insert_curve(Curve {
            kind: CurveKind::Bezier,
            start: controls[0],
            end: controls[controls.len() - 1],
            samples,
        }))
    }

    /// Adds a closed chain of curves.
    ///
    /// Curve directions are inferred from shared end points, so each curve
    /// may be listed in either orientation.
    pub fn add_curve_loop(&mut self, curves: &[Tag]) -> ModelResult<Tag> {
        let records = curves
            .iter()
            .map(|&tag| self.curve(tag).map(|c| (tag, c.start, c.end)))
            .collect::<ModelResult<Vec<_>>>()?;

        let Some(&(first, first_start, first_end)) = records.first() else {
            return Err(ModelError::degenerate("empty curve loop"));
        };

        let mut chain = Vec::with_capacity(records.len());
        // Orient the first curve so that it connects to the second.
        let first_reversed = match records.get(1) {
            Some(&(_, start, end)) => first_end != start && first_end != end,
            None => false,
        };
        chain.push(OrientedCurve {
            tag: first,
            reversed: first_reversed,
        });
        let loop_start = if first_reversed { first_end } else { first_start };
        let mut cursor = if first_reversed { first_start } else { first_end };

        for &(tag, start, end) in &records[1..] {
            let oriented = if start == cursor {
                cursor = end;
                OrientedCurve::forward(tag)
            } else if end == cursor {
                cursor = start;
                OrientedCurve::backward(tag)
            } else {
                return Err(ModelError::degenerate(format!(
                    "curve {tag} does not connect to point {cursor}"
                )));
            };
            chain.push(oriented);
        }

        if cursor != loop_start {
            return Err(ModelError::degenerate("curve loop is not closed"));
        }
        Ok(self.insert_curve_loop(CurveLoop { curves: chain }))
    }

    /// Sample positions walked around a curve loop, without repeats at joins.
    pub(crate) fn loop_outline(&self, curves: &[OrientedCurve]) -> ModelResult<Vec<DVec3>> {
        let mut outline: Vec<DVec3> = Vec::new();
        for oriented in curves {
            let samples = self.curve(oriented.tag)?.oriented_samples(oriented.reversed);
            outline.extend(samples.into_iter().skip(usize::from(!outline.is_empty())));
        }
        if outline.len() > 1 && outline[0].distance(outline[outline.len() - 1]) < PLANE_EPSILON {
            outline.pop();
        }
        Ok(outline)
    }

    /// Adds a planar surface bounded by a curve loop.
    ///
    /// Only a single outer loop is supported.
    pub fn add_plane_surface(&mut self, loops: &[Tag]) -> ModelResult<Tag> {
        let [curve_loop] = loops else {
            return Err(ModelError::unsupported("plane surfaces with holes"));
        };
        let curves = self.curve_loop(*curve_loop)?.curves.clone();
        let outline = self.loop_outline(&curves)?;
        let plane = Plane::from_polygon(&outline)
            .ok_or_else(|| ModelError::degenerate(format!("curve loop {curve_loop} encloses no area")))?;
        if outline.iter().any(|p| plane.signed_distance(*p).abs() > PLANE_EPSILON * 100.0) {
            return Err(ModelError::degenerate(format!("curve loop {curve_loop} is not planar")));
        }

        let tag = self.reserve_surface();
        let patch = convex_pieces(&outline, plane.normal())
            .into_iter()
            .filter_map(|ring| Polygon::new(ring, tag))
            .collect();
        self.insert_surface_with_tag(
            tag,
            Surface {
                kind: SurfaceKind::Plane,
                outline: curves,
                patch,
            },
        );
        log::debug!("plane surface {tag} from curve loop {curve_loop}");
        Ok(tag)
    }

    /// Adds a surface spanning a possibly non-planar curve loop.
    ///
    /// The patch is a fan of triangles around the loop's vertex centroid.
    pub fn add_surface_filling(&mut self, curve_loop: Tag) -> ModelResult<Tag> {
        let curves = self.curve_loop(curve_loop)?.curves.clone();
        let outline = self.loop_outline(&curves)?;
        if outline.len() < 3 {
            return Err(ModelError::degenerate(format!("curve loop {curve_loop} encloses no area")));
        }

        let center = outline.iter().copied().sum::<DVec3>() / outline.len() as f64;
        let tag = self.reserve_surface();
        let patch = (0..outline.len())
            .filter_map(|i| Polygon::new(vec![center, outline[i], outline[(i + 1) % outline.len()]], tag))
            .collect();
        self.insert_surface_with_tag(
            tag,
            Surface {
                kind: SurfaceKind::Filling,
                outline: curves,
                patch,
            },
        );
        log::debug!("filling surface {tag} from curve loop {curve_loop}");
        Ok(tag)
    }

    /// Adds a closed shell of surfaces.
    pub fn add_surface_loop(&mut self, surfaces: &[Tag]) -> ModelResult<Tag> {
        for &tag in surfaces {
            self.surface(tag)?;
        }
        if surfaces.is_empty() {
            return Err(ModelError::degenerate("empty surface loop"));
        }
        Ok(self.insert_surface_loop(SurfaceLoop {
            surfaces: surfaces.to_vec(),
        }))
    }

    /// Adds a volume enclosed by a surface loop.
    ///
    /// Each surface's polygons are turned to face away from the shell's
    /// centroid, which orients star-shaped shells correctly.
    pub fn add_volume(&mut self, loops: &[Tag]) -> ModelResult<Tag> {
        let [shell] = loops else {
            return Err(ModelError::unsupported("volumes with inner shells"));
        };
        let surfaces = self.surface_loop(*shell)?.surfaces.clone();

        let mut patches = Vec::with_capacity(surfaces.len());
        for &tag in &surfaces {
            patches.push(self.surface(tag)?.patch.clone());
        }
        let vertices: Vec<DVec3> = patches
            .iter()
            .flatten()
            .flat_map(|p| p.vertices().iter().copied())
            .collect();
        if vertices.is_empty() {
            return Err(ModelError::degenerate(format!("surface loop {shell} has no geometry")));
        }
        let center = vertices.iter().copied().sum::<DVec3>() / vertices.len() as f64;

        let mut polygons = Vec::new();
        for patch in patches {
            polygons.extend(orient_away_from(patch, center));
        }

        let tag = self.insert_volume(Volume { surfaces, polygons });
        log::debug!("volume {tag} from surface loop {shell}");
        Ok(tag)
    }

    /// Surfaces bounding a volume, as entities.
    pub fn volume_surfaces(&self, volume: Tag) -> ModelResult<Vec<DimTag>> {
        self.expect_dim(DimTag::volume(volume), Dim::Volume)?;
        Ok(self.downward(DimTag::volume(volume))?.into_iter().map(DimTag::surface).collect())
    }
}

/// Flips a patch if its area-weighted normal points towards `center`.
fn orient_away_from(patch: Vec<Polygon>, center: DVec3) -> Vec<Polygon> {
    let mut facing = 0.0;
    for polygon in &patch {
        let normal_area: DVec3 = polygon
            .triangles()
            .map(|[a, b, c]| (b - a).cross(c - a))
            .sum();
        facing += normal_area.dot(polygon.centroid() - center);
    }
    if facing >= 0.0 {
        patch
    } else {
        patch.into_iter().map(|p| p.flipped()).collect()
    }
}

/// Point on a Bézier curve by repeated linear interpolation.
fn de_casteljau(controls: &[DVec3], t: f64) -> DVec3 {
    let mut points = controls.to_vec();
    for level in (1..points.len()).rev() {
        for i in 0..level {
            points[i] = points[i].lerp(points[i + 1], t);
        }
    }
    points[0]
}
