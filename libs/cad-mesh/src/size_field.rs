//! # Size Field
//!
//! Target element size as a function of position, built from the model's
//! per-point size directives.
//!
//! ## Evaluation
//!
//! - **On a surface** with sized bounding points: inverse-distance weighted
//!   mean of those sizes. A surface whose points all carry `s` is meshed at
//!   exactly `s`.
//! - **Elsewhere**: `min_i(s_i + grading * |p - x_i|)` over all sized
//!   points, so sizes grow smoothly away from refined regions.
//! - **No directives at all**: `size_factor * model diagonal`.
//!
//! Every result is clamped to `[size_min, size_max]`.
//!
//! A sized point that bounds live surfaces but lies on none of their
//! polygons is left out. Cuts keep the full outline of a surviving tool
//! face, so its trimmed-away corners would otherwise refine empty space.

use std::collections::BTreeMap;

use cad_kernel::geometry::Polygon;
use cad_kernel::{Model, Tag};
use config::constants::{EPSILON, PLANE_EPSILON};
use glam::DVec3;

use crate::error::MeshResult;
use crate::options::MeshOptions;
use crate::surface::surface_polygons;

/// A sized point.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Source {
    position: DVec3,
    size: f64,
}

/// Target element size at any position.
#[derive(Debug, Clone)]
pub struct SizeField {
    sources: Vec<Source>,
    surfaces: BTreeMap<Tag, Vec<Source>>,
    fallback: f64,
    grading: f64,
    size_min: f64,
    size_max: f64,
}

fn lies_on(position: DVec3, surfaces: &[Tag], geometry: &BTreeMap<Tag, Vec<Polygon>>) -> bool {
    surfaces
        .iter()
        .filter_map(|surface| geometry.get(surface))
        .flatten()
        .any(|polygon| polygon.contains(position, PLANE_EPSILON))
}

impl SizeField {
    /// Builds the field from the live size directives of a model.
    pub fn new(model: &Model, options: &MeshOptions) -> MeshResult<Self> {
        let geometry = surface_polygons(model)?;
        let mut bounded_by: BTreeMap<Tag, Vec<Tag>> = BTreeMap::new();
        for &surface in geometry.keys() {
            for point in model.surface_points(surface)? {
                bounded_by.entry(point).or_default().push(surface);
            }
        }

        let mut sources = Vec::new();
        let mut by_point = BTreeMap::new();
        let mut stray = 0;
        for (tag, size) in model.sizes() {
            let position = model.point_position(tag)?;
            if let Some(surfaces) = bounded_by.get(&tag) {
                if !lies_on(position, surfaces, &geometry) {
                    stray += 1;
                    continue;
                }
            }
            let source = Source { position, size };
            sources.push(source);
            by_point.insert(tag, source);
        }
        if stray > 0 {
            log::debug!("size field: {stray} sized points lie off the live geometry");
        }

        let mut surfaces = BTreeMap::new();
        for &surface in geometry.keys() {
            let sized: Vec<Source> = model
                .surface_points(surface)?
                .iter()
                .filter_map(|tag| by_point.get(tag).copied())
                .collect();
            if !sized.is_empty() {
                surfaces.insert(surface, sized);
            }
        }

        let diagonal = model.bounding_box().diagonal();
        let fallback = if diagonal > EPSILON {
            options.size_factor * diagonal
        } else {
            1.0
        };

        log::debug!(
            "size field: {} sized points, {} sized surfaces, fallback {:.4}",
            sources.len(),
            surfaces.len(),
            fallback
        );

        Ok(Self {
            sources,
            surfaces,
            fallback,
            grading: options.grading,
            size_min: options.size_min,
            size_max: options.size_max,
        })
    }

    fn clamp(&self, size: f64) -> f64 {
        size.max(self.size_min).min(self.size_max)
    }

    /// Graded size at a position in space.
    pub fn at(&self, p: DVec3) -> f64 {
        let size = self
            .sources
            .iter()
            .map(|s| s.size + self.grading * s.position.distance(p))
            .fold(f64::INFINITY, f64::min);
        self.clamp(if size.is_finite() { size } else { self.fallback })
    }

    /// Size at a position on a surface.
    pub fn on_surface(&self, surface: Tag, p: DVec3) -> f64 {
        let Some(sources) = self.surfaces.get(&surface) else {
            return self.at(p);
        };

        let mut weighted = 0.0;
        let mut total = 0.0;
        for source in sources {
            let d2 = source.position.distance_squared(p);
            if d2 < EPSILON {
                return self.clamp(source.size);
            }
            weighted += source.size / d2;
            total += 1.0 / d2;
        }
        self.clamp(weighted / total)
    }

    /// Whether any point carries a size directive.
    pub fn has_sources(&self) -> bool {
        !self.sources.is_empty()
    }
}
