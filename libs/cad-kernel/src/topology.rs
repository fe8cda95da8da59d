//! # Topology
//!
//! Entity records stored by the model.
//!
//! Each record holds its downward references (a surface knows its curves, a
//! curve its end points) plus whatever geometry it needs: point positions,
//! sampled curve polylines, surface patches and volume polygon sets. Upward
//! relations are derived on demand by the model.

use crate::entity::Tag;
use crate::geometry::Polygon;
use glam::DVec3;

/// A vertex.
#[derive(Debug, Clone, PartialEq)]
pub struct Point {
    pub position: DVec3,
}

/// Geometric kind of a curve.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CurveKind {
    Line,
    Circle,
    Arc,
    Bezier,
}

impl CurveKind {
    /// Name used in text exports.
    pub fn name(self) -> &'static str {
        match self {
            CurveKind::Line => "Line",
            CurveKind::Circle => "Circle",
            CurveKind::Arc => "Arc",
            CurveKind::Bezier => "Bezier",
        }
    }
}

/// An edge between two points, possibly closed.
///
/// `samples` is a polyline from the start point to the end point; for a
/// closed curve both ends sit on the same point.
#[derive(Debug, Clone, PartialEq)]
pub struct Curve {
    pub kind: CurveKind,
    pub start: Tag,
    pub end: Tag,
    pub samples: Vec<DVec3>,
}

impl Curve {
    /// Whether start and end are the same point.
    pub fn is_closed(&self) -> bool {
        self.start == self.end
    }

    /// Distinct end points in order.
    pub fn points(&self) -> Vec<Tag> {
        if self.is_closed() {
            vec![self.start]
        } else {
            vec![self.start, self.end]
        }
    }

    /// Samples walked in the given direction.
    pub fn oriented_samples(&self, reversed: bool) -> Vec<DVec3> {
        let mut samples = self.samples.clone();
        if reversed {
            samples.reverse();
        }
        samples
    }
}

/// A curve used in a given direction within an outline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrientedCurve {
    pub tag: Tag,
    pub reversed: bool,
}

impl OrientedCurve {
    pub fn forward(tag: Tag) -> Self {
        Self { tag, reversed: false }
    }

    pub fn backward(tag: Tag) -> Self {
        Self { tag, reversed: true }
    }
}

/// Geometric kind of a surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SurfaceKind {
    Plane,
    Cylinder,
    Cone,
    Sphere,
    Revolution,
    Ruled,
    Filling,
}

impl SurfaceKind {
    /// Name used in text exports.
    pub fn name(self) -> &'static str {
        match self {
            SurfaceKind::Plane => "Plane",
            SurfaceKind::Cylinder => "Cylinder",
            SurfaceKind::Cone => "Cone",
            SurfaceKind::Sphere => "Sphere",
            SurfaceKind::Revolution => "Revolution",
            SurfaceKind::Ruled => "Ruled",
            SurfaceKind::Filling => "Filling",
        }
    }
}

/// A face.
///
/// `outline` is the closed boundary walk (seams appear twice, once in each
/// direction). `patch` holds the face's own polygons as created; once the
/// face bounds a volume, the volume's polygon set is authoritative.
#[derive(Debug, Clone, PartialEq)]
pub struct Surface {
    pub kind: SurfaceKind,
    pub outline: Vec<OrientedCurve>,
    pub patch: Vec<Polygon>,
}

impl Surface {
    /// Distinct bounding curves in outline order.
    pub fn curves(&self) -> Vec<Tag> {
        let mut curves: Vec<Tag> = Vec::with_capacity(self.outline.len());
        for oriented in &self.outline {
            if !curves.contains(&oriented.tag) {
                curves.push(oriented.tag);
            }
        }
        curves
    }
}

/// A solid: its bounding surfaces and the polygons enclosing it.
///
/// Every polygon's face tag names one of `surfaces`.
#[derive(Debug, Clone, PartialEq)]
pub struct Volume {
    pub surfaces: Vec<Tag>,
    pub polygons: Vec<Polygon>,
}

/// Closed chain of curves, used to build surfaces.
#[derive(Debug, Clone, PartialEq)]
pub struct CurveLoop {
    pub curves: Vec<OrientedCurve>,
}

/// Closed set of surfaces, used to build volumes.
#[derive(Debug, Clone, PartialEq)]
pub struct SurfaceLoop {
    pub surfaces: Vec<Tag>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_closed_curve_has_one_point() {
        let circle = Curve {
            kind: CurveKind::Circle,
            start: 4,
            end: 4,
            samples: vec![],
        };
        assert!(circle.is_closed());
        assert_eq!(circle.points(), vec![4]);
    }

    #[test]
    fn test_surface_curves_dedup_seam() {
        let lateral = Surface {
            kind: SurfaceKind::Cylinder,
            outline: vec![
                OrientedCurve::forward(1),
                OrientedCurve::forward(3),
                OrientedCurve::backward(2),
                OrientedCurve::backward(3),
            ],
            patch: vec![],
        };
        assert_eq!(lateral.curves(), vec![1, 3, 2]);
    }
}
