//! # Plane
//!
//! Oriented plane with point classification for BSP splitting.

use config::constants::PLANE_EPSILON;
use glam::DVec3;

// =============================================================================
// CLASSIFICATION
// =============================================================================

/// Classification of a point or polygon relative to a plane.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Classification {
    /// In front of the plane (positive side).
    Front,
    /// Behind the plane (negative side).
    Back,
    /// On the plane.
    Coplanar,
    /// Polygon has vertices on both sides.
    Spanning,
}

// =============================================================================
// PLANE
// =============================================================================

/// A plane defined by unit normal and distance from origin.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Plane {
    normal: DVec3,
    w: f64,
}

impl Plane {
    /// Creates a plane from a normal and a distance along it.
    pub fn new(normal: DVec3, w: f64) -> Self {
        Self { normal, w }
    }

    /// Plane through a polygon, using Newell's method for the normal.
    ///
    /// Returns `None` for degenerate (zero-area) outlines.
    pub fn from_polygon(vertices: &[DVec3]) -> Option<Self> {
        if vertices.len() < 3 {
            return None;
        }

        let mut normal = DVec3::ZERO;
        let mut centroid = DVec3::ZERO;
        for (i, current) in vertices.iter().enumerate() {
            let next = vertices[(i + 1) % vertices.len()];
            normal.x += (current.y - next.y) * (current.z + next.z);
            normal.y += (current.z - next.z) * (current.x + next.x);
            normal.z += (current.x - next.x) * (current.y + next.y);
            centroid += *current;
        }

        let length = normal.length();
        if length < PLANE_EPSILON * PLANE_EPSILON {
            return None;
        }
        let normal = normal / length;
        let centroid = centroid / vertices.len() as f64;
        Some(Self {
            normal,
            w: normal.dot(centroid),
        })
    }

    /// Unit normal.
    #[inline]
    pub fn normal(&self) -> DVec3 {
        self.normal
    }

    /// Distance from origin along the normal.
    #[inline]
    pub fn w(&self) -> f64 {
        self.w
    }

    /// Reverses the orientation.
    pub fn flip(&mut self) {
        self.normal = -self.normal;
        self.w = -self.w;
    }

    /// Signed distance from point to plane (positive in front).
    #[inline]
    pub fn signed_distance(&self, point: DVec3) -> f64 {
        self.normal.dot(point) - self.w
    }

    /// Classifies a point relative to this plane.
    pub fn classify_point(&self, point: DVec3) -> Classification {
        let distance = self.signed_distance(point);
        if distance > PLANE_EPSILON {
            Classification::Front
        } else if distance < -PLANE_EPSILON {
            Classification::Back
        } else {
            Classification::Coplanar
        }
    }
}
