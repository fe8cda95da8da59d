//! # Bounds
//!
//! Axis-aligned bounding boxes.

use super::polygon::Polygon;
use glam::DVec3;

/// Axis-aligned bounding box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min: DVec3,
    pub max: DVec3,
}

impl Aabb {
    /// An empty box that any point extends.
    pub const EMPTY: Aabb = Aabb {
        min: DVec3::splat(f64::INFINITY),
        max: DVec3::splat(f64::NEG_INFINITY),
    };

    /// Smallest box containing all points.
    pub fn from_points(points: impl IntoIterator<Item = DVec3>) -> Self {
        points.into_iter().fold(Self::EMPTY, |bounds, p| bounds.including(p))
    }

    /// Smallest box containing all polygon vertices.
    pub fn from_polygons(polygons: &[Polygon]) -> Self {
        Self::from_points(polygons.iter().flat_map(|p| p.vertices().iter().copied()))
    }

    /// Whether no point has been added.
    pub fn is_empty(&self) -> bool {
        self.min.x > self.max.x
    }

    /// This box grown to include `p`.
    pub fn including(self, p: DVec3) -> Self {
        Self {
            min: self.min.min(p),
            max: self.max.max(p),
        }
    }

    /// Smallest box containing both.
    pub fn union(self, other: Aabb) -> Self {
        Self {
            min: self.min.min(other.min),
            max: self.max.max(other.max),
        }
    }

    /// Whether the boxes overlap once both are grown by `margin`.
    pub fn overlaps(&self, other: &Aabb, margin: f64) -> bool {
        !self.is_empty()
            && !other.is_empty()
            && self.min.cmple(other.max + margin).all()
            && other.min.cmple(self.max + margin).all()
    }

    /// Whether `p` lies inside the box grown by `margin`.
    pub fn contains(&self, p: DVec3, margin: f64) -> bool {
        (self.min - margin).cmple(p).all() && p.cmple(self.max + margin).all()
    }

    /// Extent along each axis.
    pub fn size(&self) -> DVec3 {
        self.max - self.min
    }

    /// Length of the main diagonal.
    pub fn diagonal(&self) -> f64 {
        if self.is_empty() {
            0.0
        } else {
            self.size().length()
        }
    }

    /// Centre point.
    pub fn center(&self) -> DVec3 {
        (self.min + self.max) * 0.5
    }
}

impl Default for Aabb {
    fn default() -> Self {
        Self::EMPTY
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_box() {
        assert!(Aabb::EMPTY.is_empty());
        assert_eq!(Aabb::EMPTY.diagonal(), 0.0);
        assert!(!Aabb::EMPTY.overlaps(&Aabb::EMPTY, 1.0));
    }

    #[test]
    fn test_from_points_and_overlap() {
        let a = Aabb::from_points([DVec3::ZERO, DVec3::ONE]);
        let b = Aabb::from_points([DVec3::splat(1.5), DVec3::splat(2.0)]);
        assert!(!a.overlaps(&b, 0.0));
        assert!(a.overlaps(&b, 0.6));
        assert_eq!(a.center(), DVec3::splat(0.5));
        assert!(a.contains(DVec3::splat(0.25), 0.0));
    }
}
