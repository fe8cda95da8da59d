//! # Polygon
//!
//! Convex planar polygon tagged with the surface it belongs to.
//!
//! The surface tag survives flipping and splitting, which is how boolean
//! results know which surfaces of their operands are still present.

use super::plane::{Classification, Plane};
use crate::entity::Tag;
use config::constants::EPSILON;
use glam::DVec3;

// =============================================================================
// POLYGON
// =============================================================================

/// A convex polygon with its supporting plane and owning surface.
#[derive(Debug, Clone, PartialEq)]
pub struct Polygon {
    /// Vertices in counter-clockwise order seen from the front.
    vertices: Vec<DVec3>,
    /// Plane containing this polygon.
    plane: Plane,
    /// Surface this polygon is a piece of.
    face: Tag,
}

impl Polygon {
    /// Creates a polygon, dropping consecutive duplicate vertices.
    ///
    /// Returns `None` if fewer than three distinct vertices remain or the
    /// outline has no area.
    pub fn new(vertices: Vec<DVec3>, face: Tag) -> Option<Self> {
        let mut distinct: Vec<DVec3> = Vec::with_capacity(vertices.len());
        for v in vertices {
            if distinct
                .last()
                .map_or(true, |last| last.distance_squared(v) > EPSILON)
            {
                distinct.push(v);
            }
        }
        while distinct.len() > 1
            && distinct[0].distance_squared(distinct[distinct.len() - 1]) <= EPSILON
        {
            distinct.pop();
        }

        let plane = Plane::from_polygon(&distinct)?;
        Some(Self {
            vertices: distinct,
            plane,
            face,
        })
    }

    /// Polygon vertices.
    #[inline]
    pub fn vertices(&self) -> &[DVec3] {
        &self.vertices
    }

    /// Supporting plane.
    #[inline]
    pub fn plane(&self) -> &Plane {
        &self.plane
    }

    /// Owning surface tag.
    #[inline]
    pub fn face(&self) -> Tag {
        self.face
    }

    /// Reassigns the owning surface.
    pub fn set_face(&mut self, face: Tag) {
        self.face = face;
    }

    /// Reverses winding order and plane.
    pub fn flip(&mut self) {
        self.vertices.reverse();
        self.plane.flip();
    }

    /// Returns a flipped copy.
    pub fn flipped(&self) -> Polygon {
        let mut copy = self.clone();
        copy.flip();
        copy
    }

    /// Maps every vertex through a rigid transform.
    ///
    /// Returns `None` if the mapped outline degenerates.
    pub fn map(&self, f: impl Fn(DVec3) -> DVec3) -> Option<Polygon> {
        Polygon::new(self.vertices.iter().map(|v| f(*v)).collect(), self.face)
    }

    /// Vertex average.
    pub fn centroid(&self) -> DVec3 {
        self.vertices.iter().copied().sum::<DVec3>() / self.vertices.len() as f64
    }

    /// Fan triangulation from the first vertex.
    pub fn triangles(&self) -> impl Iterator<Item = [DVec3; 3]> + '_ {
        (1..self.vertices.len() - 1)
            .map(move |i| [self.vertices[0], self.vertices[i], self.vertices[i + 1]])
    }

    /// Whether `point` lies on this polygon, within `tolerance` of its
    /// plane and edges.
    pub fn contains(&self, point: DVec3, tolerance: f64) -> bool {
        if self.plane.signed_distance(point).abs() > tolerance {
            return false;
        }
        let normal = self.plane.normal();
        let n = self.vertices.len();
        (0..n).all(|i| {
            let a = self.vertices[i];
            let edge = self.vertices[(i + 1) % n] - a;
            edge.cross(point - a).dot(normal) >= -tolerance * edge.length()
        })
    }

    /// Classifies this polygon relative to a plane.
    pub fn classify(&self, plane: &Plane) -> Classification {
        let mut front_count = 0;
        let mut back_count = 0;

        for v in &self.vertices {
            match plane.classify_point(*v) {
                Classification::Front => front_count += 1,
                Classification::Back => back_count += 1,
                _ => {}
            }
        }

        if front_count > 0 && back_count > 0 {
            Classification::Spanning
        } else if front_count > 0 {
            Classification::Front
        } else if back_count > 0 {
            Classification::Back
        } else {
            Classification::Coplanar
        }
    }

    /// Splits the polygon by a plane.
    ///
    /// ## Parameters
    ///
    /// - `plane`: Splitting plane
    /// - `coplanar_front`: Output for coplanar polygons facing the same way
    /// - `coplanar_back`: Output for coplanar polygons facing the other way
    /// - `front`: Output for polygons in front of the plane
    /// - `back`: Output for polygons behind the plane
    pub fn split(
        self,
        plane: &Plane,
        coplanar_front: &mut Vec<Polygon>,
        coplanar_back: &mut Vec<Polygon>,
        front: &mut Vec<Polygon>,
        back: &mut Vec<Polygon>,
    ) {
        match self.classify(plane) {
            Classification::Coplanar => {
                if self.plane.normal().dot(plane.normal()) > 0.0 {
                    coplanar_front.push(self);
                } else {
                    coplanar_back.push(self);
                }
            }
            Classification::Front => front.push(self),
            Classification::Back => back.push(self),
            Classification::Spanning => {
                let mut front_verts = Vec::new();
                let mut back_verts = Vec::new();
                let n = self.vertices.len();

                for i in 0..n {
                    let vi = self.vertices[i];
                    let vj = self.vertices[(i + 1) % n];
                    let ti = plane.classify_point(vi);
                    let tj = plane.classify_point(vj);

                    if ti != Classification::Back {
                        front_verts.push(vi);
                    }
                    if ti != Classification::Front {
                        back_verts.push(vi);
                    }

                    if (ti == Classification::Front && tj == Classification::Back)
                        || (ti == Classification::Back && tj == Classification::Front)
                    {
                        let di = plane.signed_distance(vi);
                        let dj = plane.signed_distance(vj);
                        let intersection = vi.lerp(vj, di / (di - dj));
                        front_verts.push(intersection);
                        back_verts.push(intersection);
                    }
                }

                // Pieces keep the parent plane; recomputing it from a sliver
                // would tilt it.
                if front_verts.len() >= 3 {
                    front.push(Polygon {
                        vertices: front_verts,
                        plane: self.plane,
                        face: self.face,
                    });
                }
                if back_verts.len() >= 3 {
                    back.push(Polygon {
                        vertices: back_verts,
                        plane: self.plane,
                        face: self.face,
                    });
                }
            }
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn triangle_at(z: f64) -> Polygon {
        Polygon::new(
            vec![
                DVec3::new(0.0, 0.0, z),
                DVec3::new(1.0, 0.0, z),
                DVec3::new(0.5, 1.0, z),
            ],
            7,
        )
        .unwrap()
    }

    #[test]
    fn test_polygon_drops_duplicates() {
        let poly = Polygon::new(
            vec![DVec3::ZERO, DVec3::ZERO, DVec3::X, DVec3::Y, DVec3::ZERO],
            1,
        )
        .unwrap();
        assert_eq!(poly.vertices().len(), 3);
    }

    #[test]
    fn test_polygon_rejects_degenerate() {
        assert!(Polygon::new(vec![DVec3::ZERO, DVec3::X, DVec3::ZERO], 1).is_none());
    }

    #[test]
    fn test_polygon_contains() {
        let poly = triangle_at(2.0);
        assert!(poly.contains(DVec3::new(0.5, 0.3, 2.0), 1e-9));
        assert!(poly.contains(DVec3::new(1.0, 0.0, 2.0), 1e-9));
        assert!(poly.flipped().contains(DVec3::new(0.5, 0.0, 2.0), 1e-9));
        assert!(!poly.contains(DVec3::new(0.5, 0.3, 2.1), 1e-9));
        assert!(!poly.contains(DVec3::new(1.0, 1.0, 2.0), 1e-9));
    }

    #[test]
    fn test_polygon_flip_keeps_face() {
        let poly = triangle_at(0.0);
        let flipped = poly.flipped();
        assert_eq!(flipped.face(), 7);
        assert_eq!(flipped.vertices()[0], poly.vertices()[2]);
        assert!((flipped.plane().normal() + poly.plane().normal()).length() < 1e-12);
    }

    #[test]
    fn test_polygon_classify() {
        let plane = Plane::new(DVec3::Z, 0.0);
        assert_eq!(triangle_at(1.0).classify(&plane), Classification::Front);
        assert_eq!(triangle_at(-1.0).classify(&plane), Classification::Back);
        assert_eq!(triangle_at(0.0).classify(&plane), Classification::Coplanar);
    }

    #[test]
    fn test_polygon_split_spanning_keeps_face() {
        let poly = Polygon::new(
            vec![
                DVec3::new(0.0, 0.0, -1.0),
                DVec3::new(1.0, 0.0, -1.0),
                DVec3::new(0.5, 0.0, 1.0),
            ],
            3,
        )
        .unwrap();
        let plane = Plane::new(DVec3::Z, 0.0);

        let (mut cf, mut cb, mut f, mut b) = (Vec::new(), Vec::new(), Vec::new(), Vec::new());
        poly.split(&plane, &mut cf, &mut cb, &mut f, &mut b);

        assert_eq!(f.len(), 1);
        assert_eq!(b.len(), 1);
        assert!(f.iter().chain(b.iter()).all(|p| p.face() == 3));
    }

    #[test]
    fn test_polygon_fan_triangles() {
        let square = Polygon::new(
            vec![DVec3::ZERO, DVec3::X, DVec3::new(1.0, 1.0, 0.0), DVec3::Y],
            1,
        )
        .unwrap();
        assert_eq!(square.triangles().count(), 2);
    }
}
