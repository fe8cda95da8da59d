//! # BSP Tree
//!
//! Binary Space Partitioning tree for CSG boolean operations, following the
//! csg.js algorithm by Evan Wallace.
//!
//! ## Layout
//!
//! Nodes live in a flat arena and refer to their children by index. Every
//! traversal walks an explicit work stack, so deep trees built from finely
//! tessellated solids never recurse.
//!
//! ## Operations
//!
//! - `clip_polygons`: Remove the parts of polygons that lie inside the tree
//! - `union` / `subtract`: Booleans over closed polygon sets

use super::bounds::Aabb;
use super::plane::Plane;
use super::polygon::Polygon;

/// A node of the tree: a splitting plane and the polygons lying on it.
#[derive(Debug, Clone, Default)]
struct Node {
    plane: Option<Plane>,
    polygons: Vec<Polygon>,
    front: Option<usize>,
    back: Option<usize>,
}

/// BSP tree over convex polygons.
#[derive(Debug, Clone)]
pub struct BspTree {
    nodes: Vec<Node>,
}

impl BspTree {
    /// Builds a tree from a polygon soup.
    pub fn new(polygons: Vec<Polygon>) -> Self {
        let mut tree = Self {
            nodes: vec![Node::default()],
        };
        tree.build(polygons);
        tree
    }

    /// Inserts polygons into the tree, creating nodes as needed.
    pub fn build(&mut self, polygons: Vec<Polygon>) {
        let mut work: Vec<(usize, Vec<Polygon>)> = vec![(0, polygons)];

        while let Some((index, polygons)) = work.pop() {
            let Some(first) = polygons.first() else {
                continue;
            };
            let plane = match self.nodes[index].plane {
                Some(plane) => plane,
                None => {
                    let plane = *first.plane();
                    self.nodes[index].plane = Some(plane);
                    plane
                }
            };

            let mut coplanar_front = Vec::new();
            let mut coplanar_back = Vec::new();
            let mut front = Vec::new();
            let mut back = Vec::new();
            for polygon in polygons {
                polygon.split(
                    &plane,
                    &mut coplanar_front,
                    &mut coplanar_back,
                    &mut front,
                    &mut back,
                );
            }

            let node = &mut self.nodes[index];
            node.polygons.append(&mut coplanar_front);
            node.polygons.append(&mut coplanar_back);

            if !front.is_empty() {
                let child = self.child(index, true);
                work.push((child, front));
            }
            if !back.is_empty() {
                let child = self.child(index, false);
                work.push((child, back));
            }
        }
    }

    /// Returns the front or back child of a node, creating it if missing.
    fn child(&mut self, index: usize, front: bool) -> usize {
        let existing = if front {
            self.nodes[index].front
        } else {
            self.nodes[index].back
        };
        if let Some(child) = existing {
            return child;
        }

        let child = self.nodes.len();
        self.nodes.push(Node::default());
        if front {
            self.nodes[index].front = Some(child);
        } else {
            self.nodes[index].back = Some(child);
        }
        child
    }

    /// Removes the parts of `polygons` that are inside this tree.
    pub fn clip_polygons(&self, polygons: Vec<Polygon>) -> Vec<Polygon> {
        let mut result = Vec::new();
        let mut work: Vec<(usize, Vec<Polygon>)> = vec![(0, polygons)];

        while let Some((index, polygons)) = work.pop() {
            let node = &self.nodes[index];
            let Some(plane) = node.plane else {
                result.extend(polygons);
                continue;
            };

            let mut coplanar_front = Vec::new();
            let mut coplanar_back = Vec::new();
            let mut front = Vec::new();
            let mut back = Vec::new();
            for polygon in polygons {
                polygon.split(
                    &plane,
                    &mut coplanar_front,
                    &mut coplanar_back,
                    &mut front,
                    &mut back,
                );
            }
            front.append(&mut coplanar_front);
            back.append(&mut coplanar_back);

            match node.front {
                Some(child) => work.push((child, front)),
                None => result.extend(front),
            }
            // Polygons falling behind a leaf are inside the solid.
            if let Some(child) = node.back {
                work.push((child, back));
            }
        }

        result
    }
}

// =============================================================================
// BOOLEANS
// =============================================================================

/// Margin used when deciding whether a polygon can touch the other operand.
const NEAR_MARGIN: f64 = 1e-4;

/// Splits polygons into those whose bounds touch `bounds` and the rest.
fn partition(polygons: Vec<Polygon>, bounds: &Aabb) -> (Vec<Polygon>, Vec<Polygon>) {
    polygons.into_iter().partition(|polygon| {
        Aabb::from_points(polygon.vertices().iter().copied()).overlaps(bounds, NEAR_MARGIN)
    })
}

fn flipped(polygons: Vec<Polygon>) -> Vec<Polygon> {
    polygons
        .into_iter()
        .map(|mut polygon| {
            polygon.flip();
            polygon
        })
        .collect()
}

/// Union of two closed polygon sets.
///
/// Polygons of one operand that lie outside the other's bounding box are
/// passed through untouched, so repeated booleans on a large solid only
/// fragment the region they actually modify.
pub fn union(a: Vec<Polygon>, b: Vec<Polygon>) -> Vec<Polygon> {
    if a.is_empty() {
        return b;
    }
    if b.is_empty() {
        return a;
    }

    let bounds_a = Aabb::from_polygons(&a);
    let bounds_b = Aabb::from_polygons(&b);
    let tree_a = BspTree::new(a.clone());
    let tree_b = BspTree::new(b.clone());
    let (a_near, mut result) = partition(a, &bounds_b);
    let (b_near, b_far) = partition(b, &bounds_a);

    // Parts of A outside B.
    result.extend(tree_b.clip_polygons(a_near));
    // Parts of B outside A; the inverted pass drops faces coplanar with A.
    let b_outside = tree_a.clip_polygons(b_near);
    result.extend(flipped(tree_a.clip_polygons(flipped(b_outside))));
    result.extend(b_far);
    result
}

/// Difference `a - b` of two closed polygon sets.
///
/// Surviving faces of `b` bound the cavity and face into it.
pub fn subtract(a: Vec<Polygon>, b: Vec<Polygon>) -> Vec<Polygon> {
    if a.is_empty() || b.is_empty() {
        return a;
    }

    let bounds_a = Aabb::from_polygons(&a);
    let bounds_b = Aabb::from_polygons(&b);
    if !bounds_a.overlaps(&bounds_b, NEAR_MARGIN) {
        return a;
    }

    let tree_a_inverted = BspTree::new(flipped(a.clone()));
    let tree_b = BspTree::new(b.clone());
    let (a_near, mut result) = partition(a, &bounds_b);
    // Faces of B outside A never bound the difference.
    let (b_near, _) = partition(b, &bounds_a);

    // Parts of A outside B.
    result.extend(flipped(tree_b.clip_polygons(flipped(a_near))));
    // Parts of B inside A, turned to face into the cavity.
    let b_inside = tree_a_inverted.clip_polygons(b_near);
    let b_inside = flipped(tree_a_inverted.clip_polygons(flipped(b_inside)));
    result.extend(flipped(b_inside));
    result
}

// =============================================================================
// TESTS
// =============================================================================
