//! # Mesh Data Structure
//!
//! Nodes and elements of a generated mesh. Every element records the model
//! entity it discretizes, so the exporter can group elements by physical
//! group.

use std::collections::HashMap;

use cad_kernel::{Dim, DimTag};
use config::constants::NODE_MERGE_QUANTUM;
use glam::DVec3;

/// Element shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementKind {
    /// 3-node triangle.
    Triangle,
    /// 8-node hexahedron.
    Hexahedron,
}

impl ElementKind {
    /// Element type number in the MSH format.
    pub fn msh_type(self) -> u32 {
        match self {
            ElementKind::Triangle => 2,
            ElementKind::Hexahedron => 5,
        }
    }

    pub fn node_count(self) -> usize {
        match self {
            ElementKind::Triangle => 3,
            ElementKind::Hexahedron => 8,
        }
    }

    /// Dimension of the element.
    pub fn dim(self) -> Dim {
        match self {
            ElementKind::Triangle => Dim::Surface,
            ElementKind::Hexahedron => Dim::Volume,
        }
    }
}

/// One mesh element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    pub kind: ElementKind,
    /// Model entity the element belongs to.
    pub entity: DimTag,
    /// Zero-based node indices.
    pub nodes: Vec<usize>,
}

/// A mesh of triangles and hexahedra.
///
/// # Example
///
/// ```rust
/// use cad_kernel::DimTag;
/// use cad_mesh::{ElementKind, Mesh};
/// use glam::DVec3;
///
/// let mut mesh = Mesh::new();
/// let a = mesh.add_node(DVec3::ZERO);
/// let b = mesh.add_node(DVec3::X);
/// let c = mesh.add_node(DVec3::Y);
/// mesh.add_element(ElementKind::Triangle, DimTag::surface(1), vec![a, b, c]);
/// assert_eq!(mesh.element_count(), 1);
/// assert_eq!(mesh.edge_lengths(ElementKind::Triangle).count(), 3);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Mesh {
    nodes: Vec<DVec3>,
    elements: Vec<Element>,
}

impl Mesh {
    /// Creates an empty mesh.
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    #[inline]
    pub fn element_count(&self) -> usize {
        self.elements.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    #[inline]
    pub fn nodes(&self) -> &[DVec3] {
        &self.nodes
    }

    #[inline]
    pub fn elements(&self) -> &[Element] {
        &self.elements
    }

    /// Adds a node without merging and returns its index.
    pub fn add_node(&mut self, position: DVec3) -> usize {
        self.nodes.push(position);
        self.nodes.len() - 1
    }

    /// Adds an element over existing nodes.
    pub fn add_element(&mut self, kind: ElementKind, entity: DimTag, nodes: Vec<usize>) {
        debug_assert_eq!(nodes.len(), kind.node_count());
        self.elements.push(Element { kind, entity, nodes });
    }

    /// Elements discretizing one entity.
    pub fn elements_of(&self, entity: DimTag) -> impl Iterator<Item = &Element> + '_ {
        self.elements.iter().filter(move |e| e.entity == entity)
    }

    /// Number of elements of one kind.
    pub fn count_of(&self, kind: ElementKind) -> usize {
        self.elements.iter().filter(|e| e.kind == kind).count()
    }

    /// Lengths of the edges of every element of one kind.
    ///
    /// Shared edges are reported once per element.
    pub fn edge_lengths(&self, kind: ElementKind) -> impl Iterator<Item = f64> + '_ {
        const TRIANGLE: &[(usize, usize)] = &[(0, 1), (1, 2), (2, 0)];
        #[rustfmt::skip]
        const HEXAHEDRON: &[(usize, usize)] = &[
            (0, 1), (1, 2), (2, 3), (3, 0),
            (4, 5), (5, 6), (6, 7), (7, 4),
            (0, 4), (1, 5), (2, 6), (3, 7),
        ];
        let edges = match kind {
            ElementKind::Triangle => TRIANGLE,
            ElementKind::Hexahedron => HEXAHEDRON,
        };
        self.elements
            .iter()
            .filter(move |e| e.kind == kind)
            .flat_map(move |e| {
                edges
                    .iter()
                    .map(move |&(a, b)| self.nodes[e.nodes[a]].distance(self.nodes[e.nodes[b]]))
            })
    }
}

/// Merges nodes whose positions coincide on a quantized grid.
#[derive(Debug, Default)]
pub(crate) struct NodeIndex {
    lookup: HashMap<[i64; 3], usize>,
}

impl NodeIndex {
    fn key(p: DVec3) -> [i64; 3] {
        let q = |v: f64| (v / NODE_MERGE_QUANTUM).round() as i64;
        [q(p.x), q(p.y), q(p.z)]
    }

    /// Index of the node at `p`, adding it to the mesh if new.
    pub(crate) fn insert(&mut self, mesh: &mut Mesh, p: DVec3) -> usize {
        *self
            .lookup
            .entry(Self::key(p))
            .or_insert_with(|| mesh.add_node(p))
    }
}
