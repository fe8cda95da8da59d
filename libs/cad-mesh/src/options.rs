//! # Mesh Options
//!
//! Runtime knobs of the mesher. Defaults come from `config::constants`.

use config::constants::{
    DEFAULT_GRADING, DEFAULT_SIZE_FACTOR, DEFAULT_SIZE_MAX, DEFAULT_SIZE_MIN, MAX_EDGE_SUBDIVISIONS,
    MAX_ELEMENTS, MAX_OCTREE_DEPTH, MSH_FILE_VERSION,
};

/// Highest dimension of generated elements.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MeshDim {
    /// Triangles on every surface.
    Surface,
    /// Surface triangles plus hexahedra filling every volume.
    #[default]
    Volume,
}

/// Mesher configuration.
///
/// # Example
///
/// ```rust
/// use cad_mesh::{MeshDim, MeshOptions};
///
/// let options = MeshOptions::default().with_dimension(MeshDim::Surface);
/// assert_eq!(options.dimension, MeshDim::Surface);
/// assert_eq!(options.msh_version, 2.2);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct MeshOptions {
    pub dimension: MeshDim,
    /// Lower clamp of the size field.
    pub size_min: f64,
    /// Upper clamp of the size field.
    pub size_max: f64,
    /// Fraction of the model diagonal used when no point is sized.
    pub size_factor: f64,
    /// Growth of the size field per unit distance from a sized point.
    pub grading: f64,
    pub max_octree_depth: u32,
    pub max_edge_subdivisions: u32,
    pub max_elements: usize,
    pub msh_version: f64,
}

impl Default for MeshOptions {
    fn default() -> Self {
        Self {
            dimension: MeshDim::default(),
            size_min: DEFAULT_SIZE_MIN,
            size_max: DEFAULT_SIZE_MAX,
            size_factor: DEFAULT_SIZE_FACTOR,
            grading: DEFAULT_GRADING,
            max_octree_depth: MAX_OCTREE_DEPTH,
            max_edge_subdivisions: MAX_EDGE_SUBDIVISIONS,
            max_elements: MAX_ELEMENTS,
            msh_version: MSH_FILE_VERSION,
        }
    }
}

impl MeshOptions {
    pub fn with_dimension(mut self, dimension: MeshDim) -> Self {
        self.dimension = dimension;
        self
    }

    pub fn with_size_bounds(mut self, size_min: f64, size_max: f64) -> Self {
        self.size_min = size_min;
        self.size_max = size_max;
        self
    }

    pub fn with_max_octree_depth(mut self, depth: u32) -> Self {
        self.max_octree_depth = depth;
        self
    }

    pub fn with_max_elements(mut self, max_elements: usize) -> Self {
        self.max_elements = max_elements;
        self
    }
}
