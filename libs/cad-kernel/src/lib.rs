//! # CAD Kernel
//!
//! A lightweight B-rep modelling kernel for building far-field meshing
//! geometry.
//!
//! ## Model
//!
//! - **Topology** is exact: primitives create points, curves, surfaces and
//!   volumes following OpenCASCADE conventions, so a cylinder has three
//!   faces, three curves and two points.
//! - **Geometry** is a set of convex planar polygons per volume, each tagged
//!   with the surface it belongs to. Booleans run a BSP-tree CSG over these
//!   polygons; a surface survives while any of its polygons does.
//!
//! ## Example
//!
//! ```rust
//! use cad_kernel::{Dim, DimTag, Model};
//! use glam::DVec3;
//!
//! let mut model = Model::new();
//! let outer = model.add_box(DVec3::ZERO, DVec3::splat(4.0)).unwrap();
//! let inner = model.add_sphere(DVec3::splat(2.0), 1.0).unwrap();
//! model.cut(&[DimTag::volume(outer)], &[DimTag::volume(inner)]).unwrap();
//!
//! // The box keeps its six faces and gains the sphere as a cavity wall.
//! let faces = model.adjacencies(DimTag::volume(outer)).unwrap().downward;
//! assert_eq!(faces.len(), 7);
//! assert!(model.entities(Some(Dim::Volume)).len() == 1);
//! ```

pub mod entity;
pub mod error;
pub mod geometry;
pub mod io;
pub mod model;
mod occ;
pub mod topology;

pub use entity::{Dim, DimTag, PhysicalGroup, Tag};
pub use error::ModelError;
pub use geometry::Aabb;
pub use model::{Adjacency, Model, ModelResult};
