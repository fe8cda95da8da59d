//! # Mesh Sizing
//!
//! Assigns a target mesh size to every point on the boundary of a surface
//! physical group.
//!
//! ## Algorithm
//!
//! ```text
//! group -> member faces -> bounding curves -> bounding points -> set_size
//! ```
//!
//! Points are collected into an ordered set, so a point shared by several
//! faces of the group is sized once, and all of them receive the size in a
//! single engine call. Applying several groups is order-sensitive: a point
//! shared by two groups keeps the size of the group applied last.
//!
//! ## Example
//!
//! ```rust
//! use cad_kernel::{Dim, DimTag, Model};
//! use glam::DVec3;
//! use mesh_sizing::GroupMeshSizer;
//!
//! let mut model = Model::new();
//! let cylinder = model.add_cylinder(DVec3::ZERO, DVec3::Z, 1.0, None).unwrap();
//! let faces = model.adjacencies(DimTag::volume(cylinder)).unwrap().downward;
//! let group = model.add_physical_group(Dim::Surface, &faces, "Hull").unwrap();
//!
//! let sized = GroupMeshSizer::new(&mut model).apply_size(group, 0.3).unwrap();
//! assert_eq!(sized.len(), 2);
//! assert_eq!(model.size_of(sized[0].tag), Some(0.3));
//! ```

mod engine;
mod error;
mod plan;
mod sizer;

#[cfg(test)]
mod tests;

pub use engine::SizingEngine;
pub use error::{SizingError, SizingResult};
pub use plan::SizingPlan;
pub use sizer::GroupMeshSizer;
