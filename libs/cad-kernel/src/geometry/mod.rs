//! # Geometry
//!
//! Polygon-level geometry behind the topological model: planes, tagged
//! convex polygons, bounding boxes, the BSP boolean kernel, outline
//! triangulation and local frames.

pub mod bounds;
pub mod bsp;
pub mod frame;
pub mod plane;
pub mod polygon;
pub mod triangulate;

pub use bounds::Aabb;
pub use frame::Frame;
pub use plane::{Classification, Plane};
pub use polygon::Polygon;
