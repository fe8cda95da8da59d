//! # Spacecraft
//!
//! Far-field meshing scenarios for lunar spacecraft.
//!
//! Each scenario builds a vehicle (or a whole station) inside a large
//! bounding volume, cuts the vehicle out of it, and labels the result with
//! physical groups. The [`Scenario`] it returns carries the ordered sizing
//! plan; [`run`] applies it, meshes the far field and writes the files.
//!
//! | scenario | far field | outputs |
//! |---|---|---|
//! | [`blue_moon`] | cylinder standing on the lunar surface | `blue_moon.msh` |
//! | [`gateway`] | sphere | `gateway.brep`, `gateway.msh` |
//! | [`starship_hls`] | cylinder standing on the lunar surface | `fuselage.brep`, `starship_hls.brep`, `starship_hls.msh` |
//!
//! ## Example
//!
//! ```rust,no_run
//! use cad_kernel::Model;
//! use cad_mesh::MeshOptions;
//! use spacecraft::{blue_moon, run};
//!
//! let mut model = Model::new();
//! let scenario = blue_moon::build(&mut model).unwrap();
//! run(&mut model, &scenario, std::path::Path::new("."), &MeshOptions::default()).unwrap();
//! ```

pub mod blue_moon;
pub mod common;
pub mod error;
pub mod gateway;
mod pipeline;
pub mod starship_hls;

pub use common::{Scenario, Snapshot};
pub use error::{BuildError, BuildResult};
pub use pipeline::run;
