//! # Export
//!
//! Text export of model topology.

mod brep;

pub use brep::to_brep_string;
