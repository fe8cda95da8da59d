//! # Config Crate
//!
//! Centralized configuration constants for the spacecraft meshing pipeline.
//! Tolerances, tessellation resolution and mesher limits are defined here so
//! the kernel, the mesher and the scenario builders agree on them.
//!
//! ## Usage
//!
//! ```rust
//! use config::constants::{CIRCLE_SEGMENTS, EPSILON};
//!
//! let value: f64 = 0.00000000001;
//! assert!(value.abs() < EPSILON);
//!
//! let angle_step = std::f64::consts::TAU / CIRCLE_SEGMENTS as f64;
//! assert!(angle_step > 0.0);
//! ```
//!
//! ## Design Principles
//!
//! - **Single Source of Truth**: All constants defined once, used everywhere
//! - **Model Units**: Lengths are in the model's length unit (metres in the
//!   spacecraft scenarios)
//! - **Well-Documented**: Every constant has clear documentation

pub mod constants;

#[cfg(test)]
mod tests;
