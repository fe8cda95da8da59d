//! # Construction Operations
//!
//! OpenCASCADE-style modelling on [`Model`](crate::Model): bottom-up
//! builders, primitive solids, sweeps, booleans and transforms. Each
//! submodule adds an `impl Model` block.

mod boolean;
mod builders;
mod primitives;
mod sweep;
mod transform;

#[cfg(test)]
mod tests;
