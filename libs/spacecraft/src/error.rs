//! # Build Errors

use cad_kernel::ModelError;
use cad_mesh::MeshGenError;
use mesh_sizing::SizingError;
use thiserror::Error;

/// Result type for scenario construction.
pub type BuildResult<T> = Result<T, BuildError>;

/// Errors that can occur while building, sizing or exporting a scenario.
#[derive(Debug, Error)]
pub enum BuildError {
    /// Modelling operation failed
    #[error("Model error: {0}")]
    Model(#[from] ModelError),

    /// Mesh size assignment failed
    #[error("Sizing error: {0}")]
    Sizing(#[from] SizingError),

    /// Meshing or export failed
    #[error("Mesh error: {0}")]
    Mesh(#[from] MeshGenError),

    /// Operation did not produce the expected entity
    #[error("{operation} produced no {expected}")]
    MissingResult {
        operation: &'static str,
        expected: &'static str,
    },

    /// I/O failure while writing snapshots
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl BuildError {
    /// Creates a missing result error.
    pub fn missing(operation: &'static str, expected: &'static str) -> Self {
        Self::MissingResult { operation, expected }
    }
}
