//! # Mesh Generation Errors
//!
//! Error types for meshing and export.

use cad_kernel::ModelError;
use thiserror::Error;

/// Result type for meshing operations.
pub type MeshResult<T> = Result<T, MeshGenError>;

/// Errors that can occur while meshing or exporting a model.
#[derive(Debug, Error)]
pub enum MeshGenError {
    /// Model has nothing to mesh
    #[error("Model has no surfaces to mesh")]
    EmptyModel,

    /// Element budget exceeded
    #[error("Too many elements: {count} (max: {max})")]
    TooManyElements { count: usize, max: usize },

    /// Output extension not recognised
    #[error("Unsupported output format: {extension:?}")]
    UnsupportedFormat { extension: String },

    /// MSH version the writer cannot produce
    #[error("Unsupported MSH version {version}")]
    UnsupportedVersion { version: f64 },

    /// Mesh file requested without a mesh
    #[error("No mesh to write to {path}")]
    MissingMesh { path: String },

    /// Kernel query failed
    #[error("Model error: {0}")]
    Model(#[from] ModelError),

    /// I/O failure while writing
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl MeshGenError {
    /// Creates a too many elements error.
    pub fn too_many(count: usize, max: usize) -> Self {
        Self::TooManyElements { count, max }
    }
}
