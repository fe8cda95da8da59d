//! # Model Errors
//!
//! Error types for modelling operations.

use crate::entity::{Dim, DimTag, PhysicalGroup, Tag};
use thiserror::Error;

/// Errors that can occur while building or querying a model.
#[derive(Debug, Error)]
pub enum ModelError {
    /// Entity does not exist (never created, or removed)
    #[error("Unknown entity {entity}")]
    UnknownEntity { entity: DimTag },

    /// Construction loop does not exist
    #[error("Unknown {kind} loop {tag}")]
    UnknownLoop { kind: &'static str, tag: Tag },

    /// Entity has the wrong dimension for the operation
    #[error("Entity {entity} has wrong dimension (expected {expected})")]
    WrongDimension { entity: DimTag, expected: Dim },

    /// Degenerate geometry
    #[error("Degenerate geometry: {message}")]
    DegenerateGeometry { message: String },

    /// Boolean operation failed
    #[error("Boolean operation failed: {message}")]
    BooleanFailed { message: String },

    /// Unsupported operation
    #[error("Unsupported: {message}")]
    Unsupported { message: String },

    /// Physical group does not exist
    #[error("Unknown {group}")]
    UnknownGroup { group: PhysicalGroup },

    /// Mesh size must be positive and finite
    #[error("Invalid mesh size: {size}")]
    InvalidSize { size: f64 },

    /// I/O failure while exporting
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Text rendering failed
    #[error("Format error: {0}")]
    Format(#[from] std::fmt::Error),
}

impl ModelError {
    /// Creates an unknown entity error.
    pub fn unknown(entity: DimTag) -> Self {
        Self::UnknownEntity { entity }
    }

    /// Creates a wrong dimension error.
    pub fn wrong_dimension(entity: DimTag, expected: Dim) -> Self {
        Self::WrongDimension { entity, expected }
    }

    /// Creates a degenerate geometry error.
    pub fn degenerate(message: impl Into<String>) -> Self {
        Self::DegenerateGeometry {
            message: message.into(),
        }
    }

    /// Creates a boolean operation failed error.
    pub fn boolean_failed(message: impl Into<String>) -> Self {
        Self::BooleanFailed {
            message: message.into(),
        }
    }

    /// Creates an unsupported operation error.
    pub fn unsupported(message: impl Into<String>) -> Self {
        Self::Unsupported {
            message: message.into(),
        }
    }
}
