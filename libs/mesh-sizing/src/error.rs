//! # Sizing Errors

use cad_kernel::{ModelError, PhysicalGroup};
use thiserror::Error;

/// Result type for sizing operations.
pub type SizingResult<T> = Result<T, SizingError>;

/// Errors that can occur while sizing a physical group.
#[derive(Debug, Error)]
pub enum SizingError {
    /// Group is missing or not a surface group
    #[error("Invalid group {group}: {reason}")]
    InvalidGroup {
        group: PhysicalGroup,
        reason: &'static str,
    },

    /// Target size is not a positive finite number
    #[error("Invalid mesh size: {size}")]
    InvalidSize { size: f64 },

    /// Engine query or command failed
    #[error(transparent)]
    Engine(#[from] ModelError),
}

impl SizingError {
    /// Creates an invalid group error.
    pub fn invalid_group(group: PhysicalGroup, reason: &'static str) -> Self {
        Self::InvalidGroup { group, reason }
    }
}
