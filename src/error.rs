//! Error types for gridstore
//!
//! Provides a unified error type for all operations.

use std::collections::TryReserveError;

use thiserror::Error;

/// Result type alias using GridError
pub type Result<T> = std::result::Result<T, GridError>;

/// Unified error type for gridstore operations
#[derive(Debug, Error)]
pub enum GridError {
    // -------------------------------------------------------------------------
    // Allocation Errors
    // -------------------------------------------------------------------------
    #[error("allocation failed: {0}")]
    Allocation(String),

    // -------------------------------------------------------------------------
    // I/O Errors
    // -------------------------------------------------------------------------
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // -------------------------------------------------------------------------
    // Parse Errors
    // -------------------------------------------------------------------------
    #[error("parse error: {0}")]
    Parse(String),
}

impl From<TryReserveError> for GridError {
    fn from(err: TryReserveError) -> Self {
        GridError::Allocation(err.to_string())
    }
}
