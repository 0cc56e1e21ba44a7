//! Error types for asset serialization.

use thiserror::Error;

/// Result type for asset serialization.
pub type WriteResult<T> = Result<T, WriteError>;

/// Errors that can occur while writing an asset.
#[derive(Debug, Error)]
pub enum WriteError {
    /// I/O error from the standard library.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization failed.
    #[error("JSON serialization failed: {0}")]
    Json(#[from] serde_json::Error),
}
