//! Error types for model loading.

use thiserror::Error;

/// Result type alias using [`ModelError`].
pub type Result<T> = std::result::Result<T, ModelError>;

/// Errors that can occur when loading or saving model weights.
#[derive(Error, Debug)]
pub enum ModelError {
    /// The network weights are missing or corrupted. Fatal for the
    /// process, not retryable per request.
    #[error("Model unavailable: {0}")]
    Unavailable(String),

    /// Failed to save a checkpoint.
    #[error("Failed to save checkpoint: {0}")]
    Save(String),
}
