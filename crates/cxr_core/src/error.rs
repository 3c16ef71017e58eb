//! Error types for cxr_core.

use thiserror::Error;

/// Result type alias using [`CoreError`].
pub type Result<T> = std::result::Result<T, CoreError>;

/// Core errors that can occur in cxr_core operations.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Shape mismatch between a tensor and what the network expects.
    #[error("Shape mismatch: expected {expected}, got {got}")]
    ShapeMismatch {
        /// Expected shape description.
        expected: String,
        /// Actual shape description.
        got: String,
    },

    /// A probability value violated its invariants (NaN or out of range).
    #[error("Invalid probability: {0}")]
    InvalidProbability(String),

    /// Generic error.
    #[error("{0}")]
    Other(String),
}
