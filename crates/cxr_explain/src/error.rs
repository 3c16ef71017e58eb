//! Error types for saliency extraction.

use thiserror::Error;

/// Result type alias using [`ExplainError`].
pub type Result<T> = std::result::Result<T, ExplainError>;

/// Errors that can occur during saliency extraction.
#[derive(Error, Debug)]
pub enum ExplainError {
    /// The interception mechanism's invariants were violated: the target
    /// layer was never traversed, its gradient was never populated, or the
    /// captured tensors are inconsistent. Internal error, never silently
    /// degraded to a blank heatmap.
    #[error("Saliency unavailable: {0}")]
    SaliencyUnavailable(String),
}
