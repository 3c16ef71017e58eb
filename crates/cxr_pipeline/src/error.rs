//! Error type aggregating the pipeline stages.

use thiserror::Error;

/// Result type alias using [`PipelineError`].
pub type Result<T> = std::result::Result<T, PipelineError>;

/// Any error the analysis pipeline can surface.
#[derive(Error, Debug)]
pub enum PipelineError {
    /// Core invariant violation (shapes, probabilities).
    #[error(transparent)]
    Core(#[from] cxr_core::CoreError),

    /// Model weights could not be loaded or saved.
    #[error(transparent)]
    Model(#[from] cxr_models::ModelError),

    /// Saliency extraction failed.
    #[error(transparent)]
    Explain(#[from] cxr_explain::ExplainError),

    /// Image decode or encode failed.
    #[error(transparent)]
    Vision(#[from] cxr_vision::VisionError),
}
