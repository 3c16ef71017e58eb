//! Error types for image handling.

use thiserror::Error;

/// Result type alias using [`VisionError`].
pub type Result<T> = std::result::Result<T, VisionError>;

/// Errors that can occur while decoding or encoding images.
#[derive(Error, Debug)]
pub enum VisionError {
    /// The input bytes could not be interpreted as an RGB image.
    /// Surfaced to the caller, never retried.
    #[error("Image decode failed: {0}")]
    ImageDecode(String),

    /// The composited heatmap could not be compressed or encoded.
    /// The numeric/triage branch of the pipeline is unaffected.
    #[error("Image encode failed: {0}")]
    Encoding(String),
}
