//! # cxr_core
//!
//! Core types for cxr-rs, an explainable chest radiograph triage pipeline.
//!
//! This crate provides:
//! - [`Label`]: the closed vocabulary of target findings, in output-layer order
//! - [`ProbabilityVector`]: validated multi-label probabilities
//! - [`PipelineConfig`]: the configuration consumed by the pipeline
//! - [`SpatialClassifier`]: the trait seam between the pipeline and the network
//! - Error types and common utilities
//!
//! ## Shape Convention
//!
//! Image tensors follow the convention `(B, C, H, W)`:
//! - `B`: Batch size (always 1 per request in this pipeline)
//! - `C`: Channels (3 for RGB input)
//! - `H`, `W`: Spatial dimensions

#![deny(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]

mod classifier;
mod config;
mod error;
mod label;
mod probability;

pub use classifier::SpatialClassifier;
pub use config::PipelineConfig;
pub use error::{CoreError, Result};
pub use label::Label;
pub use probability::{round4, ProbabilityVector};

/// Backend type aliases for convenience.
pub mod backend {
    pub use burn_autodiff::Autodiff;
    pub use burn_ndarray::NdArray;
}
