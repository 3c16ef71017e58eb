//! # cxr_pipeline
//!
//! End-to-end radiograph analysis for cxr-rs.
//!
//! [`Pipeline`] wires the stages together: decode and preprocess the
//! image, run the classifier with the target layer captured, backpropagate
//! the top logit into a Grad-CAM saliency map, composite the heatmap
//! overlay, apply the triage rules and compose the narrative. The result
//! is a single serializable [`AnalysisReport`].
//!
//! A heatmap failure degrades the report (the overlay is omitted and the
//! failure noted) instead of failing the analysis; every other stage error
//! propagates.

#![deny(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]

mod error;
mod pipeline;
mod report;

pub use error::{PipelineError, Result};
pub use pipeline::Pipeline;
pub use report::{AnalysisReport, LabelScore, ReportMetadata};
