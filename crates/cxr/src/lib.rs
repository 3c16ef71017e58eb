//! # cxr
//!
//! Explainable chest radiograph triage in Rust.
//!
//! cxr-rs analyzes a chest X-ray image end to end:
//!
//! - **Preprocessing**: decode, resize and normalize into a network input
//! - **Inference**: multi-label residual CNN, one sigmoid per finding
//! - **Explainability**: Grad-CAM saliency for the top finding
//! - **Visualization**: jet-colored heatmap blended over the radiograph
//! - **Triage**: rule-based urgency tiers with recommended actions
//! - **Narrative**: a plain-language summary paragraph
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use cxr::prelude::*;
//!
//! type B = backend::Autodiff<backend::NdArray>;
//!
//! let device = Default::default();
//! let model = ChestResNetConfig::new(Label::COUNT).init::<B>(&device);
//! let model = load_weights::<B, _>(model, "weights/chest.mpk", &device)?;
//!
//! let pipeline = Pipeline::new(model, PipelineConfig::default(), device)?;
//! let report = pipeline.analyze_bytes(&std::fs::read("scan.png")?)?;
//!
//! println!("{}: {}", report.triage.level, report.narrative);
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]

// Re-export all crates
pub use cxr_clinical as clinical;
pub use cxr_core as core;
pub use cxr_explain as explain;
pub use cxr_models as models;
pub use cxr_pipeline as pipeline;
pub use cxr_vision as vision;

/// Prelude module for convenient imports.
///
/// ```rust,ignore
/// use cxr::prelude::*;
/// ```
pub mod prelude {
    // Core types
    pub use cxr_core::{backend, Label, PipelineConfig, ProbabilityVector, SpatialClassifier};

    // Models
    pub use cxr_models::{load_weights, save_weights, ChestResNet, ChestResNetConfig};

    // Explainability
    pub use cxr_explain::{grad_cam, CapturedForward, SaliencyMap};

    // Vision
    pub use cxr_vision::{decode_rgb, preprocess, render_heatmap, HeatmapImage};

    // Clinical rules
    pub use cxr_clinical::{classify, narrate, TriageLevel, TriageResult};

    // Pipeline
    pub use cxr_pipeline::{AnalysisReport, Pipeline, PipelineError};
}
