//! The analysis pipeline.

use std::marker::PhantomData;

use burn::tensor::backend::AutodiffBackend;
use image::RgbImage;
use tracing::{debug, info, warn};

use cxr_clinical::{classify, narrate};
use cxr_core::{round4, CoreError, Label, PipelineConfig, ProbabilityVector, SpatialClassifier};
use cxr_explain::{grad_cam, CapturedForward};
use cxr_vision::{decode_rgb, preprocess, render_heatmap};

use crate::error::Result;
use crate::report::{AnalysisReport, ReportMetadata};

/// The end-to-end analysis pipeline.
///
/// Owns a classifier and a configuration; each [`Pipeline::analyze`] call
/// is independent, so a shared pipeline can serve requests sequentially
/// without carrying state between them.
pub struct Pipeline<B, M>
where
    B: AutodiffBackend,
    M: SpatialClassifier<B>,
{
    model: M,
    config: PipelineConfig,
    device: B::Device,
    _backend: PhantomData<B>,
}

impl<B, M> Pipeline<B, M>
where
    B: AutodiffBackend,
    M: SpatialClassifier<B>,
{
    /// Create a pipeline around a classifier.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::ShapeMismatch`] if the classifier's input side
    /// or output width disagrees with the configuration and label set.
    pub fn new(model: M, config: PipelineConfig, device: B::Device) -> Result<Self> {
        if model.input_side() != config.input_size {
            return Err(CoreError::ShapeMismatch {
                expected: format!("input side {}", config.input_size),
                got: format!("input side {}", model.input_side()),
            }
            .into());
        }
        if model.n_classes() != Label::COUNT {
            return Err(CoreError::ShapeMismatch {
                expected: format!("{} output logits", Label::COUNT),
                got: format!("{} output logits", model.n_classes()),
            }
            .into());
        }
        Ok(Self {
            model,
            config,
            device,
            _backend: PhantomData,
        })
    }

    /// The pipeline's configuration.
    #[must_use]
    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Decode raw image bytes and analyze the radiograph.
    ///
    /// # Errors
    ///
    /// Returns [`cxr_vision::VisionError::ImageDecode`] for unreadable
    /// bytes, otherwise whatever [`Pipeline::analyze`] returns.
    pub fn analyze_bytes(&self, bytes: &[u8]) -> Result<AnalysisReport> {
        let image = decode_rgb(bytes)?;
        self.analyze(&image)
    }

    /// Analyze one decoded radiograph.
    ///
    /// Runs preprocessing, captured inference, saliency extraction,
    /// heatmap compositing, triage and narrative generation. A heatmap
    /// failure is recorded in the report instead of failing the call.
    pub fn analyze(&self, image: &RgbImage) -> Result<AnalysisReport> {
        let audit_id = new_audit_id();
        info!(%audit_id, "starting radiograph analysis");

        let input = preprocess::<B>(image, self.config.input_size, &self.device);

        let captured = CapturedForward::run(&self.model, input);
        let probabilities = ProbabilityVector::from_scores(captured.probabilities()?)?;
        let (top_label, top_score) = probabilities.top();
        debug!(%audit_id, finding = %top_label, confidence = top_score, "inference complete");

        let (activation, gradient) = captured.backprop(top_label.index())?;
        let saliency = grad_cam(activation, gradient)?;

        let triage = classify(&probabilities, self.config.threshold);
        let narrative = narrate(top_label, top_score, &triage);
        debug!(%audit_id, level = %triage.level, "triage assigned");

        let (heatmap_base64, heatmap_error) =
            match render_heatmap(&saliency, image, &self.config) {
                Ok(heatmap) => (Some(heatmap.to_base64()), None),
                Err(e) => {
                    warn!(%audit_id, error = %e, "heatmap rendering failed, report degrades");
                    (None, Some(e.to_string()))
                }
            };

        info!(%audit_id, level = %triage.level, "analysis complete");
        Ok(AnalysisReport {
            audit_id,
            predictions: AnalysisReport::predictions_from(&probabilities),
            top_label,
            top_confidence: round4(top_score),
            triage,
            narrative,
            heatmap_base64,
            heatmap_error,
            metadata: ReportMetadata::for_backend(B::name()),
        })
    }
}

/// Mint a fresh audit identifier, `CXR-` plus 8 uppercase hex digits.
fn new_audit_id() -> String {
    format!("CXR-{:08X}", rand::random::<u32>())
}
