//! Pipeline configuration.

use serde::{Deserialize, Serialize};

/// Configuration consumed by the triage pipeline.
///
/// The defaults match the deployed system: 224x224 network input,
/// 512x512 visualization output, a single 0.5 decision threshold shared
/// between reporting and triage, and a 0.7/0.3 blend of original image
/// over heatmap.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// Side length of the square network input.
    pub input_size: usize,
    /// Side length of the square heatmap output.
    pub output_size: u32,
    /// Per-label decision threshold for the detected set.
    pub threshold: f32,
    /// Blend weight of the original image in the composite.
    pub image_weight: f32,
    /// Blend weight of the colorized heatmap in the composite.
    pub heatmap_weight: f32,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            input_size: 224,
            output_size: 512,
            threshold: 0.5,
            image_weight: 0.7,
            heatmap_weight: 0.3,
        }
    }
}

impl PipelineConfig {
    /// Create a config with the default constants.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the network input side length.
    #[must_use]
    pub fn with_input_size(mut self, input_size: usize) -> Self {
        self.input_size = input_size;
        self
    }

    /// Set the heatmap output side length.
    #[must_use]
    pub fn with_output_size(mut self, output_size: u32) -> Self {
        self.output_size = output_size;
        self
    }

    /// Set the decision threshold.
    #[must_use]
    pub fn with_threshold(mut self, threshold: f32) -> Self {
        self.threshold = threshold;
        self
    }

    /// Set the blend weights (original image, heatmap).
    #[must_use]
    pub fn with_blend(mut self, image_weight: f32, heatmap_weight: f32) -> Self {
        self.image_weight = image_weight;
        self.heatmap_weight = heatmap_weight;
        self
    }
}
