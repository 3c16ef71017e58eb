//! Classifier trait seam between the pipeline and the network.

use burn::prelude::*;

/// A convolutional multi-label classifier with an exposed target layer.
///
/// The pipeline never talks to a concrete architecture; it only needs a
/// forward pass split at the last convolutional block, so the saliency
/// extractor can re-root the computation graph at that block's output.
pub trait SpatialClassifier<B: Backend> {
    /// Expected side length of the square input.
    fn input_side(&self) -> usize;

    /// Number of output logits (one per target label).
    fn n_classes(&self) -> usize;

    /// Forward pass through the last convolutional block.
    ///
    /// Returns the target-layer activation of shape `(batch, channels, h', w')`.
    fn forward_features(&self, x: Tensor<B, 4>) -> Tensor<B, 4>;

    /// Forward pass from the target-layer activation to the logits.
    ///
    /// Returns logits of shape `(batch, n_classes)`.
    fn forward_head(&self, features: Tensor<B, 4>) -> Tensor<B, 2>;

    /// Full forward pass returning logits.
    fn forward(&self, x: Tensor<B, 4>) -> Tensor<B, 2> {
        self.forward_head(self.forward_features(x))
    }
}
