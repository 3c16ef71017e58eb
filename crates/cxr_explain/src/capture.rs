//! Forward capture and targeted backward pass.

use burn::prelude::*;
use burn::tensor::activation::sigmoid;
use burn::tensor::backend::AutodiffBackend;

use cxr_core::SpatialClassifier;

use crate::error::{ExplainError, Result};

/// A forward pass re-rooted at the network's target layer.
///
/// The activation of the last convolutional block is detached from the
/// backbone's graph and re-tracked as a fresh leaf; the classification
/// head then runs from that leaf. Backpropagating a single logit therefore
/// stops exactly at the target layer, yielding the gradient map Grad-CAM
/// needs without walking the backbone.
///
/// Both handles are owned by this value. [`CapturedForward::backprop`]
/// consumes it, so neither the activation nor any gradient state can
/// outlive the request that produced them.
pub struct CapturedForward<B: AutodiffBackend> {
    logits: Tensor<B, 2>,
    activation: Tensor<B, 4>,
}

impl<B: AutodiffBackend> CapturedForward<B> {
    /// Run one forward pass, capturing the target-layer activation.
    pub fn run<M: SpatialClassifier<B>>(model: &M, input: Tensor<B, 4>) -> Self {
        let features = model.forward_features(input);
        let activation = features.detach().require_grad();
        let logits = model.forward_head(activation.clone());
        Self { logits, activation }
    }

    /// The pre-sigmoid logits of shape `(1, n_classes)`.
    #[must_use]
    pub fn logits(&self) -> &Tensor<B, 2> {
        &self.logits
    }

    /// Per-label sigmoid probabilities, read out of the graph.
    ///
    /// # Errors
    ///
    /// Returns [`ExplainError::SaliencyUnavailable`] if the logit data
    /// cannot be read back from the backend.
    pub fn probabilities(&self) -> Result<Vec<f32>> {
        let probs = sigmoid(self.logits.clone()).inner();
        let data = probs.into_data();
        let values = data
            .as_slice::<f32>()
            .map_err(|e| {
                ExplainError::SaliencyUnavailable(format!("failed to read logits: {e:?}"))
            })?
            .to_vec();
        Ok(values)
    }

    /// Backpropagate only the scalar logit of `class_index`.
    ///
    /// Consumes the capture and returns the `(activation, gradient)` pair
    /// on the inner (non-autodiff) backend; dropping them ends the
    /// request's gradient state.
    ///
    /// # Errors
    ///
    /// Returns [`ExplainError::SaliencyUnavailable`] if the class index is
    /// out of range or the target-layer gradient was never populated.
    pub fn backprop(
        self,
        class_index: usize,
    ) -> Result<(Tensor<B::InnerBackend, 4>, Tensor<B::InnerBackend, 4>)> {
        let [_, n_classes] = self.logits.dims();
        if class_index >= n_classes {
            return Err(ExplainError::SaliencyUnavailable(format!(
                "class index {class_index} out of range for {n_classes} classes"
            )));
        }

        // Isolate the one scalar that drives the visualization
        let score = self
            .logits
            .clone()
            .slice([0..1, class_index..class_index + 1]);
        let grads = score.backward();

        let gradient = self.activation.grad(&grads).ok_or_else(|| {
            ExplainError::SaliencyUnavailable(
                "target-layer gradient was never populated by the backward pass".to_string(),
            )
        })?;
        let activation = self.activation.inner();

        Ok((activation, gradient))
    }
}
