//! Gradient-weighted class activation mapping.

use burn::prelude::*;

use crate::error::{ExplainError, Result};
use crate::saliency::SaliencyMap;

/// Compute the Grad-CAM saliency map for one captured forward/backward pair.
///
/// Per-channel importance weights are the spatial mean of the gradients;
/// the raw map is the weighted channel sum of the activations, rectified
/// to keep only positive contributions, then divided by its maximum. A raw
/// map that is entirely zero is returned as-is rather than divided by zero.
///
/// # Arguments
///
/// * `activations` - Target-layer output of shape `(1, channels, h, w)`
/// * `gradients` - Gradient of the target logit w.r.t. the activations,
///   same shape
///
/// # Errors
///
/// Returns [`ExplainError::SaliencyUnavailable`] if the shapes disagree or
/// the batch dimension is not 1.
pub fn grad_cam<B: Backend>(
    activations: Tensor<B, 4>,
    gradients: Tensor<B, 4>,
) -> Result<SaliencyMap> {
    let dims = activations.dims();
    let grad_dims = gradients.dims();
    if dims != grad_dims {
        return Err(ExplainError::SaliencyUnavailable(format!(
            "activation shape {dims:?} does not match gradient shape {grad_dims:?}"
        )));
    }
    let [batch, _channels, height, width] = dims;
    if batch != 1 {
        return Err(ExplainError::SaliencyUnavailable(format!(
            "expected a single-sample capture, got batch size {batch}"
        )));
    }

    // Global average pool the gradients: (1, C, H, W) -> (1, C, 1, 1)
    let weights = gradients.mean_dim(3).mean_dim(2);

    // Weighted channel sum: (1, C, H, W) * (1, C, 1, 1) -> (1, 1, H, W)
    let cam = (activations * weights).sum_dim(1);

    // Rectify: only positive contributions to the target class
    let cam = cam.clamp_min(0.0);

    let data = cam.reshape([height * width]).into_data();
    let mut values: Vec<f32> = data
        .as_slice::<f32>()
        .map_err(|e| {
            ExplainError::SaliencyUnavailable(format!("failed to read saliency data: {e:?}"))
        })?
        .to_vec();

    // Normalize by the maximum, unless the map is identically zero
    let max = values.iter().copied().fold(0.0f32, f32::max);
    if max > 0.0 {
        for v in &mut values {
            *v /= max;
        }
    }

    SaliencyMap::from_values(values, height, width)
}

#[cfg(test)]
mod tests {
    use super::*;
    use burn_ndarray::NdArray;

    type TestBackend = NdArray;

    #[test]
    fn test_shape_mismatch_is_rejected() {
        let device = Default::default();
        let activations = Tensor::<TestBackend, 4>::ones([1, 4, 5, 5], &device);
        let gradients = Tensor::<TestBackend, 4>::ones([1, 4, 3, 3], &device);
        assert!(grad_cam(activations, gradients).is_err());
    }

    #[test]
    fn test_batched_capture_is_rejected() {
        let device = Default::default();
        let activations = Tensor::<TestBackend, 4>::ones([2, 4, 5, 5], &device);
        let gradients = Tensor::<TestBackend, 4>::ones([2, 4, 5, 5], &device);
        assert!(grad_cam(activations, gradients).is_err());
    }

    #[test]
    fn test_uniform_positive_map_normalizes_to_one() {
        let device = Default::default();
        let activations = Tensor::<TestBackend, 4>::ones([1, 8, 7, 7], &device);
        let gradients = Tensor::<TestBackend, 4>::ones([1, 8, 7, 7], &device);

        let map = grad_cam(activations, gradients).unwrap();
        assert_eq!((map.height(), map.width()), (7, 7));
        for &v in map.values() {
            assert!((v - 1.0).abs() < 1e-6);
        }
    }

    #[test]
    fn test_zero_gradients_give_zero_map() {
        let device = Default::default();
        let activations = Tensor::<TestBackend, 4>::ones([1, 8, 7, 7], &device);
        let gradients = Tensor::<TestBackend, 4>::zeros([1, 8, 7, 7], &device);

        let map = grad_cam(activations, gradients).unwrap();
        assert!(map.is_all_zero());
    }

    #[test]
    fn test_negative_contributions_are_rectified() {
        let device = Default::default();
        let activations = Tensor::<TestBackend, 4>::ones([1, 2, 3, 3], &device);
        // Negative weights everywhere: the raw map is negative, rectified to zero
        let gradients = Tensor::<TestBackend, 4>::ones([1, 2, 3, 3], &device) * (-1.0);

        let map = grad_cam(activations, gradients).unwrap();
        assert!(map.is_all_zero());
    }

    #[test]
    fn test_values_in_unit_interval_with_max_one() {
        let device = Default::default();
        // Spatially varying activation so the normalized map has structure
        let data: Vec<f32> = (0..9).map(|i| i as f32).collect();
        let activations =
            Tensor::<TestBackend, 1>::from_floats(data.as_slice(), &device).reshape([1, 1, 3, 3]);
        let gradients = Tensor::<TestBackend, 4>::ones([1, 1, 3, 3], &device);

        let map = grad_cam(activations, gradients).unwrap();
        for &v in map.values() {
            assert!((0.0..=1.0).contains(&v));
        }
        assert!((map.max() - 1.0).abs() < 1e-6);
    }
}
