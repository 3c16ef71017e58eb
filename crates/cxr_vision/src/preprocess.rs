//! Image-to-tensor preprocessing.

use burn::prelude::*;
use burn::tensor::TensorData;
use image::imageops::{self, FilterType};
use image::RgbImage;

use crate::error::{Result, VisionError};

/// Per-channel normalization mean (ImageNet convention, matching the
/// classifier's training-time distribution).
pub const IMAGENET_MEAN: [f32; 3] = [0.485, 0.456, 0.406];

/// Per-channel normalization standard deviation (ImageNet convention).
pub const IMAGENET_STD: [f32; 3] = [0.229, 0.224, 0.225];

/// Decode raw bytes into an RGB raster.
///
/// # Errors
///
/// Returns [`VisionError::ImageDecode`] if the bytes are not a readable
/// image.
pub fn decode_rgb(bytes: &[u8]) -> Result<RgbImage> {
    let image =
        image::load_from_memory(bytes).map_err(|e| VisionError::ImageDecode(e.to_string()))?;
    Ok(image.to_rgb8())
}

/// Transform a decoded RGB raster into a normalized `(1, 3, side, side)`
/// network input tensor.
///
/// Bilinear resize, scale into `[0, 1]`, then subtract the per-channel
/// mean and divide by the per-channel standard deviation. The transform is
/// fully deterministic.
pub fn preprocess<B: Backend>(image: &RgbImage, side: usize, device: &B::Device) -> Tensor<B, 4> {
    let resized = imageops::resize(image, side as u32, side as u32, FilterType::Triangle);

    let plane = side * side;
    let mut data = vec![0.0f32; 3 * plane];
    for (x, y, pixel) in resized.enumerate_pixels() {
        let offset = y as usize * side + x as usize;
        for c in 0..3 {
            let value = f32::from(pixel.0[c]) / 255.0;
            data[c * plane + offset] = (value - IMAGENET_MEAN[c]) / IMAGENET_STD[c];
        }
    }

    Tensor::from_data(TensorData::new(data, [1, 3, side, side]), device)
}
