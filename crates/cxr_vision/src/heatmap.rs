//! Heatmap colorization, compositing and transport encoding.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use image::codecs::jpeg::JpegEncoder;
use image::imageops::{self, FilterType};
use image::{ExtendedColorType, Rgb, RgbImage};

use cxr_core::PipelineConfig;
use cxr_explain::SaliencyMap;

use crate::error::{Result, VisionError};

/// JPEG quality for the encoded overlay.
const JPEG_QUALITY: u8 = 90;

/// A composited heatmap overlay, JPEG-encoded.
#[derive(Debug, Clone)]
pub struct HeatmapImage {
    jpeg: Vec<u8>,
}

impl HeatmapImage {
    /// The compressed JPEG bytes.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.jpeg
    }

    /// Transport-safe base64 encoding of the JPEG bytes.
    #[must_use]
    pub fn to_base64(&self) -> String {
        STANDARD.encode(&self.jpeg)
    }
}

/// Map an 8-bit intensity onto a jet-style palette (blue = low, red = high).
#[must_use]
pub fn jet_color(value: u8) -> [u8; 3] {
    let t = f32::from(value) / 255.0;
    let channel = |v: f32| (v.clamp(0.0, 1.0) * 255.0).round() as u8;
    [
        channel(1.5 - (4.0 * t - 3.0).abs()),
        channel(1.5 - (4.0 * t - 2.0).abs()),
        channel(1.5 - (4.0 * t - 1.0).abs()),
    ]
}

/// Bilinearly resize a saliency grid to `out_width` x `out_height`,
/// returned row-major.
#[must_use]
pub fn resize_bilinear(map: &SaliencyMap, out_width: u32, out_height: u32) -> Vec<f32> {
    let (in_h, in_w) = (map.height(), map.width());
    let (out_w, out_h) = (out_width as usize, out_height as usize);
    let mut out = vec![0.0f32; out_w * out_h];

    if in_h == 0 || in_w == 0 {
        return out;
    }

    let scale_y = in_h as f32 / out_h as f32;
    let scale_x = in_w as f32 / out_w as f32;

    for oy in 0..out_h {
        // Align sample centers between the two grids
        let sy = ((oy as f32 + 0.5) * scale_y - 0.5).max(0.0);
        let y0 = (sy as usize).min(in_h - 1);
        let y1 = (y0 + 1).min(in_h - 1);
        let fy = sy - y0 as f32;

        for ox in 0..out_w {
            let sx = ((ox as f32 + 0.5) * scale_x - 0.5).max(0.0);
            let x0 = (sx as usize).min(in_w - 1);
            let x1 = (x0 + 1).min(in_w - 1);
            let fx = sx - x0 as f32;

            let top = map.value(y0, x0) * (1.0 - fx) + map.value(y0, x1) * fx;
            let bottom = map.value(y1, x0) * (1.0 - fx) + map.value(y1, x1) * fx;
            out[oy * out_w + ox] = top * (1.0 - fy) + bottom * fy;
        }
    }

    out
}

/// Render the saliency map as a colorized overlay on the original image.
///
/// The saliency grid is resized to the configured output resolution,
/// quantized to 8 bits, pushed through the jet palette, and alpha-blended
/// over the resized original with the configured weights. The composite is
/// JPEG-compressed for transport.
///
/// # Errors
///
/// Returns [`VisionError::Encoding`] if JPEG compression fails.
pub fn render_heatmap(
    map: &SaliencyMap,
    original: &RgbImage,
    config: &PipelineConfig,
) -> Result<HeatmapImage> {
    let side = config.output_size;
    let saliency = resize_bilinear(map, side, side);
    let base = imageops::resize(original, side, side, FilterType::Triangle);

    let mut composite = RgbImage::new(side, side);
    for (x, y, pixel) in composite.enumerate_pixels_mut() {
        let value = saliency[y as usize * side as usize + x as usize];
        let intensity = (value.clamp(0.0, 1.0) * 255.0).round() as u8;
        let heat = jet_color(intensity);
        let source = base.get_pixel(x, y).0;

        let mut blended = [0u8; 3];
        for c in 0..3 {
            let mixed = f32::from(source[c]) * config.image_weight
                + f32::from(heat[c]) * config.heatmap_weight;
            blended[c] = mixed.round().clamp(0.0, 255.0) as u8;
        }
        *pixel = Rgb(blended);
    }

    let mut jpeg = Vec::new();
    JpegEncoder::new_with_quality(&mut jpeg, JPEG_QUALITY)
        .encode(
            composite.as_raw(),
            side,
            side,
            ExtendedColorType::Rgb8,
        )
        .map_err(|e| VisionError::Encoding(e.to_string()))?;

    Ok(HeatmapImage { jpeg })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn uniform_map(value: f32, side: usize) -> SaliencyMap {
        SaliencyMap::from_values(vec![value; side * side], side, side).unwrap()
    }

    #[test]
    fn test_jet_palette_endpoints() {
        // Low end is blue-dominant, high end is red-dominant
        let low = jet_color(0);
        assert!(low[2] > low[0] && low[2] > low[1]);

        let high = jet_color(255);
        assert!(high[0] > high[1] && high[0] > high[2]);

        // Midpoint is green-dominant
        let mid = jet_color(128);
        assert!(mid[1] >= mid[0] && mid[1] >= mid[2]);
    }

    #[test]
    fn test_resize_preserves_uniform_values() {
        let map = uniform_map(0.25, 7);
        let resized = resize_bilinear(&map, 32, 32);
        assert_eq!(resized.len(), 32 * 32);
        for v in resized {
            assert!((v - 0.25).abs() < 1e-5);
        }
    }

    #[test]
    fn test_resize_interpolates_between_corners() {
        let map = SaliencyMap::from_values(vec![0.0, 1.0, 0.0, 1.0], 2, 2).unwrap();
        let resized = resize_bilinear(&map, 8, 8);
        // Left edge stays low, right edge stays high
        assert!(resized[0] < 0.2);
        assert!(resized[7] > 0.8);
        for v in resized {
            assert!((0.0..=1.0).contains(&v));
        }
    }

    #[test]
    fn test_render_produces_decodable_jpeg() {
        let config = PipelineConfig::default().with_output_size(64);
        let original = RgbImage::from_pixel(100, 80, Rgb([200, 200, 200]));
        let map = uniform_map(0.5, 7);

        let heatmap = render_heatmap(&map, &original, &config).unwrap();
        assert!(!heatmap.as_bytes().is_empty());
        assert!(!heatmap.to_base64().is_empty());

        let decoded = image::load_from_memory(heatmap.as_bytes()).unwrap();
        assert_eq!(decoded.width(), 64);
        assert_eq!(decoded.height(), 64);
    }

    #[test]
    fn test_blend_weights_are_applied() {
        // All-zero saliency over a white image: the overlay darkens every
        // pixel toward the palette's low end by the heatmap weight
        let config = PipelineConfig::default().with_output_size(16);
        let original = RgbImage::from_pixel(16, 16, Rgb([255, 255, 255]));
        let map = uniform_map(0.0, 4);

        let heatmap = render_heatmap(&map, &original, &config).unwrap();
        let decoded = image::load_from_memory(heatmap.as_bytes())
            .unwrap()
            .to_rgb8();
        let pixel = decoded.get_pixel(8, 8).0;

        // Red channel: 255 * 0.7 + 0 * 0.3 = ~179 (JPEG adds small error)
        assert!((f32::from(pixel[0]) - 178.5).abs() < 12.0);
    }
}
