//! # cxr_vision
//!
//! Image preprocessing and heatmap compositing for cxr-rs.
//!
//! This crate provides:
//! - [`decode_rgb`] and [`preprocess`]: decoded RGB raster to normalized
//!   network input tensor
//! - [`render_heatmap`]: saliency grid to a jet-colored, alpha-blended,
//!   JPEG-encoded overlay ready for transport

#![deny(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]

mod error;
mod heatmap;
mod preprocess;

pub use error::{Result, VisionError};
pub use heatmap::{jet_color, render_heatmap, resize_bilinear, HeatmapImage};
pub use preprocess::{decode_rgb, preprocess, IMAGENET_MEAN, IMAGENET_STD};
