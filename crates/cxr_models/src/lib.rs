//! # cxr_models
//!
//! Convolutional classifier architectures for cxr-rs.
//!
//! This crate provides:
//! - [`ChestResNet`]: a 2D residual CNN for multi-label radiograph
//!   classification, with its forward pass split at the last residual
//!   stage so the saliency extractor can intercept it
//! - Checkpoint save/load via Burn's record system

#![deny(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]

mod checkpoint;
mod error;
mod resnet;

pub use checkpoint::{load_weights, save_weights};
pub use error::{ModelError, Result};
pub use resnet::{ChestResNet, ChestResNetConfig, ResidualBlock2d};
