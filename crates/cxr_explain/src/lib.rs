//! # cxr_explain
//!
//! Gradient-based saliency extraction for cxr-rs.
//!
//! This crate provides:
//! - [`CapturedForward`]: a forward pass re-rooted at the network's target
//!   layer, yielding logits plus a call-scoped activation handle
//! - [`grad_cam`]: gradient-weighted class activation mapping over the
//!   captured activation/gradient pair
//! - [`SaliencyMap`]: the normalized single-channel importance grid
//!
//! Instead of registering callbacks on a shared computation graph, the
//! capture re-roots the graph at the target layer's output: the activation
//! becomes an owned gradient-tracked leaf and the classification head runs
//! from that leaf. Both the activation and the gradient produced by the
//! targeted backward pass are plain owned values, dropped when the call
//! returns, so no per-request state can leak into the next request.

#![deny(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]

mod capture;
mod error;
mod gradcam;
mod saliency;

pub use capture::CapturedForward;
pub use error::{ExplainError, Result};
pub use gradcam::grad_cam;
pub use saliency::SaliencyMap;
