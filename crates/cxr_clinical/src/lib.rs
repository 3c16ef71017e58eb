//! # cxr_clinical
//!
//! Rule-based triage and narrative generation for cxr-rs.
//!
//! This crate turns a per-label probability vector into:
//! - a [`TriageResult`]: urgency level, recommended action, display color
//! - a one-paragraph plain-language [`narrate`] summary of the top finding
//!
//! The rules are a fixed lookup, not a model: given the same probabilities
//! the output is always the same.

#![deny(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]

mod narrative;
mod triage;

pub use narrative::{description, narrate};
pub use triage::{classify, TriageLevel, TriageResult, CRITICAL_LABELS, URGENT_LABELS};
