//! Multi-label probability vector.

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, Result};
use crate::label::Label;

/// Round a probability to four decimal places for reporting.
#[must_use]
pub fn round4(value: f32) -> f32 {
    (value * 10_000.0).round() / 10_000.0
}

/// Per-label sigmoid probabilities for one radiograph.
///
/// Scores are index-aligned with [`Label::ALL`]. The constructor enforces
/// the invariants: exactly one entry per configured label, no NaN, every
/// value in `[0, 1]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProbabilityVector {
    scores: Vec<f32>,
}

impl ProbabilityVector {
    /// Build a probability vector from raw sigmoid outputs.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::ShapeMismatch`] if the score count does not
    /// equal the number of configured labels, and
    /// [`CoreError::InvalidProbability`] if any score is NaN or outside
    /// `[0, 1]`.
    pub fn from_scores(scores: Vec<f32>) -> Result<Self> {
        if scores.len() != Label::COUNT {
            return Err(CoreError::ShapeMismatch {
                expected: format!("{} scores", Label::COUNT),
                got: format!("{} scores", scores.len()),
            });
        }

        for (i, &score) in scores.iter().enumerate() {
            if score.is_nan() {
                return Err(CoreError::InvalidProbability(format!(
                    "NaN score for label {}",
                    Label::ALL[i]
                )));
            }
            if !(0.0..=1.0).contains(&score) {
                return Err(CoreError::InvalidProbability(format!(
                    "score {} for label {} outside [0, 1]",
                    score,
                    Label::ALL[i]
                )));
            }
        }

        Ok(Self { scores })
    }

    /// The score for one label.
    #[must_use]
    pub fn get(&self, label: Label) -> f32 {
        self.scores[label.index()]
    }

    /// Iterate over `(label, score)` pairs in output-layer order.
    pub fn iter(&self) -> impl Iterator<Item = (Label, f32)> + '_ {
        Label::ALL.iter().copied().zip(self.scores.iter().copied())
    }

    /// The highest-probability finding.
    ///
    /// Ties resolve to the earlier label in output-layer order, so the
    /// result is deterministic for a given vector.
    #[must_use]
    pub fn top(&self) -> (Label, f32) {
        let mut best = (Label::ALL[0], self.scores[0]);
        for (label, score) in self.iter().skip(1) {
            if score > best.1 {
                best = (label, score);
            }
        }
        best
    }

    /// Labels whose score is strictly above the decision threshold.
    #[must_use]
    pub fn detected(&self, threshold: f32) -> Vec<Label> {
        self.iter()
            .filter(|(_, score)| *score > threshold)
            .map(|(label, _)| label)
            .collect()
    }
}
