//! Rule-based urgency classification.

use serde::{Deserialize, Serialize};

use cxr_core::{Label, ProbabilityVector};

/// Findings that escalate straight to [`TriageLevel::Critical`].
pub const CRITICAL_LABELS: &[Label] = &[Label::Pneumothorax, Label::Edema];

/// Findings that escalate to [`TriageLevel::Urgent`] when no critical
/// finding is present.
pub const URGENT_LABELS: &[Label] = &[Label::Tbc, Label::Pneumonia, Label::Effusion];

/// Urgency tier assigned to a radiograph.
///
/// Ordering is by severity: `Critical > Urgent > Monitoring`. When several
/// findings cross the threshold the most severe tier wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TriageLevel {
    /// Life-threatening finding, immediate intervention.
    Critical,
    /// Infectious or progressive finding, fast-track review.
    Urgent,
    /// No finding above threshold, routine follow-up.
    Monitoring,
}

impl TriageLevel {
    /// Uppercase wire name of the level.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            TriageLevel::Critical => "CRITICAL",
            TriageLevel::Urgent => "URGENT",
            TriageLevel::Monitoring => "MONITORING",
        }
    }

    /// Recommended clinical action for the level.
    #[must_use]
    pub const fn action(&self) -> &'static str {
        match self {
            TriageLevel::Critical => "Resuscitation & immediate intervention",
            TriageLevel::Urgent => "Isolation & fast-track physician consult",
            TriageLevel::Monitoring => "Observation & routine follow-up",
        }
    }

    /// Display color name for dashboards.
    #[must_use]
    pub const fn color(&self) -> &'static str {
        match self {
            TriageLevel::Critical => "red",
            TriageLevel::Urgent => "orange",
            TriageLevel::Monitoring => "blue",
        }
    }

    /// Display color as a hex code.
    #[must_use]
    pub const fn color_hex(&self) -> &'static str {
        match self {
            TriageLevel::Critical => "#FF0000",
            TriageLevel::Urgent => "#FFA500",
            TriageLevel::Monitoring => "#007BFF",
        }
    }

    /// Severity rank, lower is more severe.
    #[must_use]
    pub const fn rank(&self) -> u8 {
        match self {
            TriageLevel::Critical => 0,
            TriageLevel::Urgent => 1,
            TriageLevel::Monitoring => 2,
        }
    }
}

impl std::fmt::Display for TriageLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The triage decision for one radiograph.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TriageResult {
    /// Assigned urgency tier.
    pub level: TriageLevel,
    /// Recommended clinical action.
    pub action: String,
    /// Display color name.
    pub color: String,
}

impl TriageResult {
    fn from_level(level: TriageLevel) -> Self {
        Self {
            level,
            action: level.action().to_string(),
            color: level.color().to_string(),
        }
    }
}

/// Classify a probability vector into a triage tier.
///
/// A label counts as detected when its score is strictly above
/// `threshold`. Any detected critical finding yields `CRITICAL`, otherwise
/// any detected urgent finding yields `URGENT`, otherwise `MONITORING`.
#[must_use]
pub fn classify(probabilities: &ProbabilityVector, threshold: f32) -> TriageResult {
    let detected = probabilities.detected(threshold);

    let level = if detected.iter().any(|l| CRITICAL_LABELS.contains(l)) {
        TriageLevel::Critical
    } else if detected.iter().any(|l| URGENT_LABELS.contains(l)) {
        TriageLevel::Urgent
    } else {
        TriageLevel::Monitoring
    };

    TriageResult::from_level(level)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vector(scores: [f32; 6]) -> ProbabilityVector {
        ProbabilityVector::from_scores(scores.to_vec()).unwrap()
    }

    #[test]
    fn test_pneumothorax_is_critical() {
        // Order: Cardiomegaly, Edema, Pneumonia, Effusion, Pneumothorax, TBC
        let probs = vector([0.02, 0.10, 0.30, 0.05, 0.82, 0.01]);
        let result = classify(&probs, 0.5);
        assert_eq!(result.level, TriageLevel::Critical);
        assert_eq!(result.action, "Resuscitation & immediate intervention");
        assert_eq!(result.color, "red");
    }

    #[test]
    fn test_tbc_is_urgent() {
        let probs = vector([0.02, 0.10, 0.30, 0.05, 0.20, 0.60]);
        let result = classify(&probs, 0.5);
        assert_eq!(result.level, TriageLevel::Urgent);
        assert_eq!(result.color, "orange");
    }

    #[test]
    fn test_nothing_detected_is_monitoring() {
        let probs = vector([0.49, 0.30, 0.30, 0.05, 0.20, 0.10]);
        let result = classify(&probs, 0.5);
        assert_eq!(result.level, TriageLevel::Monitoring);
        assert_eq!(result.action, "Observation & routine follow-up");
        assert_eq!(result.color, "blue");
    }

    #[test]
    fn test_exact_threshold_is_not_detected() {
        let probs = vector([0.5, 0.5, 0.5, 0.5, 0.5, 0.5]);
        assert_eq!(classify(&probs, 0.5).level, TriageLevel::Monitoring);
    }

    #[test]
    fn test_critical_dominates_urgent() {
        // Both an urgent (Pneumonia) and a critical (Edema) finding present
        let probs = vector([0.02, 0.70, 0.90, 0.05, 0.20, 0.01]);
        assert_eq!(classify(&probs, 0.5).level, TriageLevel::Critical);
    }

    #[test]
    fn test_cardiomegaly_alone_is_monitoring() {
        // Cardiomegaly carries no escalation rule
        let probs = vector([0.95, 0.10, 0.10, 0.05, 0.20, 0.01]);
        assert_eq!(classify(&probs, 0.5).level, TriageLevel::Monitoring);
    }

    #[test]
    fn test_raising_a_score_never_lowers_the_tier() {
        let base = [0.02, 0.10, 0.60, 0.05, 0.20, 0.01];
        let before = classify(&vector(base), 0.5);

        for i in 0..6 {
            let mut raised = base;
            raised[i] = 0.95;
            let after = classify(&vector(raised), 0.5);
            assert!(after.level.rank() <= before.level.rank());
        }
    }

    #[test]
    fn test_classification_is_idempotent() {
        let probs = vector([0.02, 0.10, 0.30, 0.05, 0.82, 0.01]);
        let first = classify(&probs, 0.5);
        let second = classify(&probs, 0.5);
        assert_eq!(first, second);
    }

    #[test]
    fn test_severity_rank_ordering() {
        assert!(TriageLevel::Critical.rank() < TriageLevel::Urgent.rank());
        assert!(TriageLevel::Urgent.rank() < TriageLevel::Monitoring.rank());
    }

    #[test]
    fn test_level_serializes_uppercase() {
        let json = serde_json::to_string(&TriageLevel::Critical).unwrap();
        assert_eq!(json, "\"CRITICAL\"");
    }
}
