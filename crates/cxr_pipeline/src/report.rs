//! The serializable analysis report.

use serde::{Deserialize, Serialize};

use cxr_clinical::TriageResult;
use cxr_core::{round4, Label, ProbabilityVector};

/// One label with its reported probability, rounded to four decimals.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabelScore {
    /// The finding.
    pub label: Label,
    /// Sigmoid probability, rounded for reporting.
    pub probability: f32,
}

/// Provenance block attached to every report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportMetadata {
    /// Name of the tensor backend that produced the inference.
    pub backend: String,
    /// Data handling note.
    pub retention: String,
}

impl ReportMetadata {
    /// Build the metadata block for a backend.
    #[must_use]
    pub fn for_backend(backend: impl Into<String>) -> Self {
        Self {
            backend: backend.into(),
            retention: "Image processed in memory only, not retained after analysis".to_string(),
        }
    }
}

/// Complete result of analyzing one radiograph.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisReport {
    /// Request identifier for audit logs, `CXR-` plus 8 hex digits.
    pub audit_id: String,
    /// All per-label probabilities in output-layer order.
    pub predictions: Vec<LabelScore>,
    /// The most probable finding.
    pub top_label: Label,
    /// Its probability, rounded for reporting.
    pub top_confidence: f32,
    /// Rule-based urgency decision.
    pub triage: TriageResult,
    /// Plain-language summary paragraph.
    pub narrative: String,
    /// Base64 JPEG heatmap overlay, absent if rendering failed.
    pub heatmap_base64: Option<String>,
    /// Why the overlay is absent, when it is.
    pub heatmap_error: Option<String>,
    /// Provenance block.
    pub metadata: ReportMetadata,
}

impl AnalysisReport {
    /// Rounded `(label, probability)` rows for a probability vector.
    #[must_use]
    pub fn predictions_from(probabilities: &ProbabilityVector) -> Vec<LabelScore> {
        probabilities
            .iter()
            .map(|(label, probability)| LabelScore {
                label,
                probability: round4(probability),
            })
            .collect()
    }
}
