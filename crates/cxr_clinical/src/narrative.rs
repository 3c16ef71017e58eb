//! Plain-language summary of the analysis.

use cxr_core::Label;

use crate::triage::TriageResult;

/// Short plain-language description of a finding.
///
/// Findings without a curated description fall back to a generic phrasing.
#[must_use]
pub fn description(label: Label) -> &'static str {
    match label {
        Label::Edema => "fluid accumulation in the lung tissue",
        Label::Pneumonia => "an infectious consolidation in the lung parenchyma",
        Label::Effusion => "fluid collecting in the pleural space",
        Label::Pneumothorax => "air trapped in the pleural cavity collapsing the lung",
        Label::Tbc => "a pattern consistent with pulmonary tuberculosis",
        _ => "an anomaly in the radiographic density of thoracic structures",
    }
}

/// Compose the one-paragraph narrative for a report.
///
/// The paragraph names the most probable finding, its confidence as a
/// percentage with one decimal place, the assigned urgency tier and the
/// recommended action.
#[must_use]
pub fn narrate(label: Label, probability: f32, triage: &TriageResult) -> String {
    format!(
        "The system identified {} as the most probable finding at {:.1}% \
         confidence, indicating {}. Triage level {}: {} is recommended.",
        label,
        probability * 100.0,
        description(label),
        triage.level,
        lowercase_first(&triage.action),
    )
}

fn lowercase_first(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::triage::classify;
    use cxr_core::ProbabilityVector;

    fn vector(scores: [f32; 6]) -> ProbabilityVector {
        ProbabilityVector::from_scores(scores.to_vec()).unwrap()
    }

    #[test]
    fn test_narrative_mentions_finding_and_confidence() {
        let probs = vector([0.02, 0.10, 0.30, 0.05, 0.82, 0.01]);
        let triage = classify(&probs, 0.5);
        let (label, score) = probs.top();

        let text = narrate(label, score, &triage);
        assert!(text.contains("Pneumothorax"));
        assert!(text.contains("82.0%"));
        assert!(text.contains("CRITICAL"));
        assert!(text.contains("resuscitation & immediate intervention"));
    }

    #[test]
    fn test_narrative_uses_curated_description() {
        let probs = vector([0.02, 0.10, 0.30, 0.05, 0.20, 0.65]);
        let triage = classify(&probs, 0.5);

        let text = narrate(Label::Tbc, 0.65, &triage);
        assert!(text.contains("pulmonary tuberculosis"));
        assert!(text.contains("65.0%"));
        assert!(text.contains("URGENT"));
    }

    #[test]
    fn test_generic_fallback_for_cardiomegaly() {
        assert_eq!(
            description(Label::Cardiomegaly),
            "an anomaly in the radiographic density of thoracic structures"
        );
    }

    #[test]
    fn test_narrative_is_deterministic() {
        let probs = vector([0.49, 0.30, 0.30, 0.05, 0.20, 0.10]);
        let triage = classify(&probs, 0.5);
        let (label, score) = probs.top();

        assert_eq!(narrate(label, score, &triage), narrate(label, score, &triage));
    }
}
