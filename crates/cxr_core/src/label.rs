//! The closed vocabulary of target findings.

use serde::{Deserialize, Serialize};

/// A target finding the classifier was trained on.
///
/// The variant order is fixed and matches the network's output layer; the
/// index of a label in [`Label::ALL`] is the index of its logit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Label {
    /// Enlarged cardiac silhouette.
    Cardiomegaly,
    /// Pulmonary edema.
    Edema,
    /// Pneumonia.
    Pneumonia,
    /// Pleural effusion.
    Effusion,
    /// Pneumothorax.
    Pneumothorax,
    /// Tuberculosis.
    Tbc,
}

impl Label {
    /// All labels in output-layer order.
    pub const ALL: [Label; 6] = [
        Label::Cardiomegaly,
        Label::Edema,
        Label::Pneumonia,
        Label::Effusion,
        Label::Pneumothorax,
        Label::Tbc,
    ];

    /// Number of target labels.
    pub const COUNT: usize = Self::ALL.len();

    /// The label's index in the network's output layer.
    #[must_use]
    pub fn index(&self) -> usize {
        Self::ALL
            .iter()
            .position(|l| l == self)
            .unwrap_or_default()
    }

    /// Look up a label by output-layer index.
    #[must_use]
    pub fn from_index(index: usize) -> Option<Label> {
        Self::ALL.get(index).copied()
    }

    /// Display name of the label.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Label::Cardiomegaly => "Cardiomegaly",
            Label::Edema => "Edema",
            Label::Pneumonia => "Pneumonia",
            Label::Effusion => "Effusion",
            Label::Pneumothorax => "Pneumothorax",
            Label::Tbc => "TBC",
        }
    }
}

impl std::fmt::Display for Label {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_label_order_matches_output_layer() {
        assert_eq!(Label::ALL[0], Label::Cardiomegaly);
        assert_eq!(Label::ALL[4], Label::Pneumothorax);
        assert_eq!(Label::ALL[5], Label::Tbc);
        assert_eq!(Label::COUNT, 6);
    }

    #[test]
    fn test_index_round_trip() {
        for (i, label) in Label::ALL.iter().enumerate() {
            assert_eq!(label.index(), i);
            assert_eq!(Label::from_index(i), Some(*label));
        }
        assert_eq!(Label::from_index(Label::COUNT), None);
    }

    #[test]
    fn test_display_name() {
        assert_eq!(Label::Tbc.to_string(), "TBC");
        assert_eq!(Label::Effusion.to_string(), "Effusion");
    }
}
