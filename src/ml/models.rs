use ndarray::Array2;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Severity categories predicted by the classifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SeverityLabel {
    None,
    Mild,
    Moderate,
    Severe,
}

impl SeverityLabel {
    /// Canonical string form, as reported in prediction responses
    pub fn as_str(&self) -> &'static str {
        match self {
            SeverityLabel::None => "None",
            SeverityLabel::Mild => "Mild",
            SeverityLabel::Moderate => "Moderate",
            SeverityLabel::Severe => "Severe",
        }
    }

    /// Integer training label for this category
    pub fn level(&self) -> usize {
        match self {
            SeverityLabel::None => 0,
            SeverityLabel::Mild => 1,
            SeverityLabel::Moderate => 2,
            SeverityLabel::Severe => 3,
        }
    }
}

impl fmt::Display for SeverityLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One raw prediction request: the 12 logical fields as query-string values.
///
/// All fields are optional strings; unrecognized or absent values are coerced
/// to defaults by the encoder rather than rejected.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SymptomQuery {
    pub fever: Option<String>,
    pub tiredness: Option<String>,
    pub dry_cough: Option<String>,
    pub difficulty_in_breathing: Option<String>,
    pub sore_throat: Option<String>,
    pub pains: Option<String>,
    pub nasal_congestion: Option<String>,
    pub runny_nose: Option<String>,
    pub diarrhea: Option<String>,
    pub contact_patient: Option<String>,
    pub age: Option<String>,
    pub gender: Option<String>,
}

/// Normalized training data: one feature row per dataset record plus labels
#[derive(Debug, Clone)]
pub struct TrainingData {
    /// Feature matrix, one row per sample in canonical feature order
    pub features: Array2<f64>,

    /// Severity level per sample
    pub labels: Vec<usize>,
}

impl TrainingData {
    pub fn n_samples(&self) -> usize {
        self.features.nrows()
    }

    pub fn n_features(&self) -> usize {
        self.features.ncols()
    }
}

/// Training outcome, also the response body of the model-creation endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrainingReport {
    /// Classifier name, always "Gaussian Naive Bayes"
    pub classifier: String,

    /// Human-readable status message
    pub status: String,

    /// Accuracy on the train partition (see [`crate::ml::service`] for the
    /// train-accuracy quirk this deliberately preserves)
    pub score: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_severity_label_strings() {
        assert_eq!(SeverityLabel::None.as_str(), "None");
        assert_eq!(SeverityLabel::Mild.as_str(), "Mild");
        assert_eq!(SeverityLabel::Moderate.as_str(), "Moderate");
        assert_eq!(SeverityLabel::Severe.as_str(), "Severe");
    }

    #[test]
    fn test_severity_label_levels() {
        assert_eq!(SeverityLabel::None.level(), 0);
        assert_eq!(SeverityLabel::Severe.level(), 3);
    }

    #[test]
    fn test_severity_label_serializes_as_string() {
        let json = serde_json::to_string(&SeverityLabel::Moderate).unwrap();
        assert_eq!(json, "\"Moderate\"");
    }
}
