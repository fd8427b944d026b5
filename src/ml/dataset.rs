use crate::error::{AppError, Result};
use crate::ml::features::{encode_training_row, N_FEATURES};
use crate::ml::models::TrainingData;
use ndarray::Array2;
use serde::Deserialize;
use std::path::Path;
use tracing::debug;

/// Columns present in the raw dataset but carrying no signal for the model.
///
/// They are still required to be present: their absence indicates a dataset
/// with a different schema than the one this encoder was written for.
pub const NOISE_COLUMNS: [&str; 3] = ["None_Experiencing", "None_Sympton", "Country"];

/// Full raw column schema of the dataset file
const EXPECTED_COLUMNS: [&str; 27] = [
    "Fever",
    "Tiredness",
    "Dry-Cough",
    "Difficulty-in-Breathing",
    "Sore-Throat",
    "None_Sympton",
    "Pains",
    "Nasal-Congestion",
    "Runny-Nose",
    "Diarrhea",
    "None_Experiencing",
    "Age_0-9",
    "Age_10-19",
    "Age_20-24",
    "Age_25-59",
    "Age_60+",
    "Gender_Female",
    "Gender_Male",
    "Gender_Transgender",
    "Severity_Mild",
    "Severity_Moderate",
    "Severity_None",
    "Severity_Severe",
    "Contact_Dont-Know",
    "Contact_No",
    "Contact_Yes",
    "Country",
];

/// One raw dataset row. The noise columns are dropped at deserialization.
#[derive(Debug, Clone, Deserialize)]
pub struct RawRecord {
    #[serde(rename = "Fever")]
    pub fever: u8,
    #[serde(rename = "Tiredness")]
    pub tiredness: u8,
    #[serde(rename = "Dry-Cough")]
    pub dry_cough: u8,
    #[serde(rename = "Difficulty-in-Breathing")]
    pub difficulty_in_breathing: u8,
    #[serde(rename = "Sore-Throat")]
    pub sore_throat: u8,
    #[serde(rename = "Pains")]
    pub pains: u8,
    #[serde(rename = "Nasal-Congestion")]
    pub nasal_congestion: u8,
    #[serde(rename = "Runny-Nose")]
    pub runny_nose: u8,
    #[serde(rename = "Diarrhea")]
    pub diarrhea: u8,
    #[serde(rename = "Severity_None")]
    pub severity_none: u8,
    #[serde(rename = "Severity_Mild")]
    pub severity_mild: u8,
    #[serde(rename = "Severity_Moderate")]
    pub severity_moderate: u8,
    #[serde(rename = "Severity_Severe")]
    pub severity_severe: u8,
    #[serde(rename = "Contact_No")]
    pub contact_no: u8,
    #[serde(rename = "Contact_Yes")]
    pub contact_yes: u8,
    #[serde(rename = "Contact_Dont-Know")]
    pub contact_dont_know: u8,
    #[serde(rename = "Age_0-9")]
    pub age_0_9: u8,
    #[serde(rename = "Age_10-19")]
    pub age_10_19: u8,
    #[serde(rename = "Age_20-24")]
    pub age_20_24: u8,
    #[serde(rename = "Age_25-59")]
    pub age_25_59: u8,
    #[serde(rename = "Age_60+")]
    pub age_60_plus: u8,
    #[serde(rename = "Gender_Female")]
    pub gender_female: u8,
    #[serde(rename = "Gender_Male")]
    pub gender_male: u8,
    #[serde(rename = "Gender_Transgender")]
    pub gender_transgender: u8,
}

/// Read the raw dataset and normalize it into a training matrix.
///
/// Fails with DataUnavailable if the file is missing, any raw column is
/// absent, a row is malformed, a one-hot group invariant is violated, or the
/// dataset is empty. None of these are retried anywhere; they propagate to
/// the caller as hard errors.
pub fn load_dataset(path: &Path) -> Result<TrainingData> {
    let mut reader = csv::Reader::from_path(path).map_err(|e| {
        AppError::DataUnavailable(format!("cannot open dataset {}: {e}", path.display()))
    })?;

    let headers = reader
        .headers()
        .map_err(|e| AppError::DataUnavailable(format!("cannot read dataset header: {e}")))?
        .clone();

    for column in EXPECTED_COLUMNS {
        if !headers.iter().any(|h| h == column) {
            return Err(AppError::DataUnavailable(format!(
                "dataset is missing column '{column}'"
            )));
        }
    }

    let mut flat = Vec::new();
    let mut labels = Vec::new();

    for record in reader.deserialize::<RawRecord>() {
        let record = record
            .map_err(|e| AppError::DataUnavailable(format!("malformed dataset row: {e}")))?;
        let (features, label) = encode_training_row(&record)?;
        flat.extend_from_slice(&features);
        labels.push(label);
    }

    if labels.is_empty() {
        return Err(AppError::DataUnavailable(
            "dataset contains no rows".to_string(),
        ));
    }

    let n_samples = labels.len();
    let features = Array2::from_shape_vec((n_samples, N_FEATURES), flat)
        .map_err(|e| AppError::Internal(format!("failed to build feature matrix: {e}")))?;

    debug!(n_samples, n_features = N_FEATURES, "dataset normalized");

    Ok(TrainingData { features, labels })
}
