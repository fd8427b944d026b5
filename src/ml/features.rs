use crate::error::{AppError, Result};
use crate::ml::dataset::RawRecord;
use crate::ml::models::{SeverityLabel, SymptomQuery};

/// Number of features in the canonical vector
pub const N_FEATURES: usize = 12;

/// Canonical feature order, shared by training rows and prediction queries
pub const FEATURE_NAMES: [&str; N_FEATURES] = [
    "fever",
    "tiredness",
    "dry_cough",
    "difficulty_in_breathing",
    "sore_throat",
    "pains",
    "nasal_congestion",
    "runny_nose",
    "diarrhea",
    "contact_patient",
    "age",
    "gender",
];

/// Collapse a one-hot indicator group to the index of its single set bit.
///
/// A valid row has exactly one indicator set per group. Zero or multiple set
/// bits violate that invariant and fail loudly instead of picking a
/// first-match winner.
fn one_hot_index(group: &str, bits: &[u8]) -> Result<usize> {
    let mut set = None;
    for (idx, &bit) in bits.iter().enumerate() {
        if bit == 1 && set.replace(idx).is_some() {
            return Err(AppError::DataUnavailable(format!(
                "multiple indicators set in one-hot group '{group}'"
            )));
        }
    }
    set.ok_or_else(|| {
        AppError::DataUnavailable(format!("no indicator set in one-hot group '{group}'"))
    })
}

/// Encode one raw dataset row into the canonical feature vector and its
/// severity level.
///
/// Symptom columns pass through unchanged as 0/1. The four one-hot groups
/// collapse to integers: severity None/Mild/Moderate/Severe -> 0..=3,
/// contact No/Yes/Dont-Know -> 0..=2, age bands -> 0..=4, gender
/// Female/Male/Transgender -> 1..=3.
pub fn encode_training_row(record: &RawRecord) -> Result<([f64; N_FEATURES], usize)> {
    let severity = one_hot_index(
        "Severity",
        &[
            record.severity_none,
            record.severity_mild,
            record.severity_moderate,
            record.severity_severe,
        ],
    )?;
    let contact = one_hot_index(
        "Contact",
        &[record.contact_no, record.contact_yes, record.contact_dont_know],
    )?;
    let age = one_hot_index(
        "Age",
        &[
            record.age_0_9,
            record.age_10_19,
            record.age_20_24,
            record.age_25_59,
            record.age_60_plus,
        ],
    )?;
    // Gender is 1-based: Female=1, Male=2, Transgender=3
    let gender = one_hot_index(
        "Gender",
        &[record.gender_female, record.gender_male, record.gender_transgender],
    )? + 1;

    let features = [
        f64::from(record.fever),
        f64::from(record.tiredness),
        f64::from(record.dry_cough),
        f64::from(record.difficulty_in_breathing),
        f64::from(record.sore_throat),
        f64::from(record.pains),
        f64::from(record.nasal_congestion),
        f64::from(record.runny_nose),
        f64::from(record.diarrhea),
        contact as f64,
        age as f64,
        gender as f64,
    ];

    Ok((features, severity))
}

/// Encode one raw prediction query into the canonical feature vector.
///
/// Pure and total: the same query always yields the same vector, and values
/// outside the recognized sets are coerced to defaults (case-sensitive on the
/// literal values), never rejected.
pub fn encode_query(query: &SymptomQuery) -> [f64; N_FEATURES] {
    [
        yes_flag(query.fever.as_deref()),
        yes_flag(query.tiredness.as_deref()),
        yes_flag(query.dry_cough.as_deref()),
        yes_flag(query.difficulty_in_breathing.as_deref()),
        yes_flag(query.sore_throat.as_deref()),
        yes_flag(query.pains.as_deref()),
        yes_flag(query.nasal_congestion.as_deref()),
        yes_flag(query.runny_nose.as_deref()),
        yes_flag(query.diarrhea.as_deref()),
        contact_value(query.contact_patient.as_deref()),
        age_value(query.age.as_deref()),
        gender_value(query.gender.as_deref()),
    ]
}

/// Decode a predicted severity level back to its category.
///
/// Total catch-all: every value other than 0, 1, or 2 decodes to Severe, not
/// just 3. This asymmetry with the 4-way training encoding is part of the
/// contract.
pub fn decode_label(level: usize) -> SeverityLabel {
    match level {
        0 => SeverityLabel::None,
        1 => SeverityLabel::Mild,
        2 => SeverityLabel::Moderate,
        _ => SeverityLabel::Severe,
    }
}

fn yes_flag(value: Option<&str>) -> f64 {
    match value {
        Some("Yes") => 1.0,
        _ => 0.0,
    }
}

fn contact_value(value: Option<&str>) -> f64 {
    match value {
        Some("Yes") => 1.0,
        Some("No") => 0.0,
        _ => 2.0,
    }
}

fn age_value(value: Option<&str>) -> f64 {
    match value {
        Some("0 - 9") => 0.0,
        Some("10 - 19") => 1.0,
        Some("20 - 24") => 2.0,
        Some("25 - 59") => 3.0,
        // Anything else, including absent, is treated as the oldest band
        _ => 4.0,
    }
}

fn gender_value(value: Option<&str>) -> f64 {
    // "Male" is checked before "Female"; the check order is part of the contract
    match value {
        Some("Male") => 2.0,
        Some("Female") => 1.0,
        _ => 3.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw_record(severity: usize, contact: usize, age: usize, gender: usize) -> RawRecord {
        RawRecord {
            fever: 1,
            tiredness: 0,
            dry_cough: 1,
            difficulty_in_breathing: 0,
            sore_throat: 1,
            pains: 0,
            nasal_congestion: 0,
            runny_nose: 1,
            diarrhea: 0,
            severity_none: u8::from(severity == 0),
            severity_mild: u8::from(severity == 1),
            severity_moderate: u8::from(severity == 2),
            severity_severe: u8::from(severity == 3),
            contact_no: u8::from(contact == 0),
            contact_yes: u8::from(contact == 1),
            contact_dont_know: u8::from(contact == 2),
            age_0_9: u8::from(age == 0),
            age_10_19: u8::from(age == 1),
            age_20_24: u8::from(age == 2),
            age_25_59: u8::from(age == 3),
            age_60_plus: u8::from(age == 4),
            gender_female: u8::from(gender == 1),
            gender_male: u8::from(gender == 2),
            gender_transgender: u8::from(gender == 3),
        }
    }

    #[test]
    fn test_training_row_round_trips_every_severity() {
        let expected = [
            SeverityLabel::None,
            SeverityLabel::Mild,
            SeverityLabel::Moderate,
            SeverityLabel::Severe,
        ];
        for (severity, label) in expected.iter().enumerate() {
            let record = raw_record(severity, 1, 2, 1);
            let (_, encoded) = encode_training_row(&record).unwrap();
            assert_eq!(decode_label(encoded), *label);
        }
    }

    #[test]
    fn test_training_row_feature_values() {
        let record = raw_record(2, 2, 4, 3);
        let (features, label) = encode_training_row(&record).unwrap();

        assert_eq!(label, 2);
        assert_eq!(
            features,
            [1.0, 0.0, 1.0, 0.0, 1.0, 0.0, 0.0, 1.0, 0.0, 2.0, 4.0, 3.0]
        );
    }

    #[test]
    fn test_training_row_rejects_empty_group() {
        let mut record = raw_record(1, 0, 0, 1);
        record.severity_mild = 0;

        let err = encode_training_row(&record).unwrap_err();
        assert!(err.to_string().contains("Severity"));
    }

    #[test]
    fn test_training_row_rejects_multiple_set_bits() {
        let mut record = raw_record(1, 0, 0, 1);
        record.contact_yes = 1;

        let err = encode_training_row(&record).unwrap_err();
        assert!(err.to_string().contains("Contact"));
    }

    #[test]
    fn test_query_defaults_to_no_symptoms_oldest_band_other_gender() {
        let features = encode_query(&SymptomQuery::default());
        assert_eq!(
            features,
            [0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 2.0, 4.0, 3.0]
        );
    }

    #[test]
    fn test_query_encoding_is_idempotent() {
        let query = SymptomQuery {
            fever: Some("Yes".to_string()),
            tiredness: Some("No".to_string()),
            age: Some("20 - 24".to_string()),
            gender: Some("Female".to_string()),
            contact_patient: Some("No".to_string()),
            ..Default::default()
        };

        let first = encode_query(&query);
        let second = encode_query(&query);
        assert_eq!(first, second);
        assert_eq!(first[0], 1.0);
        assert_eq!(first[1], 0.0);
        assert_eq!(first[9], 0.0);
        assert_eq!(first[10], 2.0);
        assert_eq!(first[11], 1.0);
    }

    #[test]
    fn test_query_encoding_is_case_sensitive() {
        let query = SymptomQuery {
            fever: Some("yes".to_string()),
            gender: Some("male".to_string()),
            ..Default::default()
        };

        let features = encode_query(&query);
        assert_eq!(features[0], 0.0);
        assert_eq!(features[11], 3.0);
    }

    #[test]
    fn test_gender_precedence_male_checked_first() {
        // Regression guard against accidental reordering of the gender checks
        let male = SymptomQuery {
            gender: Some("Male".to_string()),
            ..Default::default()
        };
        let female = SymptomQuery {
            gender: Some("Female".to_string()),
            ..Default::default()
        };

        assert_eq!(encode_query(&male)[11], 2.0);
        assert_eq!(encode_query(&female)[11], 1.0);
    }

    #[test]
    fn test_unknown_age_band_maps_to_oldest() {
        let query = SymptomQuery {
            age: Some("60+".to_string()),
            ..Default::default()
        };
        assert_eq!(encode_query(&query)[10], 4.0);
    }

    #[test]
    fn test_decode_label_catch_all() {
        assert_eq!(decode_label(0), SeverityLabel::None);
        assert_eq!(decode_label(1), SeverityLabel::Mild);
        assert_eq!(decode_label(2), SeverityLabel::Moderate);
        assert_eq!(decode_label(3), SeverityLabel::Severe);
        assert_eq!(decode_label(99), SeverityLabel::Severe);
    }
}
