use crate::error::{AppError, Result};
use crate::ml::models::TrainingData;
use ndarray::Array2;
use serde::{Deserialize, Serialize};
use smartcore::linalg::basic::matrix::DenseMatrix;
use smartcore::model_selection::train_test_split;
use smartcore::naive_bayes::gaussian::GaussianNB;

/// Human-readable classifier name, reported by the model-creation endpoint
pub const CLASSIFIER_NAME: &str = "Gaussian Naive Bayes";

/// Default fraction of samples held out of the fit (sklearn-style split)
pub const DEFAULT_TEST_SIZE: f32 = 0.25;

/// Gaussian Naive Bayes severity classifier.
///
/// Serializable in full so the fitted model can be persisted to the store
/// slot and re-loaded for prediction.
#[derive(Debug, Serialize, Deserialize)]
pub struct SeverityClassifier {
    /// Fitted model
    model: Option<GaussianNB<f64, usize, DenseMatrix<f64>, Vec<usize>>>,

    /// Feature count the model was fitted with
    n_features: usize,
}

impl SeverityClassifier {
    /// Fit a classifier on a randomized train/test split of the dataset and
    /// return it together with its accuracy.
    ///
    /// The split is unseeded, so reruns are non-deterministic. The reported
    /// accuracy is computed on the **train** partition, not the held-out test
    /// partition; that quirk is part of the observable contract of the
    /// model-creation operation and must not be "fixed" to test-set accuracy.
    pub fn train(data: &TrainingData, test_size: f32) -> Result<(Self, f64)> {
        let x = Self::ndarray_to_densematrix(&data.features);
        let y = data.labels.clone();

        let (x_train, _x_test, y_train, _y_test) = train_test_split(&x, &y, test_size, true, None);

        let model = GaussianNB::fit(&x_train, &y_train, Default::default())
            .map_err(|e| AppError::Internal(format!("Failed to train Naive Bayes: {e}")))?;

        let predictions = model
            .predict(&x_train)
            .map_err(|e| AppError::Internal(format!("Prediction failed: {e}")))?;
        let score = Self::accuracy(&y_train, &predictions);

        Ok((
            Self {
                model: Some(model),
                n_features: data.n_features(),
            },
            score,
        ))
    }

    /// Predict the severity level of a single feature vector
    pub fn predict_one(&self, features: &[f64]) -> Result<usize> {
        if features.len() != self.n_features {
            return Err(AppError::ModelMismatch(format!(
                "model expects {} features, got {}",
                self.n_features,
                features.len()
            )));
        }

        let model = self
            .model
            .as_ref()
            .ok_or_else(|| AppError::ModelMismatch("model not trained".to_string()))?;

        let x = DenseMatrix::new(1, features.len(), features.to_vec(), false);
        let predictions = model
            .predict(&x)
            .map_err(|e| AppError::Internal(format!("Prediction failed: {e}")))?;

        predictions
            .first()
            .copied()
            .ok_or_else(|| AppError::Internal("prediction returned no labels".to_string()))
    }

    /// Feature count the model was fitted with
    pub fn n_features(&self) -> usize {
        self.n_features
    }

    /// Check if model is trained
    pub fn is_trained(&self) -> bool {
        self.model.is_some()
    }

    fn ndarray_to_densematrix(arr: &Array2<f64>) -> DenseMatrix<f64> {
        let shape = arr.shape();
        let data: Vec<f64> = arr.iter().copied().collect();
        DenseMatrix::new(shape[0], shape[1], data, false)
    }

    fn accuracy(y_true: &[usize], y_pred: &[usize]) -> f64 {
        if y_true.is_empty() {
            return 0.0;
        }
        let correct = y_true
            .iter()
            .zip(y_pred.iter())
            .filter(|(t, p)| t == p)
            .count();
        correct as f64 / y_true.len() as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ml::features::N_FEATURES;

    fn create_test_data(n_samples: usize) -> TrainingData {
        let mut flat = Vec::new();
        let mut labels = Vec::new();

        for i in 0..n_samples {
            let class = i % 4;
            let base = class as f64 * 3.0;
            for j in 0..N_FEATURES {
                // Small within-class variation keeps per-class variances nonzero
                flat.push(base + ((i / 4 + j) % 3) as f64 * 0.1);
            }
            labels.push(class);
        }

        TrainingData {
            features: Array2::from_shape_vec((n_samples, N_FEATURES), flat).unwrap(),
            labels,
        }
    }

    #[test]
    fn test_train_reports_score_in_unit_interval() {
        let data = create_test_data(80);
        let (classifier, score) = SeverityClassifier::train(&data, DEFAULT_TEST_SIZE).unwrap();

        assert!(classifier.is_trained());
        assert_eq!(classifier.n_features(), N_FEATURES);
        assert!((0.0..=1.0).contains(&score));
    }

    #[test]
    fn test_predict_one_returns_known_class() {
        let data = create_test_data(80);
        let (classifier, _) = SeverityClassifier::train(&data, DEFAULT_TEST_SIZE).unwrap();

        let features = vec![6.0; N_FEATURES];
        let level = classifier.predict_one(&features).unwrap();

        assert!(level < 4);
    }

    #[test]
    fn test_predict_one_rejects_wrong_feature_count() {
        let data = create_test_data(80);
        let (classifier, _) = SeverityClassifier::train(&data, DEFAULT_TEST_SIZE).unwrap();

        let err = classifier.predict_one(&[1.0, 2.0]).unwrap_err();
        assert_eq!(err.error_code(), "MODEL_MISMATCH");
    }

    #[test]
    fn test_classifier_survives_serialization() {
        let data = create_test_data(80);
        let (classifier, _) = SeverityClassifier::train(&data, DEFAULT_TEST_SIZE).unwrap();

        let features = vec![3.05; N_FEATURES];
        let before = classifier.predict_one(&features).unwrap();

        let bytes = bincode::serialize(&classifier).unwrap();
        let restored: SeverityClassifier = bincode::deserialize(&bytes).unwrap();

        assert_eq!(restored.predict_one(&features).unwrap(), before);
        assert_eq!(restored.n_features(), N_FEATURES);
    }
}
