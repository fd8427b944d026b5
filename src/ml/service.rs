use crate::config::DataConfig;
use crate::error::{AppError, Result};
use crate::ml::classifier::{SeverityClassifier, CLASSIFIER_NAME, DEFAULT_TEST_SIZE};
use crate::ml::dataset::load_dataset;
use crate::ml::features::{decode_label, encode_query, N_FEATURES};
use crate::ml::models::{SeverityLabel, SymptomQuery, TrainingReport};
use crate::ml::store::ModelStore;
use tracing::{debug, info};

/// Trainer and predictor for the severity classifier.
///
/// Training reads the full dataset from disk on every call and overwrites the
/// persisted model slot; prediction re-loads the persisted model from disk on
/// every call with no in-memory cache, training first if the slot is empty.
pub struct TriageService {
    config: DataConfig,
    store: ModelStore,
}

impl TriageService {
    pub fn new(config: DataConfig) -> Self {
        let store = ModelStore::new(config.model_path.clone());
        Self { config, store }
    }

    /// The persisted-model store this service writes to and reads from
    pub fn store(&self) -> &ModelStore {
        &self.store
    }

    /// Retrain from the full dataset file and overwrite the persisted model.
    ///
    /// The reported score is accuracy on the train partition, not the held-out
    /// test partition. That quirk is part of the observable contract of the
    /// model-creation operation and is pinned by tests rather than corrected.
    pub fn train(&self) -> Result<TrainingReport> {
        let data = load_dataset(&self.config.dataset_path)?;
        info!(
            n_samples = data.n_samples(),
            n_features = data.n_features(),
            "Training severity classifier"
        );

        let (classifier, score) = SeverityClassifier::train(&data, DEFAULT_TEST_SIZE)?;
        self.store.save(&classifier)?;

        info!(score, "Severity classifier trained and persisted");

        Ok(TrainingReport {
            classifier: CLASSIFIER_NAME.to_string(),
            status: "Model has created successfully".to_string(),
            score,
        })
    }

    /// Predict a severity label for one raw query.
    ///
    /// If no persisted model exists the service trains synchronously first
    /// (lazy bootstrap); existence is re-checked on every request.
    pub fn predict(&self, query: &SymptomQuery) -> Result<SeverityLabel> {
        if !self.store.exists() {
            info!("No persisted model found, training before first prediction");
            self.train()?;
        }

        let classifier = self.store.load()?;
        if classifier.n_features() != N_FEATURES {
            return Err(AppError::ModelMismatch(format!(
                "persisted model expects {} features, encoder produces {}",
                classifier.n_features(),
                N_FEATURES
            )));
        }

        let features = encode_query(query);
        let level = classifier.predict_one(&features)?;
        let label = decode_label(level);

        debug!(level, %label, "Severity predicted");
        Ok(label)
    }
}
