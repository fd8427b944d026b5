/// Machine learning module for symptom severity classification
///
/// This module provides the full train-and-predict pipeline:
/// - Deterministic feature encoding shared between training and inference
/// - Dataset loading and one-hot group normalization
/// - Gaussian Naive Bayes training with a randomized train/test split
/// - Single-slot model persistence (last-writer-wins, no versioning)
/// - Prediction with lazy training bootstrap
pub mod classifier;
pub mod dataset;
pub mod features;
pub mod models;
pub mod service;
pub mod store;

pub use classifier::{SeverityClassifier, CLASSIFIER_NAME, DEFAULT_TEST_SIZE};
pub use dataset::{load_dataset, RawRecord};
pub use features::{decode_label, encode_query, encode_training_row, FEATURE_NAMES, N_FEATURES};
pub use models::{SeverityLabel, SymptomQuery, TrainingData, TrainingReport};
pub use service::TriageService;
pub use store::ModelStore;
