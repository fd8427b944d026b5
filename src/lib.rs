//! Symptom severity triage service
//!
//! Trains a Gaussian Naive Bayes classifier from a static tabular dataset of
//! self-reported symptom and demographic indicators, persists the fitted model
//! to a single on-disk slot, and serves severity predictions over HTTP for new
//! symptom inputs. The encoding of categorical survey answers into a fixed
//! 12-element numeric feature vector is shared between training and inference
//! and lives in [`ml::features`].

pub mod api;
pub mod config;
pub mod error;
pub mod ml;

pub use error::{AppError, Result};
