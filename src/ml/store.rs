use crate::error::{AppError, Result};
use crate::ml::classifier::SeverityClassifier;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Single-slot on-disk store for the persisted model.
///
/// The slot holds one opaque bincode-serialized classifier with no version or
/// schema header. Writes replace the whole file unconditionally and reads load
/// the whole file; there is deliberately no locking. Two concurrent training
/// calls race with last-writer-wins, and a read that overlaps a write surfaces
/// as a corrupt-load [`AppError::ModelMismatch`]. This is a known, documented
/// race, not an oversight.
pub struct ModelStore {
    path: PathBuf,
}

impl ModelStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path of the model slot
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Whether a persisted model currently occupies the slot.
    ///
    /// Re-checked by callers on every prediction; never cached.
    pub fn exists(&self) -> bool {
        self.path.is_file()
    }

    /// Persist a classifier, overwriting any prior model in the slot
    pub fn save(&self, classifier: &SeverityClassifier) -> Result<()> {
        let bytes = bincode::serialize(classifier)
            .map_err(|e| AppError::Serialization(format!("failed to encode model: {e}")))?;

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        fs::write(&self.path, &bytes)?;

        debug!(path = %self.path.display(), n_bytes = bytes.len(), "model slot overwritten");
        Ok(())
    }

    /// Load the persisted classifier from the slot
    pub fn load(&self) -> Result<SeverityClassifier> {
        let bytes = fs::read(&self.path).map_err(|e| {
            AppError::ModelMismatch(format!(
                "cannot read persisted model {}: {e}",
                self.path.display()
            ))
        })?;

        bincode::deserialize(&bytes)
            .map_err(|e| AppError::ModelMismatch(format!("cannot decode persisted model: {e}")))
    }
}
