//! Resolve and load the scaler and classifier artifacts.

use std::fs;
use std::path::{Path, PathBuf};

use phoneprice_core::{FEATURE_COUNT, locate};
use serde::de::DeserializeOwned;
use tracing::info;

use crate::classifier::{Classify, LinearClassifier};
use crate::error::{ArtifactError, StartupError};
use crate::scaler::{Scaler, Transform};

/// File name of the classifier artifact.
pub const MODEL_FILE: &str = "model.json";
/// File name of the scaler artifact.
pub const SCALER_FILE: &str = "scaler.json";

/// Resolved locations of both artifacts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactPaths {
    pub scaler: PathBuf,
    pub model: PathBuf,
}

impl ArtifactPaths {
    /// Search `start_dir` and its ancestors for both artifacts.
    ///
    /// Reports every missing file at once rather than stopping at the first.
    pub fn resolve(start_dir: &Path) -> Result<Self, StartupError> {
        let scaler = locate(SCALER_FILE, start_dir);
        let model = locate(MODEL_FILE, start_dir);

        match (scaler, model) {
            (Some(scaler), Some(model)) => {
                info!(
                    scaler = %scaler.display(),
                    model = %model.display(),
                    "resolved artifacts"
                );
                Ok(Self { scaler, model })
            }
            (scaler, model) => {
                let mut files = Vec::new();
                if scaler.is_none() {
                    files.push(SCALER_FILE.to_string());
                }
                if model.is_none() {
                    files.push(MODEL_FILE.to_string());
                }
                Err(StartupError::MissingArtifact {
                    files,
                    searched_from: start_dir.to_path_buf(),
                })
            }
        }
    }

    /// Deserialize and structurally check both artifacts.
    pub fn load(&self) -> Result<(Scaler, LinearClassifier), StartupError> {
        let scaler: Scaler = read_json(&self.scaler)?;
        scaler.check().map_err(|e| corrupt(&self.scaler, e))?;

        let model: LinearClassifier = read_json(&self.model)?;
        model.check().map_err(|e| corrupt(&self.model, e))?;

        if scaler.n_features() != FEATURE_COUNT {
            return Err(corrupt(
                &self.scaler,
                ArtifactError::Invalid(format!(
                    "scaler fitted on {} features, expected {FEATURE_COUNT}",
                    scaler.n_features()
                )),
            ));
        }
        if model.n_features() != scaler.n_features() {
            return Err(corrupt(
                &self.model,
                ArtifactError::Invalid(format!(
                    "model expects {} features but scaler produces {}",
                    model.n_features(),
                    scaler.n_features()
                )),
            ));
        }

        info!(
            features = scaler.n_features(),
            classes = model.classes.len(),
            "loaded artifacts"
        );
        Ok((scaler, model))
    }
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, StartupError> {
    let bytes = fs::read(path).map_err(|e| corrupt(path, e.into()))?;
    serde_json::from_slice(&bytes).map_err(|e| corrupt(path, e.into()))
}

fn corrupt(path: &Path, source: ArtifactError) -> StartupError {
    StartupError::CorruptArtifact {
        path: path.to_path_buf(),
        source,
    }
}
