use std::path::PathBuf;

use phoneprice_core::InputError;
use thiserror::Error;

/// Fatal conditions that stop the service before it can predict.
#[derive(Debug, Error)]
pub enum StartupError {
    #[error(
        "missing artifact(s) {}: searched {} and its parent directories",
        .files.join(", "),
        .searched_from.display()
    )]
    MissingArtifact {
        files: Vec<String>,
        searched_from: PathBuf,
    },

    #[error("corrupt artifact {}: {source}", .path.display())]
    CorruptArtifact {
        path: PathBuf,
        #[source]
        source: ArtifactError,
    },
}

/// Underlying reason an artifact could not be loaded.
#[derive(Debug, Error)]
pub enum ArtifactError {
    #[error("read failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("parse failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("{0}")]
    Invalid(String),
}

/// Per-request failures. The service stays up after any of these.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PredictError {
    #[error("invalid input: {0}")]
    InvalidInput(#[from] InputError),

    #[error("classifier returned unknown class {0}")]
    UnknownClass(i64),
}
