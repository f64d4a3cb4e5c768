//! Inference layer: artifact loading, feature scaling, linear classification.

mod artifacts;
mod batch;
mod classifier;
mod error;
mod scaler;
mod service;

pub use artifacts::{ArtifactPaths, MODEL_FILE, SCALER_FILE};
pub use batch::BatchError;
pub use classifier::{Classify, LinearClassifier};
pub use error::{ArtifactError, PredictError, StartupError};
pub use scaler::{Scaler, Transform};
pub use service::PricePredictor;
