//! Price-tier inference service.

use std::path::Path;

use phoneprice_core::{FEATURE_COUNT, FeatureVector, InputError, PhoneSpec, PriceLabel};
use tracing::{debug, info, warn};

use crate::artifacts::ArtifactPaths;
use crate::classifier::{Classify, LinearClassifier};
use crate::error::{PredictError, StartupError};
use crate::scaler::{Scaler, Transform};

/// Scales a phone's features and classifies it into a [`PriceLabel`].
///
/// Both handles are fixed at construction and only read afterwards, so a
/// predictor can be shared across threads without locking. The only way to
/// obtain one is [`initialize`](PricePredictor::initialize) (artifacts from
/// disk) or [`from_parts`](PricePredictor::from_parts) (injected handles).
pub struct PricePredictor<T = Scaler, C = LinearClassifier> {
    transform: T,
    classifier: C,
}

impl PricePredictor<Scaler, LinearClassifier> {
    /// Locate `scaler.json` and `model.json` from `start_dir` upward and load them.
    pub fn initialize(start_dir: &Path) -> Result<Self, StartupError> {
        info!(start = %start_dir.display(), "initializing price predictor");
        let paths = ArtifactPaths::resolve(start_dir)?;
        let (scaler, model) = paths.load()?;

        let unmapped: Vec<i64> = model
            .classes
            .iter()
            .copied()
            .filter(|&c| PriceLabel::from_class(c).is_none())
            .collect();
        if !unmapped.is_empty() {
            warn!(
                classes = ?unmapped,
                "model can predict classes with no price label; those requests will fail"
            );
        }

        Ok(Self::from_parts(scaler, model))
    }
}

impl<T: Transform, C: Classify> PricePredictor<T, C> {
    /// Build a predictor from injected handles.
    ///
    /// Both handles must agree on the feature width; the classifier's dot
    /// product would otherwise silently truncate.
    pub fn from_parts(transform: T, classifier: C) -> Self {
        debug_assert_eq!(
            transform.n_features(),
            classifier.n_features(),
            "transform and classifier disagree on feature width"
        );
        Self {
            transform,
            classifier,
        }
    }

    /// Width of the feature vector the loaded transform accepts.
    pub fn n_features(&self) -> usize {
        self.transform.n_features()
    }

    pub fn transform(&self) -> &T {
        &self.transform
    }

    pub fn classifier(&self) -> &C {
        &self.classifier
    }

    /// Classify one feature vector.
    ///
    /// Rejects vectors whose length differs from the transform's width and,
    /// for schema-width vectors, values outside their declared domain.
    pub fn predict(&self, features: &FeatureVector) -> Result<PriceLabel, PredictError> {
        let expected = self.transform.n_features();
        if features.len() != expected {
            return Err(InputError::WrongLength {
                expected,
                actual: features.len(),
            }
            .into());
        }
        if features.len() == FEATURE_COUNT {
            features.validate()?;
        }

        let scaled = self.transform.transform(features.values());
        let class = self.classifier.predict(&scaled);
        let label = PriceLabel::from_class(class).ok_or(PredictError::UnknownClass(class))?;

        debug!(class, label = %label, "predicted");
        Ok(label)
    }

    /// Classify a named-field spec.
    pub fn predict_spec(&self, spec: &PhoneSpec) -> Result<PriceLabel, PredictError> {
        self.predict(&spec.to_vector())
    }
}
