//! Linear multi-class classifier over scaled features.
//!
//! Scores each class as `coef[k] · x + intercept[k]` and predicts the class
//! label with the highest score.

use serde::{Deserialize, Serialize};

use crate::error::ArtifactError;

/// Classification step: one scaled row in, one class index out.
pub trait Classify {
    /// Input width the classifier was trained on.
    fn n_features(&self) -> usize;

    /// Predict the class index for one scaled row.
    fn predict(&self, row: &[f64]) -> i64;
}

/// Classifier artifact, as stored in `model.json`.
///
/// `classes[k]` is the index reported when row `k` of `coef` scores
/// highest, so a model trained on relabelled targets still reports the
/// original class numbers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinearClassifier {
    pub classes: Vec<i64>,
    /// One weight row per class, each `n_features` wide.
    pub coef: Vec<Vec<f64>>,
    pub intercept: Vec<f64>,
}

impl LinearClassifier {
    /// Reject ragged or inconsistent parameter sets.
    pub fn check(&self) -> Result<(), ArtifactError> {
        if self.classes.is_empty() {
            return Err(ArtifactError::Invalid("model has no classes".into()));
        }
        if self.coef.len() != self.classes.len() || self.intercept.len() != self.classes.len() {
            return Err(ArtifactError::Invalid(format!(
                "model has {} classes, {} coefficient rows, {} intercepts",
                self.classes.len(),
                self.coef.len(),
                self.intercept.len()
            )));
        }

        let width = self.coef[0].len();
        if width == 0 {
            return Err(ArtifactError::Invalid("model coefficient rows are empty".into()));
        }
        if let Some(k) = self.coef.iter().position(|row| row.len() != width) {
            return Err(ArtifactError::Invalid(format!(
                "model coefficient row {k} has {} values, expected {width}",
                self.coef[k].len()
            )));
        }

        let finite = self.coef.iter().flatten().chain(&self.intercept).all(|v| v.is_finite());
        if !finite {
            return Err(ArtifactError::Invalid(
                "model contains non-finite parameters".into(),
            ));
        }
        Ok(())
    }

    /// Raw per-class scores for one row.
    pub fn decision_function(&self, row: &[f64]) -> Vec<f64> {
        self.coef
            .iter()
            .zip(&self.intercept)
            .map(|(w, b)| w.iter().zip(row).map(|(w, x)| w * x).sum::<f64>() + b)
            .collect()
    }
}

impl Classify for LinearClassifier {
    fn n_features(&self) -> usize {
        self.coef.first().map_or(0, Vec::len)
    }

    fn predict(&self, row: &[f64]) -> i64 {
        let scores = self.decision_function(row);

        // Strict `>` keeps the first of tied scores.
        let mut best = 0;
        for (k, &score) in scores.iter().enumerate().skip(1) {
            if score > scores[best] {
                best = k;
            }
        }
        self.classes[best]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Two features, three classes: class 0 points -x, class 1 +x, class 7 +y.
    fn toy() -> LinearClassifier {
        LinearClassifier {
            classes: vec![0, 1, 7],
            coef: vec![vec![-1.0, 0.0], vec![1.0, 0.0], vec![0.0, 1.0]],
            intercept: vec![0.0, 0.0, 0.0],
        }
    }

    #[test]
    fn predicts_highest_scoring_class() {
        let clf = toy();
        assert_eq!(clf.predict(&[-2.0, 0.0]), 0);
        assert_eq!(clf.predict(&[2.0, 0.5]), 1);
        assert_eq!(clf.predict(&[0.1, 3.0]), 7);
    }

    #[test]
    fn intercept_shifts_decision() {
        let mut clf = toy();
        clf.intercept = vec![5.0, 0.0, 0.0];
        assert_eq!(clf.predict(&[2.0, 0.5]), 0);
    }

    #[test]
    fn ties_resolve_to_first_class() {
        let clf = toy();
        assert_eq!(clf.predict(&[0.0, 0.0]), 0);
    }

    #[test]
    fn decision_function_values() {
        let clf = toy();
        assert_eq!(clf.decision_function(&[1.0, 2.0]), vec![-1.0, 1.0, 2.0]);
    }

    #[test]
    fn n_features_from_coef_width() {
        assert_eq!(toy().n_features(), 2);
    }

    #[test]
    fn parses_json() {
        let clf: LinearClassifier = serde_json::from_str(
            r#"{"classes":[0,1],"coef":[[1.0,0.0],[0.0,1.0]],"intercept":[0.0,0.5]}"#,
        )
        .unwrap();
        clf.check().unwrap();
        assert_eq!(clf.predict(&[0.0, 0.0]), 1);
    }

    #[test]
    fn check_rejects_ragged_rows() {
        let mut clf = toy();
        clf.coef[2] = vec![0.0];
        let err = clf.check().unwrap_err();
        assert!(err.to_string().contains("row 2"), "{err}");
    }

    #[test]
    fn check_rejects_count_mismatch() {
        let mut clf = toy();
        clf.intercept.pop();
        assert!(clf.check().is_err());
    }

    #[test]
    fn check_rejects_empty_model() {
        let clf = LinearClassifier {
            classes: vec![],
            coef: vec![],
            intercept: vec![],
        };
        assert!(clf.check().is_err());
    }

    #[test]
    fn check_rejects_non_finite() {
        let mut clf = toy();
        clf.coef[1][0] = f64::INFINITY;
        assert!(clf.check().is_err());
    }
}
