//! Pre-fitted feature scaling.

use serde::{Deserialize, Serialize};

use crate::error::ArtifactError;

/// Feature-scaling step applied before classification.
pub trait Transform {
    /// Input width the transform was fitted on.
    fn n_features(&self) -> usize;

    /// Scale one row. `row.len()` must equal [`n_features`](Self::n_features).
    fn transform(&self, row: &[f64]) -> Vec<f64>;
}

/// Scaler artifact, as stored in `scaler.json`.
///
/// ```json
/// {"kind": "standard", "mean": [...], "scale": [...]}
/// {"kind": "min_max", "min": [...], "max": [...]}
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Scaler {
    /// `(x - mean) / scale` per column.
    Standard { mean: Vec<f64>, scale: Vec<f64> },
    /// `(x - min) / (max - min)` per column.
    MinMax { min: Vec<f64>, max: Vec<f64> },
}

impl Scaler {
    /// Reject parameter sets that would produce NaN/inf or mismatched widths.
    pub fn check(&self) -> Result<(), ArtifactError> {
        let (a, b, a_name, b_name) = match self {
            Self::Standard { mean, scale } => (mean, scale, "mean", "scale"),
            Self::MinMax { min, max } => (min, max, "min", "max"),
        };

        if a.is_empty() {
            return Err(ArtifactError::Invalid(format!("scaler {a_name} is empty")));
        }
        if a.len() != b.len() {
            return Err(ArtifactError::Invalid(format!(
                "scaler {a_name} has {} values but {b_name} has {}",
                a.len(),
                b.len()
            )));
        }
        if let Some(i) = a.iter().chain(b).position(|v| !v.is_finite()) {
            return Err(ArtifactError::Invalid(format!(
                "scaler parameter {} is not finite",
                i % a.len()
            )));
        }

        match self {
            Self::Standard { scale, .. } => {
                if let Some(i) = scale.iter().position(|&s| s <= 0.0) {
                    return Err(ArtifactError::Invalid(format!(
                        "scaler scale[{i}] must be positive"
                    )));
                }
            }
            Self::MinMax { min, max } => {
                if let Some(i) = min.iter().zip(max).position(|(lo, hi)| hi <= lo) {
                    return Err(ArtifactError::Invalid(format!(
                        "scaler max[{i}] must exceed min[{i}]"
                    )));
                }
            }
        }
        Ok(())
    }
}

impl Transform for Scaler {
    fn n_features(&self) -> usize {
        match self {
            Self::Standard { mean, .. } => mean.len(),
            Self::MinMax { min, .. } => min.len(),
        }
    }

    fn transform(&self, row: &[f64]) -> Vec<f64> {
        match self {
            Self::Standard { mean, scale } => row
                .iter()
                .zip(mean.iter().zip(scale))
                .map(|(x, (m, s))| (x - m) / s)
                .collect(),
            Self::MinMax { min, max } => row
                .iter()
                .zip(min.iter().zip(max))
                .map(|(x, (lo, hi))| (x - lo) / (hi - lo))
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_scaling() {
        let s = Scaler::Standard {
            mean: vec![10.0, 0.5],
            scale: vec![2.0, 0.5],
        };
        assert_eq!(s.n_features(), 2);
        assert_eq!(s.transform(&[14.0, 0.0]), vec![2.0, -1.0]);
    }

    #[test]
    fn min_max_scaling() {
        let s = Scaler::MinMax {
            min: vec![0.0, 100.0],
            max: vec![10.0, 300.0],
        };
        assert_eq!(s.transform(&[5.0, 100.0]), vec![0.5, 0.0]);
    }

    #[test]
    fn parses_tagged_json() {
        let s: Scaler =
            serde_json::from_str(r#"{"kind":"standard","mean":[1.0],"scale":[2.0]}"#).unwrap();
        assert_eq!(
            s,
            Scaler::Standard {
                mean: vec![1.0],
                scale: vec![2.0]
            }
        );

        let s: Scaler = serde_json::from_str(r#"{"kind":"min_max","min":[0],"max":[4]}"#).unwrap();
        assert_eq!(s.transform(&[1.0]), vec![0.25]);
    }

    #[test]
    fn unknown_kind_fails_to_parse() {
        let result: Result<Scaler, _> =
            serde_json::from_str(r#"{"kind":"robust","center":[1.0],"scale":[2.0]}"#);
        assert!(result.is_err());
    }

    #[test]
    fn check_rejects_zero_scale() {
        let s = Scaler::Standard {
            mean: vec![0.0, 0.0],
            scale: vec![1.0, 0.0],
        };
        let err = s.check().unwrap_err();
        assert!(err.to_string().contains("scale[1]"), "{err}");
    }

    #[test]
    fn check_rejects_length_mismatch() {
        let s = Scaler::Standard {
            mean: vec![0.0, 0.0],
            scale: vec![1.0],
        };
        assert!(s.check().is_err());
    }

    #[test]
    fn check_rejects_inverted_range() {
        let s = Scaler::MinMax {
            min: vec![5.0],
            max: vec![5.0],
        };
        assert!(s.check().is_err());
    }

    #[test]
    fn check_accepts_valid() {
        let s = Scaler::Standard {
            mean: vec![0.0; 3],
            scale: vec![1.0; 3],
        };
        s.check().unwrap();
    }
}
