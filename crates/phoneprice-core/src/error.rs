use thiserror::Error;

use crate::schema::Domain;

/// Why a feature vector was rejected before reaching the model.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum InputError {
    #[error("expected {expected} features, got {actual}")]
    WrongLength { expected: usize, actual: usize },

    #[error("{field} = {value} is outside {domain}")]
    OutOfDomain {
        field: &'static str,
        value: f64,
        domain: Domain,
    },

    #[error("{field} is not a finite number")]
    NotFinite { field: &'static str },

    #[error("{field} is null")]
    NullValue { field: &'static str },
}
