//! Price tiers the classifier predicts, keyed by class index.

use std::fmt;

use serde::{Serialize, Serializer};

/// One of the four price tiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PriceLabel {
    Low,
    Medium,
    High,
    VeryHigh,
}

impl PriceLabel {
    /// All tiers in class-index order.
    pub const ALL: [PriceLabel; 4] = [Self::Low, Self::Medium, Self::High, Self::VeryHigh];

    /// Map a classifier output to a tier. `None` for indices outside 0..=3.
    pub fn from_class(class: i64) -> Option<Self> {
        usize::try_from(class)
            .ok()
            .and_then(|i| Self::ALL.get(i).copied())
    }

    pub fn class_index(&self) -> i64 {
        *self as i64
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "Low Cost",
            Self::Medium => "Medium Cost",
            Self::High => "High Cost",
            Self::VeryHigh => "Very High Cost",
        }
    }
}

impl Serialize for PriceLabel {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl fmt::Display for PriceLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
