//! Terminal rendering for predictions, the feature schema, and batch results.

use std::collections::BTreeMap;
use std::fmt::Write;

use phoneprice_ai::PredictError;
use phoneprice_core::{FEATURES, PriceLabel};
use serde::Serialize;

/// JSON shape of a single prediction.
#[derive(Serialize)]
pub struct PredictionOutput {
    pub class: i64,
    pub label: PriceLabel,
}

impl From<PriceLabel> for PredictionOutput {
    fn from(label: PriceLabel) -> Self {
        Self {
            class: label.class_index(),
            label,
        }
    }
}

// ── Schema ──

/// Ordered feature table: index, name, domain, default.
pub fn schema_table() -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{:>2}  {:<20} {:<24} {:<22} {}",
        "#", "name", "label", "domain", "default"
    );
    for (i, f) in FEATURES.iter().enumerate() {
        let _ = writeln!(
            out,
            "{:>2}  {:<20} {:<24} {:<22} {}",
            i,
            f.name,
            f.label,
            f.domain.to_string(),
            f.default
        );
    }
    out
}

// ── Batch ──

/// One line per row: `row<TAB>label` or `row<TAB>error: ...`.
pub fn batch_line(row: usize, result: &Result<PriceLabel, PredictError>) -> String {
    match result {
        Ok(label) => format!("{row}\t{label}"),
        Err(e) => format!("{row}\terror: {e}"),
    }
}

/// Per-label counts, in tier order, followed by the failure count.
pub fn batch_tally(results: &[Result<PriceLabel, PredictError>]) -> String {
    let mut counts: BTreeMap<PriceLabel, usize> = PriceLabel::ALL.iter().map(|&l| (l, 0)).collect();
    let mut failed = 0usize;
    for r in results {
        match r {
            Ok(label) => *counts.entry(*label).or_default() += 1,
            Err(_) => failed += 1,
        }
    }

    let mut out = String::new();
    for (label, n) in &counts {
        let _ = writeln!(out, "  {:<16} {n}", label.as_str());
    }
    let _ = writeln!(out, "  {:<16} {failed}", "failed");
    out
}
