//! Batch prediction over Arrow RecordBatches.
//!
//! Columns are matched to the feature schema by name, so column order in
//! the input does not matter. Any numeric or boolean column type is accepted
//! and cast to `Float64`. Any other type rejects the batch.

use arrow::array::{Array, ArrayRef, Float64Array};
use arrow::compute::cast;
use arrow::datatypes::DataType;
use arrow::error::ArrowError;
use arrow::record_batch::RecordBatch;
use phoneprice_core::{FEATURES, FeatureVector, InputError, PriceLabel};
use thiserror::Error;
use tracing::info;

use crate::classifier::Classify;
use crate::error::PredictError;
use crate::scaler::Transform;
use crate::service::PricePredictor;

/// Failures that reject a whole batch rather than a single row.
#[derive(Debug, Error)]
pub enum BatchError {
    #[error("missing column '{0}'")]
    MissingColumn(String),

    #[error("column '{column}' has non-numeric type {data_type}")]
    NonNumericColumn { column: String, data_type: DataType },

    #[error("arrow error: {0}")]
    Arrow(#[from] ArrowError),
}

impl<T: Transform, C: Classify> PricePredictor<T, C> {
    /// Predict every row of `batch`, one result per row.
    ///
    /// A missing or non-numeric column fails the batch. Null cells and
    /// out-of-domain values fail only their row.
    pub fn predict_batch(
        &self,
        batch: &RecordBatch,
    ) -> Result<Vec<Result<PriceLabel, PredictError>>, BatchError> {
        let columns = feature_columns(batch)?;
        let arrays: Vec<&Float64Array> = columns
            .iter()
            .map(|c| {
                c.as_any()
                    .downcast_ref::<Float64Array>()
                    .ok_or_else(|| ArrowError::CastError("expected Float64 after cast".into()))
            })
            .collect::<Result<_, _>>()?;

        let results: Vec<_> = (0..batch.num_rows())
            .map(|row| {
                let values = row_values(&arrays, row)?;
                self.predict(&FeatureVector::new(values))
            })
            .collect();

        let failed = results.iter().filter(|r| r.is_err()).count();
        info!(rows = results.len(), failed, "batch predicted");
        Ok(results)
    }

    /// Predict every row across several batches, in order.
    pub fn predict_batches(
        &self,
        batches: &[RecordBatch],
    ) -> Result<Vec<Result<PriceLabel, PredictError>>, BatchError> {
        let mut out = Vec::new();
        for batch in batches {
            out.extend(self.predict_batch(batch)?);
        }
        Ok(out)
    }
}

/// Pull the feature columns out of `batch` in schema order, cast to Float64.
fn feature_columns(batch: &RecordBatch) -> Result<Vec<ArrayRef>, BatchError> {
    FEATURES
        .iter()
        .map(|f| {
            let col = batch
                .column_by_name(f.name)
                .ok_or_else(|| BatchError::MissingColumn(f.name.to_string()))?;
            let data_type = col.data_type();
            if !(data_type.is_numeric() || *data_type == DataType::Boolean) {
                return Err(BatchError::NonNumericColumn {
                    column: f.name.to_string(),
                    data_type: data_type.clone(),
                });
            }
            Ok(cast(col.as_ref(), &DataType::Float64)?)
        })
        .collect()
}

fn row_values(arrays: &[&Float64Array], row: usize) -> Result<Vec<f64>, PredictError> {
    arrays
        .iter()
        .zip(&FEATURES)
        .map(|(arr, spec)| {
            if arr.is_null(row) {
                Err(PredictError::from(InputError::NullValue { field: spec.name }))
            } else {
                Ok(arr.value(row))
            }
        })
        .collect()
}
