//! Request input readers: JSON phone specs and Parquet batches.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use anyhow::Context;
use arrow::record_batch::RecordBatch;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use phoneprice_core::PhoneSpec;

/// Read a [`PhoneSpec`] from a JSON file, or stdin when `path` is `-`.
pub fn read_spec(path: &Path) -> anyhow::Result<PhoneSpec> {
    let mut text = String::new();
    if path == Path::new("-") {
        std::io::stdin()
            .read_to_string(&mut text)
            .context("reading spec from stdin")?;
    } else {
        text = std::fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?;
    }
    parse_spec(&text)
}

pub fn parse_spec(text: &str) -> anyhow::Result<PhoneSpec> {
    serde_json::from_str(text).context("parsing phone spec JSON")
}

/// Read every record batch from a Parquet file.
pub fn read_parquet(path: &Path) -> anyhow::Result<Vec<RecordBatch>> {
    let file = File::open(path).with_context(|| format!("opening {}", path.display()))?;
    let reader = ParquetRecordBatchReaderBuilder::try_new(file)?.build()?;
    let batches: Result<Vec<RecordBatch>, _> = reader.collect();
    Ok(batches?)
}
