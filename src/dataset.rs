//! Historical dataset loading
//! Reads the business CSV export and computes the headline metrics shown above the simulation

use std::fs::File;
use std::io::Read;
use std::path::Path;

use thiserror::Error;
use tracing::debug;

use crate::error::SimError;
use crate::models::{BusinessRecord, KeyMetrics};

/// Columns the simulation cannot run without
pub const REQUIRED_COLUMNS: [&str; 5] =
    ["Price", "Units_Sold", "Total_Cost", "Profit", "Current_Ratio"];

/// Dataset loading errors
#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("failed to open dataset: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("missing required column '{0}'")]
    MissingColumn(&'static str),

    #[error("non-finite value {value} in column '{column}' of record {row}")]
    InvalidValue {
        row: usize,
        column: &'static str,
        value: f64,
    },
}

/// Load all records from a CSV file on disk
pub fn load_records(path: impl AsRef<Path>) -> Result<Vec<BusinessRecord>, DatasetError> {
    let path = path.as_ref();
    debug!(path = %path.display(), "loading dataset");
    let file = File::open(path)?;
    read_records(file)
}

/// Parse records from any CSV source with a header row
pub fn read_records<R: Read>(reader: R) -> Result<Vec<BusinessRecord>, DatasetError> {
    let mut reader = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);

    let headers = reader.headers()?.clone();
    for column in REQUIRED_COLUMNS {
        if !headers.iter().any(|h| h == column) {
            return Err(DatasetError::MissingColumn(column));
        }
    }

    let mut records = Vec::new();
    for (row, result) in reader.deserialize::<BusinessRecord>().enumerate() {
        let record = result?;
        validate_record(row + 1, &record)?;
        records.push(record);
    }

    debug!(records = records.len(), "dataset loaded");
    Ok(records)
}

fn validate_record(row: usize, record: &BusinessRecord) -> Result<(), DatasetError> {
    let fields = [
        ("Price", record.price),
        ("Units_Sold", record.units_sold),
        ("Total_Cost", record.total_cost),
        ("Profit", record.profit),
        ("Current_Ratio", record.current_ratio),
    ];
    for (column, value) in fields {
        if !value.is_finite() {
            return Err(DatasetError::InvalidValue { row, column, value });
        }
    }
    Ok(())
}

/// Headline averages plus the latest row's figures
pub fn key_metrics(records: &[BusinessRecord]) -> Result<KeyMetrics, SimError> {
    let latest = records.last().ok_or(SimError::EmptyDataset)?;
    let n = records.len() as f64;

    let average_profit = records.iter().map(|r| r.profit).sum::<f64>() / n;
    let average_current_ratio = records.iter().map(|r| r.current_ratio).sum::<f64>() / n;

    // Only report revenue when the column is populated everywhere
    let average_revenue = records
        .iter()
        .map(|r| r.revenue)
        .sum::<Option<f64>>()
        .map(|total| total / n);

    Ok(KeyMetrics {
        records: records.len(),
        average_profit,
        average_revenue,
        average_current_ratio,
        latest_profit: latest.profit,
        latest_current_ratio: latest.current_ratio,
    })
}

/// Profit of the most recent record, the benchmark the verdict compares against
pub fn latest_actual_profit(records: &[BusinessRecord]) -> Result<f64, SimError> {
    records
        .last()
        .map(|r| r.profit)
        .ok_or(SimError::EmptyDataset)
}
