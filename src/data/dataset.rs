//! CSV dataset loading

use crate::error::PredictError;
use crate::model::FEATURE_COUNT;
use crate::system::System;
use anyhow::{Context as _, Result};
use csv::{ReaderBuilder, StringRecord, Trim};
use ndarray::{Array1, Array2, ArrayView1, ArrayView2};
use std::io::Read;
use std::path::Path;
use tracing::debug;

/// Columns a usable row must provide, in order
const REQUIRED_FIELDS: usize = FEATURE_COUNT + 1;

/// Training samples: one feature row and one price per sample
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    features: Array2<f64>,
    targets: Array1<f64>,
}

impl Dataset {
    /// (square footage, bedrooms) per sample
    #[must_use]
    pub fn features(&self) -> ArrayView2<'_, f64> {
        self.features.view()
    }

    /// Price per sample
    #[must_use]
    pub fn targets(&self) -> ArrayView1<'_, f64> {
        self.targets.view()
    }

    /// Number of samples
    #[must_use]
    pub fn len(&self) -> usize {
        self.targets.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }
}

/// Load the training dataset from a CSV file
///
/// # Errors
///
/// Returns an error if:
/// - The file does not exist or cannot be read
/// - A usable row contains a malformed number
/// - No usable rows remain
pub fn load_dataset(system: &dyn System, path: &Path) -> Result<Dataset> {
    if !system.exists(path) {
        return Err(PredictError::data(format!(
            "No data found: {} does not exist",
            path.display()
        ))
        .into());
    }

    let reader = system
        .open(path)
        .with_context(|| format!("Failed to open data file: {}", path.display()))?;

    read_dataset(reader).with_context(|| format!("Failed to load data file: {}", path.display()))
}

/// Parse a CSV dataset from any reader
///
/// The first row is a header. Rows with fewer than three fields, or with a
/// blank square footage, bedrooms or price, are skipped. Fields beyond the
/// third are ignored.
///
/// # Errors
///
/// Returns an error if the CSV is unreadable, a number is malformed or not
/// finite, or no usable rows remain
pub fn read_dataset<R: Read>(reader: R) -> Result<Dataset> {
    let mut csv_reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(Trim::All)
        .from_reader(reader);

    let mut features = Vec::new();
    let mut targets = Vec::new();
    let mut skipped = 0_usize;

    for record in csv_reader.records() {
        let record = record.context("Failed to read CSV record")?;
        match parse_sample(&record)? {
            Some(([square_footage, bedrooms], price)) => {
                features.push(square_footage);
                features.push(bedrooms);
                targets.push(price);
            }
            None => skipped += 1,
        }
    }

    if targets.is_empty() {
        return Err(PredictError::data("No valid data found in CSV file").into());
    }
    if skipped > 0 {
        debug!("Skipped {skipped} incomplete rows");
    }

    let features = Array2::from_shape_vec((targets.len(), FEATURE_COUNT), features)
        .context("Failed to shape feature matrix")?;

    Ok(Dataset {
        features,
        targets: Array1::from(targets),
    })
}

/// Parse one record, or `None` if it is incomplete
fn parse_sample(record: &StringRecord) -> Result<Option<([f64; FEATURE_COUNT], f64)>> {
    if record.len() < REQUIRED_FIELDS || record.iter().take(REQUIRED_FIELDS).any(str::is_empty) {
        return Ok(None);
    }

    let line = record.position().map_or(0, csv::Position::line);
    let square_footage = parse_field(record, 0, "square_footage", line)?;
    let bedrooms = parse_field(record, 1, "bedrooms", line)?;
    let price = parse_field(record, 2, "price", line)?;

    Ok(Some(([square_footage, bedrooms], price)))
}

fn parse_field(record: &StringRecord, index: usize, column: &str, line: u64) -> Result<f64> {
    let raw = record.get(index).unwrap_or_default();
    let value = raw.parse::<f64>().map_err(|e| {
        PredictError::data(format!(
            "Line {line}: could not convert {column} '{raw}' to a number: {e}"
        ))
    })?;

    if !value.is_finite() {
        return Err(PredictError::data(format!(
            "Line {line}: {column} '{raw}' is not a finite number"
        ))
        .into());
    }
    Ok(value)
}
