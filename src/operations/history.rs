//! JSON log of past predictions

use crate::error::PredictError;
use crate::operations::predict::Estimate;
use crate::system::System;
use crate::utils::fs::create_parent_directories;
use anyhow::{Context as _, Result};
use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, warn};

/// One logged prediction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PredictionRecord {
    pub square_footage: f64,
    pub num_bedrooms: f64,
    pub predicted_price: i64,
    /// RFC 3339 UTC timestamp
    pub timestamp: String,
}

impl PredictionRecord {
    /// Record an estimate as of now
    #[must_use]
    pub fn from_estimate(estimate: &Estimate) -> Self {
        Self {
            square_footage: estimate.square_footage,
            num_bedrooms: estimate.bedrooms,
            predicted_price: logged_price(estimate),
            timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
        }
    }
}

/// The whole price as stored in the log, clamped to the `i64` range
#[allow(
    clippy::cast_possible_truncation,
    reason = "Out-of-range prices saturate after the warning"
)]
fn logged_price(estimate: &Estimate) -> i64 {
    estimate.whole_price_i64().unwrap_or_else(|| {
        let whole = estimate.whole_price();
        warn!("Price {whole:.0} is outside the prediction log's integer range, clamping");
        whole as i64
    })
}

/// Read all logged predictions; a missing or empty file is an empty log
///
/// # Errors
///
/// Returns an error if the file cannot be read or is not a JSON array of records
pub fn read_predictions(system: &dyn System, path: &Path) -> Result<Vec<PredictionRecord>> {
    if !system.exists(path) {
        return Ok(Vec::new());
    }

    let content = system
        .read_to_string(path)
        .with_context(|| format!("Failed to read prediction log: {}", path.display()))?;
    if content.trim().is_empty() {
        return Ok(Vec::new());
    }

    serde_json::from_str(&content)
        .with_context(|| format!("Prediction log is not valid JSON: {}", path.display()))
}

/// Append a record to the prediction log, creating it if needed
///
/// # Errors
///
/// Returns an error if the existing log cannot be parsed or the log cannot be written
pub fn append_prediction(system: &dyn System, path: &Path, record: PredictionRecord) -> Result<()> {
    let mut records = read_predictions(system, path)?;
    records.push(record);

    let json = serde_json::to_string_pretty(&records).context("Failed to serialize prediction log")?;

    create_parent_directories(system, path)?;
    system.write(path, json.as_bytes()).map_err(|e| {
        PredictError::filesystem(format!(
            "Failed to write prediction log {}: {e}",
            path.display()
        ))
    })?;

    debug!("Logged prediction #{} to {}", records.len(), path.display());
    Ok(())
}
