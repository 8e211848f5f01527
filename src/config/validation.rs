//! Configuration validation logic

use crate::config::{Config, Settings};
use anyhow::{Result, anyhow};
use std::path::Path;

/// Validate a configuration file's contents
///
/// # Errors
///
/// Returns an error if:
/// - A configured path is empty
/// - A fallback constant is not a finite number
#[inline]
pub fn validate_config(config: &Config) -> Result<()> {
    for (key, path) in [
        ("data", config.data.as_deref()),
        ("model", config.model.as_deref()),
        ("prediction_log", config.prediction_log.as_deref()),
    ] {
        if let Some(path) = path {
            validate_path(key, path)?;
        }
    }

    for (key, value) in [
        ("fallback.base_price", config.fallback.base_price),
        ("fallback.price_per_sqft", config.fallback.price_per_sqft),
        ("fallback.value_per_bedroom", config.fallback.value_per_bedroom),
    ] {
        if let Some(value) = value
            && !value.is_finite()
        {
            return Err(anyhow!("{key} must be a finite number, got {value}"));
        }
    }

    Ok(())
}

/// Validate merged settings
///
/// # Errors
///
/// Returns an error if a path is empty, or if the dataset, model file and
/// prediction log do not all point at different files
#[inline]
pub fn validate_settings(settings: &Settings) -> Result<()> {
    validate_path("data", &settings.data_path)?;
    validate_path("model", &settings.model_path)?;

    if settings.data_path == settings.model_path {
        return Err(anyhow!(
            "Data and model paths must differ (both are '{}')",
            settings.data_path.display()
        ));
    }

    if let Some(log) = settings.prediction_log.as_deref() {
        validate_path("prediction_log", log)?;
        if log == settings.data_path || log == settings.model_path {
            return Err(anyhow!(
                "Prediction log '{}' must not be the data or model file",
                log.display()
            ));
        }
    }

    Ok(())
}

fn validate_path(key: &str, path: &Path) -> Result<()> {
    if path.as_os_str().is_empty() || path.to_string_lossy().trim().is_empty() {
        return Err(anyhow!("{key} path cannot be empty"));
    }
    Ok(())
}
