//! Configuration management module
//!
//! Handles the optional YAML settings file, its validation, and merging it
//! with command-line flags into the effective [`Settings`].

pub mod validation;
pub mod yaml;

use crate::cli::{Args, DEFAULT_CONFIG_PATH};
use crate::error::PredictError;
use crate::model::FallbackFormula;
use crate::system::System;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Dataset used when neither a flag nor the config file names one
pub const DEFAULT_DATA_PATH: &str = "data.csv";

/// Model file used when neither a flag nor the config file names one
pub const DEFAULT_MODEL_PATH: &str = "model.bin";

/// Contents of the YAML settings file
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Training dataset path
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<PathBuf>,

    /// Model file path
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<PathBuf>,

    /// JSON prediction log path
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prediction_log: Option<PathBuf>,

    /// Overrides for the fallback formula constants
    #[serde(default)]
    pub fallback: FallbackConfig,
}

/// Partial fallback formula; unset values keep their defaults
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FallbackConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_price: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price_per_sqft: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value_per_bedroom: Option<f64>,
}

impl FallbackConfig {
    /// Overlay the configured values on `base`
    #[must_use]
    pub fn apply(&self, base: FallbackFormula) -> FallbackFormula {
        FallbackFormula {
            base_price: self.base_price.unwrap_or(base.base_price),
            price_per_sqft: self.price_per_sqft.unwrap_or(base.price_per_sqft),
            value_per_bedroom: self.value_per_bedroom.unwrap_or(base.value_per_bedroom),
        }
    }
}

impl Config {
    /// Load configuration from file
    pub fn load_from_file(system: &dyn System, path: &str) -> anyhow::Result<Self> {
        yaml::load_config(system, path)
    }

    /// Validate configuration values
    pub fn validate(&self) -> anyhow::Result<()> {
        validation::validate_config(self)
    }
}

/// Effective settings after merging flags, config file and defaults
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub data_path: PathBuf,
    pub model_path: PathBuf,
    pub prediction_log: Option<PathBuf>,
    pub fallback: FallbackFormula,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            data_path: PathBuf::from(DEFAULT_DATA_PATH),
            model_path: PathBuf::from(DEFAULT_MODEL_PATH),
            prediction_log: None,
            fallback: FallbackFormula::default(),
        }
    }
}

impl Settings {
    /// Resolve settings: flags (or their env vars) win over the config file,
    /// which wins over built-in defaults
    ///
    /// # Errors
    ///
    /// Returns a configuration error if:
    /// - A non-default config file was requested but does not exist
    /// - The config file cannot be read, parsed or validated
    /// - The merged settings are inconsistent
    pub fn resolve(system: &dyn System, args: &Args) -> anyhow::Result<Self> {
        let config = if system.exists(Path::new(&args.config)) {
            debug!("Loading configuration from {}", args.config);
            Config::load_from_file(system, &args.config)
                .map_err(|e| PredictError::configuration(format!("{e:#}")))?
        } else if args.config != DEFAULT_CONFIG_PATH {
            return Err(PredictError::configuration(format!(
                "Configuration file not found: {}",
                args.config
            ))
            .into());
        } else {
            Config::default()
        };

        let settings = Self::merge(config, args);
        validation::validate_settings(&settings)
            .map_err(|e| PredictError::configuration(format!("{e:#}")))?;

        debug!("Effective settings: {settings:?}");
        Ok(settings)
    }

    fn merge(config: Config, args: &Args) -> Self {
        let defaults = Self::default();
        Self {
            data_path: args
                .data
                .clone()
                .or(config.data)
                .unwrap_or(defaults.data_path),
            model_path: args
                .model
                .clone()
                .or(config.model)
                .unwrap_or(defaults.model_path),
            prediction_log: args.prediction_log.clone().or(config.prediction_log),
            fallback: config.fallback.apply(defaults.fallback),
        }
    }
}
