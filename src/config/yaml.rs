//! YAML configuration loading and parsing

use crate::config::Config;
use crate::system::System;
use anyhow::{Context as _, Result, anyhow};
use std::path::Path;

/// Load and parse YAML configuration from file
///
/// An empty file is an empty configuration.
pub fn load_config(system: &dyn System, path: &str) -> Result<Config> {
    let path_obj = Path::new(path);

    if !system.exists(path_obj) {
        return Err(anyhow!(
            "Configuration file not found: {path}\n\
            Create a house-price.yaml file or specify a different path with --config"
        ));
    }

    let content = system
        .read_to_string(path_obj)
        .with_context(|| format!("Failed to read configuration file: {path}"))?;

    let config: Config = if content.trim().is_empty() {
        Config::default()
    } else {
        serde_yaml::from_str(&content).with_context(|| {
            return format!(
                "Failed to parse YAML configuration in file: {path}\n\
                Please check the syntax and structure of your configuration file"
            );
        })?
    };

    config
        .validate()
        .context("Configuration validation failed")?;

    Ok(config)
}
