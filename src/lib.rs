//! `house-price` - A CLI tool for predicting house prices
//!
//! This library trains a two-feature linear regression (square footage and
//! bedrooms) from a CSV dataset, persists it, and predicts prices from it,
//! falling back to a fixed formula whenever no usable model is available.

pub mod cli;
pub mod config;
pub mod data;
pub mod error;
pub mod model;
pub mod operations;
pub mod system;
pub mod utils;

use anyhow::Result;
use cli::{Args, Mode};
use config::Settings;
use error::PredictError;
use operations::{PredictionRecord, Predictor, Trainer, append_prediction};
use system::{RealSystem, System};
use tracing::{error, info, warn};

/// Main entry point for the house-price library
pub fn run(args: &Args) -> Result<()> {
    let system = RealSystem;
    let mode = args.mode()?;
    let settings = Settings::resolve(&system, args)?;

    match mode {
        Mode::Train => run_train(&system, &settings),
        Mode::Predict {
            square_footage,
            bedrooms,
        } => {
            let price = run_predict(&system, &settings, &square_footage, &bedrooms);
            // Only the price goes to stdout.
            println!("{price:.0}");
            Ok(())
        }
    }
}

/// Train and save the model
///
/// # Errors
///
/// Returns a model error if no model was produced; the cause has already
/// been logged
pub fn run_train(system: &dyn System, settings: &Settings) -> Result<()> {
    info!("Training model...");
    let trainer = Trainer::new(system, &settings.data_path, &settings.model_path);

    if trainer.train().is_none() {
        return Err(PredictError::model("Failed to train model").into());
    }

    info!("Model trained successfully!");
    Ok(())
}

/// Predict the whole-number price for raw inputs
///
/// Invalid inputs are logged and yield 0. The result is already truncated;
/// print it with `{:.0}`. Valid predictions are appended to
/// the prediction log when one is configured; a log failure only warns.
pub fn run_predict(
    system: &dyn System,
    settings: &Settings,
    square_footage: &str,
    bedrooms: &str,
) -> f64 {
    let predictor = Predictor::new(system, settings);

    let estimate = match predictor.predict_input(square_footage, bedrooms) {
        Ok(estimate) => estimate,
        Err(err) => {
            error!("{err}");
            return 0.0;
        }
    };

    if let Some(log_path) = settings.prediction_log.as_deref()
        && let Err(err) =
            append_prediction(system, log_path, PredictionRecord::from_estimate(&estimate))
    {
        warn!("Failed to log prediction: {err:#}");
    }

    estimate.whole_price()
}
