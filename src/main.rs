//! # `house-price`
//!
//! `house-price` predicts a house price from its square footage and bedroom
//! count using a linear regression model trained on a CSV dataset.
//!
//! ## Features
//! - Train an ordinary least squares model from `square_footage,bedrooms,price` rows.
//! - Persist the fitted model and reuse it for later predictions.
//! - Train on demand when a prediction is requested and no model exists.
//! - Fall back to a fixed formula when no usable model is available.
//! - Optionally keep a JSON log of every prediction.
//!
//! ## Usage
//!
//! **Train only:**
//! ```sh
//! house-price --data data.csv --model model.bin
//! ```
//!
//! **Predict:**
//! ```sh
//! house-price 1500 3
//! ```
//!
//! See `house-price --help` for more options and details.
//!
//! ---
//! © 2024 `house-price` Authors. MIT or Apache-2.0 licensed. See README and LICENSE files for more info.

use anyhow::Result;
use clap::Parser as _;
use house_price::cli::Args;
use house_price::error::PredictError;
use tracing::error;
use tracing_subscriber::{EnvFilter, fmt};

fn main() -> Result<()> {
    let args = Args::parse();

    // Diagnostics go to stderr; stdout carries only the predicted price
    let log_level = if args.verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));

    fmt()
        .with_target(false)
        .with_writer(std::io::stderr)
        .with_env_filter(filter)
        .init();

    match house_price::run(&args) {
        Ok(()) => std::process::exit(0),
        Err(err) => {
            error!("{}", err);
            std::process::exit(
                err.downcast_ref::<PredictError>()
                    .map_or(1, PredictError::exit_code),
            );
        }
    }
}
