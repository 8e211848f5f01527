use crate::error::PredictError;
use clap::Parser;
use std::path::PathBuf;

/// Settings file looked up when `--config` is not given
pub const DEFAULT_CONFIG_PATH: &str = "./house-price.yaml";

/// Printed when the positional arguments are neither zero nor two values
pub const USAGE: &str = "Usage: house-price <square_footage> <num_bedrooms>\n       \
                         house-price  # to train model only";

/// Command-line arguments for house-price
#[derive(Parser, Debug, Clone)]
#[command(name = "house-price")]
#[command(about = "A CLI tool for predicting house prices from square footage and bedroom count")]
#[command(
    long_about = "Predicts a house price with a linear regression model trained on a CSV \
                  dataset. Without positional arguments the model is trained and saved; with \
                  <SQUARE_FOOTAGE> <BEDROOMS> a price is printed, training first if no model \
                  has been saved yet."
)]
#[command(version)]
pub struct Args {
    /// Square footage and bedroom count; omit both to only train the model
    ///
    /// Values may start with '-'. Options must come before the first value,
    /// since everything after it is taken as a value.
    #[arg(value_name = "VALUES", allow_hyphen_values = true)]
    pub values: Vec<String>,

    /// Training dataset (CSV with square_footage,bedrooms,price columns)
    #[arg(long, value_name = "PATH", env = "HOUSE_PRICE_DATA")]
    pub data: Option<PathBuf>,

    /// Persisted model file
    #[arg(long, value_name = "PATH", env = "HOUSE_PRICE_MODEL")]
    pub model: Option<PathBuf>,

    /// Append each prediction to this JSON log file
    #[arg(long = "log", value_name = "PATH", env = "HOUSE_PRICE_LOG")]
    pub prediction_log: Option<PathBuf>,

    /// Configuration file path
    #[arg(long, value_name = "PATH", default_value = DEFAULT_CONFIG_PATH)]
    pub config: String,

    /// Enable verbose logging output
    #[arg(short, long)]
    pub verbose: bool,
}

/// What the invocation asks for
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mode {
    /// Train and save the model, nothing else
    Train,
    /// Predict a price from the raw square footage and bedroom strings
    Predict {
        square_footage: String,
        bedrooms: String,
    },
}

impl Args {
    /// Decide the mode from the positional arguments
    ///
    /// # Errors
    ///
    /// Returns a usage error unless there are exactly zero or two values
    pub fn mode(&self) -> Result<Mode, PredictError> {
        match self.values.as_slice() {
            [] => Ok(Mode::Train),
            [square_footage, bedrooms] => Ok(Mode::Predict {
                square_footage: square_footage.clone(),
                bedrooms: bedrooms.clone(),
            }),
            _ => Err(PredictError::usage(USAGE)),
        }
    }
}
