//! Price prediction with on-demand training and formula fallback

use crate::config::Settings;
use crate::error::PredictError;
use crate::model::{FallbackFormula, LinearModel, PriceModel, load_model};
use crate::operations::train::Trainer;
use crate::system::System;
use std::path::Path;
use tracing::{debug, warn};

/// A completed prediction
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Estimate {
    pub square_footage: f64,
    pub bedrooms: f64,
    pub price: f64,
}

/// 2^63, the first whole number past `i64::MAX`
const I64_LIMIT: f64 = 9_223_372_036_854_775_808.0;

impl Estimate {
    /// Price as printed: truncated toward zero
    ///
    /// Format with `{:.0}` to write every digit of prices beyond the integer
    /// types.
    #[must_use]
    #[inline]
    pub fn whole_price(&self) -> f64 {
        // Adding zero turns -0.0 into 0.0 so it prints as "0".
        self.price.trunc() + 0.0
    }

    /// The whole price as an `i64`, if it fits in one
    #[must_use]
    #[inline]
    #[allow(
        clippy::cast_possible_truncation,
        reason = "The value is whole and checked against the i64 range"
    )]
    pub fn whole_price_i64(&self) -> Option<i64> {
        let whole = self.whole_price();
        (-I64_LIMIT..I64_LIMIT)
            .contains(&whole)
            .then_some(whole as i64)
    }
}

/// Predicts prices from the saved model, training or falling back as needed
#[non_exhaustive]
pub struct Predictor<'src> {
    data_path: &'src Path,
    model_path: &'src Path,
    fallback: FallbackFormula,
    system: &'src dyn System,
}

impl<'src> Predictor<'src> {
    #[must_use]
    #[inline]
    pub fn new(system: &'src dyn System, settings: &'src Settings) -> Self {
        Self {
            data_path: &settings.data_path,
            model_path: &settings.model_path,
            fallback: settings.fallback,
            system,
        }
    }

    /// Predict from raw command-line strings
    ///
    /// # Errors
    ///
    /// Returns an input error if either value is not a finite number; no
    /// model is loaded or trained in that case
    pub fn predict_input(
        &self,
        square_footage: &str,
        bedrooms: &str,
    ) -> Result<Estimate, PredictError> {
        let (square_footage, bedrooms) = parse_inputs(square_footage, bedrooms)?;
        Ok(Estimate {
            square_footage,
            bedrooms,
            price: self.predict(square_footage, bedrooms),
        })
    }

    /// Predict a price; always produces a value
    ///
    /// Uses the saved model, training one first if the model file is missing.
    /// Falls back to the fixed formula when no usable model is available.
    #[must_use]
    pub fn predict(&self, square_footage: f64, bedrooms: f64) -> f64 {
        if let Some(model) = self.resolve_model() {
            let price = model.predict(square_footage, bedrooms);
            if price.is_finite() {
                return price;
            }
            warn!("Error during prediction: model produced {price}, using fallback formula");
        }

        debug!("Using fallback formula {:?}", self.fallback);
        self.fallback.predict(square_footage, bedrooms)
    }

    /// The model to predict with, if any
    fn resolve_model(&self) -> Option<LinearModel> {
        if !self.system.exists(self.model_path) {
            debug!(
                "No model at {}, training one first",
                self.model_path.display()
            );
            return Trainer::new(self.system, self.data_path, self.model_path).train();
        }

        match load_model(self.system, self.model_path) {
            Ok(model) => Some(model),
            Err(err) => {
                warn!("Error loading model: {err:#}");
                None
            }
        }
    }
}

/// Parse the two prediction inputs
///
/// # Errors
///
/// Returns an input error unless both values parse as finite numbers
pub fn parse_inputs(square_footage: &str, bedrooms: &str) -> Result<(f64, f64), PredictError> {
    Ok((parse_number(square_footage)?, parse_number(bedrooms)?))
}

fn parse_number(raw: &str) -> Result<f64, PredictError> {
    match raw.trim().parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(value),
        _ => Err(PredictError::input(format!(
            "Inputs must be numbers (got '{raw}')"
        ))),
    }
}
