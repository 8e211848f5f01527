//! Model training

use crate::data::load_dataset;
use crate::model::{LinearModel, save_model};
use crate::system::System;
use anyhow::Result;
use std::path::Path;
use tracing::{debug, error, info};

/// Fits a model on the dataset and persists it
#[non_exhaustive]
pub struct Trainer<'src> {
    data_path: &'src Path,
    model_path: &'src Path,
    system: &'src dyn System,
}

impl<'src> Trainer<'src> {
    #[must_use]
    #[inline]
    pub const fn new(system: &'src dyn System, data_path: &'src Path, model_path: &'src Path) -> Self {
        Self {
            data_path,
            model_path,
            system,
        }
    }

    /// Train and save a model, logging any failure
    ///
    /// Returns `None` when no model was produced; never fails otherwise.
    #[must_use]
    #[inline]
    pub fn train(&self) -> Option<LinearModel> {
        match self.try_train() {
            Ok(model) => Some(model),
            Err(err) => {
                error!("Error training model: {err:#}");
                None
            }
        }
    }

    /// Train and save a model
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The dataset is missing, malformed, or has no usable rows
    /// - The fit does not produce finite parameters
    /// - The model file cannot be written
    pub fn try_train(&self) -> Result<LinearModel> {
        debug!("Loading training data from {}", self.data_path.display());
        let dataset = load_dataset(self.system, self.data_path)?;
        info!("Training model with {} data points", dataset.len());

        let model = LinearModel::fit(dataset.features(), dataset.targets())?;
        info!(
            "Model coefficients: [{}, {}]",
            model.coefficients[0], model.coefficients[1]
        );
        info!("Model intercept: {}", model.intercept);

        save_model(self.system, self.model_path, &model)?;
        Ok(model)
    }
}
