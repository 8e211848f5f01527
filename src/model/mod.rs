//! Price models
//!
//! A fitted two-feature linear model, the fixed fallback formula, and the
//! binary format the fitted model is persisted in.

pub mod fallback;
pub mod linear;
pub mod storage;

pub use fallback::*;
pub use linear::*;
pub use storage::*;

/// Anything that can turn (square footage, bedrooms) into a price
pub trait PriceModel {
    /// Estimate the price of a house
    fn predict(&self, square_footage: f64, bedrooms: f64) -> f64;
}
