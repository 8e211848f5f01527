//! Fixed-coefficient estimate used when no trained model is available

use super::PriceModel;
use serde::{Deserialize, Serialize};

/// Base price of any house
pub const DEFAULT_BASE_PRICE: f64 = 100_000.0;

/// Price added per square foot
pub const DEFAULT_PRICE_PER_SQFT: f64 = 150.0;

/// Price added per bedroom
pub const DEFAULT_VALUE_PER_BEDROOM: f64 = 25_000.0;

/// `base + sqft * rate + bedrooms * value`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FallbackFormula {
    pub base_price: f64,
    pub price_per_sqft: f64,
    pub value_per_bedroom: f64,
}

impl Default for FallbackFormula {
    fn default() -> Self {
        Self {
            base_price: DEFAULT_BASE_PRICE,
            price_per_sqft: DEFAULT_PRICE_PER_SQFT,
            value_per_bedroom: DEFAULT_VALUE_PER_BEDROOM,
        }
    }
}

impl PriceModel for FallbackFormula {
    #[inline]
    fn predict(&self, square_footage: f64, bedrooms: f64) -> f64 {
        self.base_price + square_footage * self.price_per_sqft + bedrooms * self.value_per_bedroom
    }
}
