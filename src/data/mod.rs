//! Training data module
//!
//! Loads the `square_footage,bedrooms,price` CSV dataset into arrays

pub mod dataset;

pub use dataset::*;
