//! Operations module
//!
//! Coordinates training, prediction and the prediction log

pub mod history;
pub mod predict;
pub mod train;

pub use history::*;
pub use predict::*;
pub use train::*;
