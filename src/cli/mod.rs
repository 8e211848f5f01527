//! Command-line interface module
//!
//! Handles argument parsing and mode selection

pub mod args;

pub use args::*;
