//! Custom error types with exit codes

use thiserror::Error;

/// Main error type for house-price operations
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum PredictError {
    /// Usage Error - wrong number of positional arguments
    #[error("{message}")]
    Usage { message: String },

    /// Configuration Error - missing or invalid configuration
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    /// Data Error - training dataset missing, empty or malformed
    #[error("Data error: {message}")]
    Data { message: String },

    /// Model Error - fitting, encoding or decoding a model failed
    #[error("Model error: {message}")]
    Model { message: String },

    /// Input Error - prediction inputs are not usable numbers
    #[error("Input error: {message}")]
    Input { message: String },

    /// Filesystem Error - file operation failed
    #[error("Filesystem error: {message}")]
    Filesystem { message: String },
}

impl PredictError {
    /// Get the appropriate exit code for this error type
    #[must_use]
    #[inline]
    pub const fn exit_code(&self) -> i32 {
        match *self {
            Self::Usage { .. } | Self::Data { .. } | Self::Model { .. } | Self::Input { .. } => 1,
            Self::Configuration { .. } => 3,
            Self::Filesystem { .. } => 4,
        }
    }

    /// Create a usage error
    #[inline]
    pub fn usage<S: Into<String>>(message: S) -> Self {
        Self::Usage {
            message: message.into(),
        }
    }

    /// Create a configuration error
    #[inline]
    pub fn configuration<S: Into<String>>(message: S) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Create a data error
    #[inline]
    pub fn data<S: Into<String>>(message: S) -> Self {
        Self::Data {
            message: message.into(),
        }
    }

    /// Create a model error
    #[inline]
    pub fn model<S: Into<String>>(message: S) -> Self {
        Self::Model {
            message: message.into(),
        }
    }

    /// Create an input error
    #[inline]
    pub fn input<S: Into<String>>(message: S) -> Self {
        Self::Input {
            message: message.into(),
        }
    }

    /// Create a filesystem error
    #[inline]
    pub fn filesystem<S: Into<String>>(message: S) -> Self {
        Self::Filesystem {
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_codes() {
        assert_eq!(PredictError::usage("usage").exit_code(), 1);
        assert_eq!(PredictError::model("Failed to train model").exit_code(), 1);
        assert_eq!(PredictError::configuration("bad").exit_code(), 3);
        assert_eq!(PredictError::filesystem("denied").exit_code(), 4);
    }

    #[test]
    fn test_usage_message_is_not_prefixed() {
        let err = PredictError::usage("Usage: house-price <square_footage> <num_bedrooms>");
        assert!(err.to_string().starts_with("Usage:"));
    }
}
