//! Model file serialization and storage.
//!
//! Uses bincode v2 for the binary encoding. File layout:
//!
//! ```text
//! HPLR                      # 4-byte magic
//! <bincode StoredModel>     # version, coefficients, intercept
//! ```

use std::path::Path;

use anyhow::{Context as _, Result};
use bincode::{Decode, Encode, config};
use tracing::debug;

use super::linear::{FEATURE_COUNT, LinearModel};
use crate::error::PredictError;
use crate::system::System;
use crate::utils::fs::create_parent_directories;

/// Leading bytes of every model file.
pub const MODEL_MAGIC: &[u8; 4] = b"HPLR";

/// Current model file version.
pub const MODEL_FORMAT_VERSION: u32 = 1;

#[derive(Debug, Encode, Decode)]
struct StoredModel {
    version: u32,
    coefficients: [f64; FEATURE_COUNT],
    intercept: f64,
}

/// Encode a model into the model file format
///
/// # Errors
///
/// Returns an error if the model has non-finite parameters or encoding fails
pub fn encode_model(model: &LinearModel) -> Result<Vec<u8>, PredictError> {
    if !model.is_finite() {
        return Err(PredictError::model(format!(
            "Refusing to store non-finite model parameters: {model:?}"
        )));
    }

    let stored = StoredModel {
        version: MODEL_FORMAT_VERSION,
        coefficients: model.coefficients,
        intercept: model.intercept,
    };

    let mut bytes = MODEL_MAGIC.to_vec();
    let body = bincode::encode_to_vec(&stored, config::standard())
        .map_err(|e| PredictError::model(format!("Failed to encode model: {e}")))?;
    bytes.extend_from_slice(&body);
    Ok(bytes)
}

/// Decode a model from the model file format
///
/// # Errors
///
/// Returns an error if:
/// - The magic header is missing
/// - The body is truncated, has trailing bytes, or has an unknown version
/// - Any decoded parameter is not finite
pub fn decode_model(bytes: &[u8]) -> Result<LinearModel, PredictError> {
    let body = bytes
        .strip_prefix(MODEL_MAGIC.as_slice())
        .ok_or_else(|| PredictError::model("Not a house-price model file (bad magic)"))?;

    let (stored, read): (StoredModel, usize) =
        bincode::decode_from_slice(body, config::standard())
            .map_err(|e| PredictError::model(format!("Failed to decode model: {e}")))?;

    if read != body.len() {
        return Err(PredictError::model(format!(
            "Model file has {} unexpected trailing bytes",
            body.len() - read
        )));
    }
    if stored.version != MODEL_FORMAT_VERSION {
        return Err(PredictError::model(format!(
            "Unsupported model file version {} (expected {MODEL_FORMAT_VERSION})",
            stored.version
        )));
    }

    let model = LinearModel::new(stored.coefficients, stored.intercept);
    if !model.is_finite() {
        return Err(PredictError::model("Model file contains non-finite parameters"));
    }
    Ok(model)
}

/// Save a model to disk, replacing any existing file
///
/// Creates parent directories if they don't exist.
///
/// # Errors
///
/// Returns an error if the model cannot be encoded or written
pub fn save_model(system: &dyn System, path: &Path, model: &LinearModel) -> Result<()> {
    let bytes = encode_model(model)?;

    create_parent_directories(system, path)?;
    system.replace(path, &bytes).map_err(|e| {
        PredictError::filesystem(format!(
            "Failed to write model file {}: {e}",
            path.display()
        ))
    })?;

    debug!("Saved model ({} bytes) to {}", bytes.len(), path.display());
    Ok(())
}

/// Load a model from disk
///
/// # Errors
///
/// Returns an error if the file cannot be read or decoded
pub fn load_model(system: &dyn System, path: &Path) -> Result<LinearModel> {
    let bytes = system
        .read(path)
        .with_context(|| format!("Failed to read model file: {}", path.display()))?;

    let model = decode_model(&bytes)
        .with_context(|| format!("Invalid model file: {}", path.display()))?;

    debug!("Loaded model from {}", path.display());
    Ok(model)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encoded_model_starts_with_magic() {
        let bytes = encode_model(&LinearModel::new([120.5, 9_000.0], 42_000.0)).unwrap();
        assert!(bytes.starts_with(MODEL_MAGIC));
    }

    #[test]
    fn test_decode_preserves_parameters() {
        let model = LinearModel::new([-3.25, 1e-7], 123_456.789);
        let decoded = decode_model(&encode_model(&model).unwrap()).unwrap();
        assert_eq!(decoded, model);
    }

    #[test]
    fn test_decode_rejects_bad_magic() {
        let err = decode_model(b"not a model at all, just some text").unwrap_err();
        assert!(err.to_string().contains("bad magic"));
    }

    #[test]
    fn test_decode_rejects_truncated_body() {
        let bytes = encode_model(&LinearModel::new([1.0, 2.0], 3.0)).unwrap();
        assert!(decode_model(&bytes[..bytes.len() - 3]).is_err());
    }

    #[test]
    fn test_decode_rejects_trailing_bytes() {
        let mut bytes = encode_model(&LinearModel::new([1.0, 2.0], 3.0)).unwrap();
        bytes.push(0);
        let err = decode_model(&bytes).unwrap_err();
        assert!(err.to_string().contains("trailing bytes"));
    }

    #[test]
    fn test_decode_rejects_unknown_version() {
        let stored = StoredModel {
            version: MODEL_FORMAT_VERSION + 1,
            coefficients: [1.0, 2.0],
            intercept: 3.0,
        };
        let mut bytes = MODEL_MAGIC.to_vec();
        bytes.extend(bincode::encode_to_vec(&stored, config::standard()).unwrap());

        let err = decode_model(&bytes).unwrap_err();
        assert!(err.to_string().contains("Unsupported model file version"));
    }

    #[test]
    fn test_encode_rejects_non_finite() {
        assert!(encode_model(&LinearModel::new([f64::NAN, 0.0], 0.0)).is_err());
    }
}
