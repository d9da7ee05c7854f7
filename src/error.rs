//! Error types shared across the crate.

use thiserror::Error;

use crate::params::ParamField;

/// Everything that can go wrong outside the per-frame hot path
#[derive(Debug, Error)]
pub enum VizError {
    #[error("{field} = {value} is outside [{min}, {max}]")]
    InvalidParameter {
        field: ParamField,
        value: f32,
        min: f32,
        max: f32,
    },

    #[error("Unknown parameter field '{0}'")]
    UnknownField(String),

    #[error("Malformed override '{0}' (expected FIELD=VALUE)")]
    MalformedOverride(String),

    #[error("Unknown preset '{0}'")]
    UnknownPreset(String),

    #[error("Preset file I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("Preset file is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid analyser config: {0}")]
    InvalidAnalyser(String),

    #[error("Audio source failed: {0}")]
    Audio(String),
}

pub type Result<T> = std::result::Result<T, VizError>;
