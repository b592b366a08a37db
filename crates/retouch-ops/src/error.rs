//! Error types for adjustment operations.

use thiserror::Error;

/// Error type for adjustment operations.
#[derive(Error, Debug)]
pub enum OpsError {
    /// Source buffer is unusable (zero area, wrong channel count).
    #[error("invalid buffer: {0}")]
    InvalidBuffer(#[from] retouch_core::Error),

    /// Working data does not match the declared dimensions.
    #[error("invalid dimensions: {0}")]
    InvalidDimensions(String),

    /// Invalid parameter value.
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// A stage produced NaN or infinite channel values.
    #[error("{stage} produced non-finite channel values")]
    NonFinite {
        /// Name of the stage that produced them.
        stage: &'static str,
    },

    /// Preset or pipeline config could not be loaded.
    #[error("preset error: {0}")]
    Preset(String),
}

impl From<serde_yaml::Error> for OpsError {
    fn from(err: serde_yaml::Error) -> Self {
        OpsError::Preset(format!("YAML: {}", err))
    }
}

impl From<serde_json::Error> for OpsError {
    fn from(err: serde_json::Error) -> Self {
        OpsError::Preset(format!("JSON: {}", err))
    }
}

impl From<std::io::Error> for OpsError {
    fn from(err: std::io::Error) -> Self {
        OpsError::Preset(format!("I/O: {}", err))
    }
}

/// Result type for adjustment operations.
pub type OpsResult<T> = Result<T, OpsError>;
