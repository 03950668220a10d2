//! Error types for configuration decoding.

use thiserror::Error;

/// Result type alias for configuration operations.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Errors that can occur while decoding the autoscaling configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid autoscaling configuration: {0}")]
    Decode(#[from] serde_json::Error),
}
