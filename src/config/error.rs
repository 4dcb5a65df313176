//! Configuration error types

use thiserror::Error;

/// Errors that can occur during configuration loading
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration loading failed: {0}")]
    LoadError(#[from] config::ConfigError),

    #[error("Validation failed: {0}")]
    ValidationFailed(#[from] ValidationError),
}

/// Errors that can occur during configuration validation
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("Required configuration missing: {0}")]
    MissingRequired(&'static str),

    #[error("Similarity floor must be within [0, 1]")]
    InvalidSimilarityFloor,

    #[error("Result limit must be between 1 and 10")]
    InvalidResultLimit,

    #[error("Invalid request timeout")]
    InvalidTimeout,
}
