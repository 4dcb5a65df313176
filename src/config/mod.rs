//! Application configuration module
//!
//! Type-safe configuration loading from environment variables using the
//! `config` and `dotenvy` crates. Configuration is loaded with the
//! `PAPERCHAT` prefix and nested values use double underscores as
//! separators.
//!
//! # Example
//!
//! ```no_run
//! use paperchat::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//! ```

mod ai;
mod error;
mod retrieval;
mod routing;

pub use ai::OracleConfig;
pub use error::{ConfigError, ValidationError};
pub use retrieval::RetrievalConfig;
pub use routing::RoutingConfig;

use serde::Deserialize;

/// Root application configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Language oracle configuration
    #[serde(default)]
    pub ai: OracleConfig,

    /// Retrieval configuration (limits, similarity floor)
    #[serde(default)]
    pub retrieval: RetrievalConfig,

    /// Routing configuration (ambiguity rule set)
    #[serde(default)]
    pub routing: RoutingConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// Loads `.env` if present, then reads variables with the `PAPERCHAT`
    /// prefix, e.g. `PAPERCHAT__RETRIEVAL__MIN_SIMILARITY=0.3`.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing or values
    /// cannot be parsed.
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("PAPERCHAT")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.ai.validate()?;
        self.retrieval.validate()?;
        Ok(())
    }
}
