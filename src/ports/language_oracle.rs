//! Language Oracle Port - the external classification capability.
//!
//! The oracle is a fallible black box: it may time out, be unavailable, or
//! return text that is not the JSON the caller asked for. Consumers must
//! treat malformed output as a classification failure, never a crash.

use async_trait::async_trait;

/// Port for the external language-model capability.
#[async_trait]
pub trait LanguageOracle: Send + Sync {
    /// Send one prompt and return the raw completion text.
    ///
    /// The caller is responsible for parsing; implementations only
    /// surface transport- and provider-level failures.
    async fn complete(&self, prompt: &str) -> Result<String, OracleError>;
}

/// Oracle failure modes.
#[derive(Debug, Clone, thiserror::Error, PartialEq)]
pub enum OracleError {
    #[error("oracle request timed out after {timeout_secs}s")]
    Timeout { timeout_secs: u32 },

    #[error("oracle unavailable: {0}")]
    Unavailable(String),

    #[error("network error: {0}")]
    Network(String),

    #[error("authentication failed")]
    AuthenticationFailed,

    #[error("malformed oracle response: {0}")]
    MalformedResponse(String),
}
