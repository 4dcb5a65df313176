//! OpenAI Oracle - LanguageOracle implementation over the OpenAI API.
//!
//! Sends single-prompt chat completions at temperature zero; the callers
//! of this adapter want deterministic JSON verdicts, not prose.

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use secrecy::{ExposeSecret, Secret};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::{OracleConfig, ValidationError};
use crate::ports::{LanguageOracle, OracleError};

/// OpenAI-backed language oracle.
pub struct OpenAiOracle {
    api_key: Secret<String>,
    model: String,
    base_url: String,
    timeout_secs: u64,
    client: Client,
}

#[derive(Debug, Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
    temperature: f32,
}

#[derive(Debug, Serialize)]
struct ChatMessage {
    role: &'static str,
    content: String,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    content: String,
}

impl OpenAiOracle {
    /// Build the oracle from validated configuration.
    ///
    /// # Errors
    ///
    /// Returns a validation error when no API key is configured.
    pub fn new(config: &OracleConfig) -> Result<Self, ValidationError> {
        let api_key = config
            .openai_api_key
            .clone()
            .filter(|k| !k.is_empty())
            .ok_or(ValidationError::MissingRequired("OPENAI_API_KEY"))?;

        let client = Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(|_| ValidationError::InvalidTimeout)?;

        Ok(Self {
            api_key: Secret::new(api_key),
            model: config.model.clone(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            timeout_secs: config.timeout_secs,
            client,
        })
    }

    fn completions_url(&self) -> String {
        format!("{}/chat/completions", self.base_url)
    }

    fn map_transport_error(&self, err: reqwest::Error) -> OracleError {
        if err.is_timeout() {
            OracleError::Timeout {
                timeout_secs: self.timeout_secs as u32,
            }
        } else {
            OracleError::Network(err.to_string())
        }
    }
}

#[async_trait]
impl LanguageOracle for OpenAiOracle {
    async fn complete(&self, prompt: &str) -> Result<String, OracleError> {
        let request = ChatRequest {
            model: self.model.clone(),
            messages: vec![ChatMessage {
                role: "user",
                content: prompt.to_string(),
            }],
            temperature: 0.0,
        };

        let response = self
            .client
            .post(self.completions_url())
            .bearer_auth(self.api_key.expose_secret())
            .json(&request)
            .send()
            .await
            .map_err(|err| self.map_transport_error(err))?;

        match response.status() {
            status if status.is_success() => {}
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                return Err(OracleError::AuthenticationFailed);
            }
            status => {
                return Err(OracleError::Unavailable(format!(
                    "provider returned {status}"
                )));
            }
        }

        let body: ChatResponse = response
            .json()
            .await
            .map_err(|err| OracleError::MalformedResponse(err.to_string()))?;

        let content = body
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content)
            .ok_or_else(|| OracleError::MalformedResponse("no choices in response".to_string()))?;

        debug!(chars = content.len(), "oracle completion received");
        Ok(content)
    }
}
