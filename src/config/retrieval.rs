//! Retrieval configuration

use serde::Deserialize;

use super::error::ValidationError;

/// Configuration for document and web retrieval
#[derive(Debug, Clone, Deserialize)]
pub struct RetrievalConfig {
    /// Maximum document hits requested per query
    #[serde(default = "default_result_limit")]
    pub result_limit: usize,

    /// Similarity floor for document hits.
    ///
    /// Historical deployments used 0.3 and 0.5; 0.5 is the canonical
    /// default here and the knob stays exposed.
    #[serde(default = "default_min_similarity")]
    pub min_similarity: f32,

    /// Maximum web results kept per query
    #[serde(default = "default_web_result_limit")]
    pub web_result_limit: usize,
}

impl RetrievalConfig {
    /// Validate retrieval configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if !(0.0..=1.0).contains(&self.min_similarity) {
            return Err(ValidationError::InvalidSimilarityFloor);
        }
        if self.result_limit == 0 || self.result_limit > 10 {
            return Err(ValidationError::InvalidResultLimit);
        }
        if self.web_result_limit == 0 || self.web_result_limit > 10 {
            return Err(ValidationError::InvalidResultLimit);
        }
        Ok(())
    }
}

impl Default for RetrievalConfig {
    fn default() -> Self {
        Self {
            result_limit: default_result_limit(),
            min_similarity: default_min_similarity(),
            web_result_limit: default_web_result_limit(),
        }
    }
}

fn default_result_limit() -> usize {
    3
}

fn default_min_similarity() -> f32 {
    0.5
}

fn default_web_result_limit() -> usize {
    5
}
