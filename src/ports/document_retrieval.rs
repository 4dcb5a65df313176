//! Document Retrieval Port - the external vector-search capability.

use async_trait::async_trait;

use crate::domain::routing::DocumentHit;

/// Port for similarity search over the ingested document corpus.
#[async_trait]
pub trait DocumentRetrieval: Send + Sync {
    /// Return up to `limit` chunks scoring at or above `min_similarity`,
    /// best first.
    ///
    /// An empty corpus or a floor nothing clears yields `Ok(vec![])`, not
    /// an error; errors are reserved for the capability itself failing.
    async fn search_similar(
        &self,
        query: &str,
        limit: usize,
        min_similarity: f32,
    ) -> Result<Vec<DocumentHit>, RetrievalError>;
}

/// Document retrieval failure modes.
#[derive(Debug, Clone, thiserror::Error, PartialEq)]
pub enum RetrievalError {
    #[error("retrieval service unavailable: {0}")]
    Unavailable(String),

    #[error("network error: {0}")]
    Network(String),

    #[error("malformed retrieval response: {0}")]
    MalformedResponse(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_retrieval_error_displays() {
        let err = RetrievalError::Unavailable("index down".into());
        assert!(err.to_string().contains("index down"));
    }
}
