//! HTTP Document Index - DocumentRetrieval over a remote vector index.
//!
//! Talks to an external similarity-search service over a small JSON
//! protocol: `POST {base_url}/search` with the query, limit, and floor;
//! the service answers with ranked chunks.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::domain::routing::DocumentHit;
use crate::ports::{DocumentRetrieval, RetrievalError};

/// Remote vector-index adapter.
pub struct HttpDocumentIndex {
    client: Client,
    base_url: String,
}

#[derive(Debug, Serialize)]
struct SearchRequest<'a> {
    query: &'a str,
    limit: usize,
    min_similarity: f32,
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    results: Vec<ChunkRecord>,
}

#[derive(Debug, Deserialize)]
struct ChunkRecord {
    id: String,
    score: f32,
    text: String,
    source: String,
    #[serde(default)]
    page: Option<u32>,
}

impl HttpDocumentIndex {
    pub fn new(client: Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    fn search_url(&self) -> String {
        format!("{}/search", self.base_url)
    }
}

#[async_trait]
impl DocumentRetrieval for HttpDocumentIndex {
    async fn search_similar(
        &self,
        query: &str,
        limit: usize,
        min_similarity: f32,
    ) -> Result<Vec<DocumentHit>, RetrievalError> {
        let response = self
            .client
            .post(self.search_url())
            .json(&SearchRequest {
                query,
                limit,
                min_similarity,
            })
            .send()
            .await
            .map_err(|err| {
                if err.is_timeout() || err.is_connect() {
                    RetrievalError::Network(err.to_string())
                } else {
                    RetrievalError::Unavailable(err.to_string())
                }
            })?;

        if !response.status().is_success() {
            return Err(RetrievalError::Unavailable(format!(
                "index returned {}",
                response.status()
            )));
        }

        let body: SearchResponse = response
            .json()
            .await
            .map_err(|err| RetrievalError::MalformedResponse(err.to_string()))?;

        debug!(count = body.results.len(), "remote index returned");

        Ok(body
            .results
            .into_iter()
            .map(|record| DocumentHit {
                id: record.id,
                score: record.score,
                text: record.text,
                source: record.source,
                page: record.page,
            })
            .collect())
    }
}
