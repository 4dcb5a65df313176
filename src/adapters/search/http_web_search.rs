//! HTTP Web Search - WebSearch over the SerpAPI Google endpoint.
//!
//! The port is infallible, so every failure here (transport, status,
//! parsing) is logged and degraded to an empty result list.

use async_trait::async_trait;
use reqwest::Client;
use secrecy::{ExposeSecret, Secret};
use serde::Deserialize;
use tracing::{debug, warn};

use crate::domain::routing::WebHit;
use crate::ports::WebSearch;

const DEFAULT_ENDPOINT: &str = "https://serpapi.com/search";

/// SerpAPI-backed web search.
pub struct HttpWebSearch {
    client: Client,
    api_key: Secret<String>,
    endpoint: String,
    max_results: usize,
}

#[derive(Debug, Deserialize)]
struct SerpResponse {
    #[serde(default)]
    organic_results: Vec<OrganicResult>,
}

#[derive(Debug, Deserialize)]
struct OrganicResult {
    #[serde(default)]
    title: String,
    #[serde(default)]
    link: String,
    #[serde(default)]
    snippet: String,
}

impl HttpWebSearch {
    pub fn new(client: Client, api_key: impl Into<String>, max_results: usize) -> Self {
        Self {
            client,
            api_key: Secret::new(api_key.into()),
            endpoint: DEFAULT_ENDPOINT.to_string(),
            max_results,
        }
    }

    /// Point the adapter at a different endpoint (proxies, test servers).
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    async fn fetch(&self, query: &str) -> Result<Vec<WebHit>, reqwest::Error> {
        let num = self.max_results.to_string();
        let response = self
            .client
            .get(&self.endpoint)
            .query(&[
                ("q", query),
                ("engine", "google"),
                ("num", num.as_str()),
                ("api_key", self.api_key.expose_secret()),
            ])
            .send()
            .await?
            .error_for_status()?;

        let body: SerpResponse = response.json().await?;

        Ok(body
            .organic_results
            .into_iter()
            .take(self.max_results)
            .map(|result| WebHit {
                title: result.title,
                link: result.link,
                snippet: result.snippet,
            })
            .collect())
    }
}

#[async_trait]
impl WebSearch for HttpWebSearch {
    async fn search(&self, query: &str) -> Vec<WebHit> {
        match self.fetch(query).await {
            Ok(hits) => {
                debug!(count = hits.len(), "web search returned");
                hits
            }
            Err(err) => {
                warn!(error = %err, "web search failed, returning no results");
                Vec::new()
            }
        }
    }
}
