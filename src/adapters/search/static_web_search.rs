//! Static Web Search - fixed-result WebSearch for tests and offline runs.

use async_trait::async_trait;

use crate::domain::routing::WebHit;
use crate::ports::WebSearch;

/// Web search that answers every query with the same fixed results.
#[derive(Debug, Default)]
pub struct StaticWebSearch {
    hits: Vec<WebHit>,
}

impl StaticWebSearch {
    pub fn new(hits: Vec<WebHit>) -> Self {
        Self { hits }
    }

    /// A provider that always comes back empty, like a failing one would.
    pub fn empty() -> Self {
        Self::default()
    }
}

#[async_trait]
impl WebSearch for StaticWebSearch {
    async fn search(&self, _query: &str) -> Vec<WebHit> {
        self.hits.clone()
    }
}
