//! Web Search Port - the external web-search capability.

use async_trait::async_trait;

use crate::domain::routing::WebHit;

/// Port for querying the web-search provider.
///
/// The contract is deliberately infallible: provider failures degrade to
/// an empty result list (implementations log the cause), so the caller's
/// only branch is "results or no results". User-facing wording for the
/// empty case belongs to the formatter.
#[async_trait]
pub trait WebSearch: Send + Sync {
    /// Return ranked results for the query, or an empty list on failure.
    async fn search(&self, query: &str) -> Vec<WebHit>;
}
