//! Web-search agent.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;

use super::Agent;
use crate::config::RetrievalConfig;
use crate::domain::foundation::AgentName;
use crate::domain::routing::{SearchHit, TurnState};
use crate::ports::WebSearch;

/// Runs the web-search capability for one turn.
///
/// The port is infallible (provider failures degrade to an empty list), so
/// this agent has no error branch of its own.
pub struct WebSearchAgent {
    search: Arc<dyn WebSearch>,
    config: RetrievalConfig,
}

impl WebSearchAgent {
    pub fn new(search: Arc<dyn WebSearch>, config: RetrievalConfig) -> Self {
        Self { search, config }
    }
}

#[async_trait]
impl Agent for WebSearchAgent {
    /// Search the web with the turn's effective query.
    async fn run(&self, turn: &mut TurnState) {
        turn.record_step(AgentName::WebSearch.as_str());

        let hits = self.search.search(&turn.effective_query).await;
        debug!(count = hits.len(), "web search returned");

        turn.search_results = hits
            .into_iter()
            .take(self.config.web_result_limit)
            .map(SearchHit::Web)
            .collect();
        turn.produced_by = Some(AgentName::WebSearch);
    }
}
