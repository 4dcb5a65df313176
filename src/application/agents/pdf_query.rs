//! Document-corpus retrieval agent.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, warn};

use super::Agent;
use crate::config::RetrievalConfig;
use crate::domain::foundation::AgentName;
use crate::domain::routing::{SearchHit, TurnState};
use crate::ports::DocumentRetrieval;

/// Runs similarity search over the ingested corpus for one turn.
pub struct PdfQueryAgent {
    retrieval: Arc<dyn DocumentRetrieval>,
    config: RetrievalConfig,
}

impl PdfQueryAgent {
    pub fn new(retrieval: Arc<dyn DocumentRetrieval>, config: RetrievalConfig) -> Self {
        Self { retrieval, config }
    }
}

#[async_trait]
impl Agent for PdfQueryAgent {
    /// Search the corpus with the turn's effective query.
    ///
    /// Results land on the turn best-first, capped at the configured
    /// limit. A failing retrieval capability is contained here: the turn
    /// gets an error marker and an apologetic reply, never a propagated
    /// error.
    async fn run(&self, turn: &mut TurnState) {
        turn.record_step(AgentName::PdfQuery.as_str());

        match self
            .retrieval
            .search_similar(
                &turn.effective_query,
                self.config.result_limit,
                self.config.min_similarity,
            )
            .await
        {
            Ok(hits) => {
                debug!(count = hits.len(), "document retrieval returned");
                turn.search_results = hits
                    .into_iter()
                    .take(self.config.result_limit)
                    .map(SearchHit::Document)
                    .collect();
                turn.produced_by = Some(AgentName::PdfQuery);
            }
            Err(err) => {
                warn!(error = %err, "document retrieval failed");
                fail_turn(turn, AgentName::PdfQuery, &err.to_string());
            }
        }
    }
}

/// Record a node failure on the turn and synthesize the reply for it.
///
/// A failed node always asks the user how to proceed, so the retry prompt
/// is a clarification question and the turn is marked as needing one.
pub(super) fn fail_turn(turn: &mut TurnState, agent: AgentName, error: &str) {
    turn.error = Some(error.to_string());
    turn.record_step(format!("{agent}_error"));
    turn.response = Some(format!(
        "An error occurred while processing your request with {agent}."
    ));
    turn.needs_clarification = true;
    turn.clarification_questions.push(format!(
        "I encountered an error with the {agent} agent. Would you like to try again?"
    ));
    turn.produced_by = Some(agent);
}
