//! Retrieval and formatting agents.
//!
//! Each agent is one workflow node: it reads the turn state, does its one
//! job, and writes its outcome back. Agents never return errors to the
//! orchestrator; a failing capability is recorded on the turn and turned
//! into user-facing text.

mod pdf_query;
mod response;
mod web_search;

pub use pdf_query::PdfQueryAgent;
pub use response::ResponseAgent;
pub use web_search::WebSearchAgent;

use async_trait::async_trait;

use crate::domain::routing::TurnState;

/// One workflow node.
#[async_trait]
pub trait Agent: Send + Sync {
    /// Run this node over the turn, writing its outcome back.
    async fn run(&self, turn: &mut TurnState);
}
