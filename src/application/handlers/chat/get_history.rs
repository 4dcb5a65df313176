//! Get History Handler - read a session's message history.

use std::sync::Arc;

use serde::Serialize;

use crate::domain::conversation::Message;
use crate::domain::foundation::SessionId;
use crate::ports::ConversationStore;

/// Command to fetch a session's history
#[derive(Debug, Clone)]
pub struct GetHistoryCommand {
    pub session_id: String,
    /// Return only the most recent messages when set.
    pub limit: Option<usize>,
}

/// Result of fetching a session's history
#[derive(Debug, Clone, Serialize)]
pub struct GetHistoryResult {
    pub session_id: SessionId,
    pub messages: Vec<Message>,
}

/// Handler for reading conversation history. Unknown sessions read as
/// empty, matching the store's get-or-create semantics.
pub struct GetHistoryHandler {
    store: Arc<dyn ConversationStore>,
}

impl GetHistoryHandler {
    pub fn new(store: Arc<dyn ConversationStore>) -> Self {
        Self { store }
    }

    pub async fn handle(&self, command: GetHistoryCommand) -> GetHistoryResult {
        let session_id = SessionId::new(command.session_id);
        let mut messages = self.store.history(&session_id).await;

        if let Some(limit) = command.limit {
            let start = messages.len().saturating_sub(limit);
            messages.drain(..start);
        }

        GetHistoryResult {
            session_id,
            messages,
        }
    }
}
