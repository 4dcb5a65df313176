//! Clear Session Handler - empty a session's history.

use std::sync::Arc;

use serde::Serialize;
use tracing::info;

use crate::domain::foundation::SessionId;
use crate::ports::ConversationStore;

/// Command to clear a session's message history
#[derive(Debug, Clone)]
pub struct ClearSessionCommand {
    pub session_id: String,
}

/// Result of clearing a session
#[derive(Debug, Clone, Serialize)]
pub struct ClearSessionResult {
    pub session_id: SessionId,
    /// Whether the session existed before the clear.
    pub cleared: bool,
}

/// Handler for clearing session history.
///
/// Clearing empties the history but keeps the session and its rolling
/// context; later turns in the same session still see the accumulated
/// topics.
pub struct ClearSessionHandler {
    store: Arc<dyn ConversationStore>,
}

impl ClearSessionHandler {
    pub fn new(store: Arc<dyn ConversationStore>) -> Self {
        Self { store }
    }

    pub async fn handle(&self, command: ClearSessionCommand) -> ClearSessionResult {
        let session_id = SessionId::new(command.session_id);
        let cleared = self.store.clear_session(&session_id).await;
        info!(session_id = %session_id, cleared, "session cleared");
        ClearSessionResult { session_id, cleared }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::storage::InMemoryConversationStore;
    use crate::domain::conversation::Message;

    #[tokio::test]
    async fn test_clear_existing_session() {
        let store = Arc::new(InMemoryConversationStore::new());
        let sid = SessionId::new("s1");
        store.append_message(Message::user(sid.clone(), "hello")).await;

        let handler = ClearSessionHandler::new(store.clone());
        let result = handler
            .handle(ClearSessionCommand {
                session_id: "s1".to_string(),
            })
            .await;

        assert!(result.cleared);
        assert!(store.history(&sid).await.is_empty());
    }

    #[tokio::test]
    async fn test_clear_unknown_session_reports_false() {
        let handler = ClearSessionHandler::new(Arc::new(InMemoryConversationStore::new()));
        let result = handler
            .handle(ClearSessionCommand {
                session_id: "missing".to_string(),
            })
            .await;
        assert!(!result.cleared);
    }
}
