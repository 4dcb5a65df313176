//! End Session Handler - remove a session entirely.

use std::sync::Arc;

use serde::Serialize;
use tracing::info;

use crate::domain::foundation::SessionId;
use crate::ports::ConversationStore;

/// Command to end a session
#[derive(Debug, Clone)]
pub struct EndSessionCommand {
    pub session_id: String,
}

/// Result of ending a session
#[derive(Debug, Clone, Serialize)]
pub struct EndSessionResult {
    pub session_id: SessionId,
    /// Whether the session existed before removal.
    pub ended: bool,
}

/// Handler for ending sessions. Unlike a clear, this removes the session
/// and its context; the id is free to be reused as a fresh session.
pub struct EndSessionHandler {
    store: Arc<dyn ConversationStore>,
}

impl EndSessionHandler {
    pub fn new(store: Arc<dyn ConversationStore>) -> Self {
        Self { store }
    }

    pub async fn handle(&self, command: EndSessionCommand) -> EndSessionResult {
        let session_id = SessionId::new(command.session_id);
        let ended = self.store.end_session(&session_id).await;
        info!(session_id = %session_id, ended, "session ended");
        EndSessionResult { session_id, ended }
    }
}
