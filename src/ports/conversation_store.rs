//! Conversation Store Port - per-session history and rolling context.

use async_trait::async_trait;

use crate::domain::conversation::{ContextUpdate, ConversationContext, Message};
use crate::domain::foundation::SessionId;

/// Port for session state.
///
/// Sessions have get-or-create semantics: reading or appending to an
/// unknown session id materializes it. The store never deletes a session
/// implicitly; `end_session` is the only removal path. The boolean
/// returns report whether the session existed.
///
/// The store does not order concurrent turns on the same session; callers
/// must serialize per-session access themselves.
#[async_trait]
pub trait ConversationStore: Send + Sync {
    /// Append a message to its session, creating the session if needed.
    async fn append_message(&self, message: Message);

    /// Ordered history for a session, creating the session if needed.
    async fn history(&self, session_id: &SessionId) -> Vec<Message>;

    /// Rolling context for a session, creating the session if needed.
    async fn context(&self, session_id: &SessionId) -> ConversationContext;

    /// Fold a turn's outcome into the session context.
    async fn update_context(&self, session_id: &SessionId, update: ContextUpdate);

    /// Empty a session's history, preserving the session and its context.
    async fn clear_session(&self, session_id: &SessionId) -> bool;

    /// Remove a session entirely.
    async fn end_session(&self, session_id: &SessionId) -> bool;
}
