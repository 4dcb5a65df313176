//! In-Memory Conversation Store - ConversationStore over a process-local map.
//!
//! Suitable for single-process deployments and tests; state does not
//! survive a restart. Sessions materialize on first reference, matching
//! the port's get-or-create contract.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::conversation::{ContextUpdate, Conversation, ConversationContext, Message};
use crate::domain::foundation::SessionId;
use crate::ports::ConversationStore;

/// Process-local conversation store.
#[derive(Debug, Default)]
pub struct InMemoryConversationStore {
    sessions: RwLock<HashMap<SessionId, Conversation>>,
}

impl InMemoryConversationStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of live sessions.
    pub async fn session_count(&self) -> usize {
        self.sessions.read().await.len()
    }
}

#[async_trait]
impl ConversationStore for InMemoryConversationStore {
    async fn append_message(&self, message: Message) {
        let mut sessions = self.sessions.write().await;
        sessions
            .entry(message.session_id.clone())
            .or_insert_with(|| Conversation::new(message.session_id.clone()))
            .push(message);
    }

    async fn history(&self, session_id: &SessionId) -> Vec<Message> {
        {
            let sessions = self.sessions.read().await;
            if let Some(conversation) = sessions.get(session_id) {
                return conversation.messages().to_vec();
            }
        }

        let mut sessions = self.sessions.write().await;
        sessions
            .entry(session_id.clone())
            .or_insert_with(|| Conversation::new(session_id.clone()))
            .messages()
            .to_vec()
    }

    async fn context(&self, session_id: &SessionId) -> ConversationContext {
        {
            let sessions = self.sessions.read().await;
            if let Some(conversation) = sessions.get(session_id) {
                return conversation.context().clone();
            }
        }

        let mut sessions = self.sessions.write().await;
        sessions
            .entry(session_id.clone())
            .or_insert_with(|| Conversation::new(session_id.clone()))
            .context()
            .clone()
    }

    async fn update_context(&self, session_id: &SessionId, update: ContextUpdate) {
        let mut sessions = self.sessions.write().await;
        sessions
            .entry(session_id.clone())
            .or_insert_with(|| Conversation::new(session_id.clone()))
            .update_context(update);
    }

    async fn clear_session(&self, session_id: &SessionId) -> bool {
        let mut sessions = self.sessions.write().await;
        match sessions.get_mut(session_id) {
            Some(conversation) => {
                conversation.clear();
                true
            }
            None => false,
        }
    }

    async fn end_session(&self, session_id: &SessionId) -> bool {
        let mut sessions = self.sessions.write().await;
        sessions.remove(session_id).is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::Intent;

    fn sid(id: &str) -> SessionId {
        SessionId::new(id)
    }

    #[tokio::test]
    async fn test_append_creates_session() {
        let store = InMemoryConversationStore::new();
        store.append_message(Message::user(sid("s1"), "hello")).await;

        assert_eq!(store.session_count().await, 1);
        assert_eq!(store.history(&sid("s1")).await.len(), 1);
    }

    #[tokio::test]
    async fn test_history_preserves_order() {
        let store = InMemoryConversationStore::new();
        store.append_message(Message::user(sid("s1"), "q1")).await;
        store.append_message(Message::assistant(sid("s1"), "a1")).await;
        store.append_message(Message::user(sid("s1"), "q2")).await;

        let history = store.history(&sid("s1")).await;
        let contents: Vec<_> = history.iter().map(|m| m.content.as_str()).collect();
        assert_eq!(contents, vec!["q1", "a1", "q2"]);
    }

    #[tokio::test]
    async fn test_reading_unknown_session_materializes_it() {
        let store = InMemoryConversationStore::new();
        assert!(store.history(&sid("fresh")).await.is_empty());
        assert_eq!(store.session_count().await, 1);
    }

    #[tokio::test]
    async fn test_sessions_are_isolated() {
        let store = InMemoryConversationStore::new();
        store.append_message(Message::user(sid("a"), "for a")).await;
        store.append_message(Message::user(sid("b"), "for b")).await;

        assert_eq!(store.history(&sid("a")).await.len(), 1);
        assert_eq!(store.history(&sid("a")).await[0].content, "for a");
        assert_eq!(store.history(&sid("b")).await[0].content, "for b");
    }

    #[tokio::test]
    async fn test_clear_keeps_context() {
        let store = InMemoryConversationStore::new();
        store.append_message(Message::user(sid("s1"), "q")).await;
        store
            .update_context(&sid("s1"), ContextUpdate::new().with_intent(Intent::PdfQuery))
            .await;

        assert!(store.clear_session(&sid("s1")).await);
        assert!(store.history(&sid("s1")).await.is_empty());
        assert_eq!(store.context(&sid("s1")).await.last_intent, Some(Intent::PdfQuery));
    }

    #[tokio::test]
    async fn test_end_removes_session() {
        let store = InMemoryConversationStore::new();
        store.append_message(Message::user(sid("s1"), "q")).await;

        assert!(store.end_session(&sid("s1")).await);
        assert!(!store.end_session(&sid("s1")).await);
        assert_eq!(store.session_count().await, 0);
    }

    #[tokio::test]
    async fn test_clear_unknown_session_is_false() {
        let store = InMemoryConversationStore::new();
        assert!(!store.clear_session(&sid("nope")).await);
    }

    #[tokio::test]
    async fn test_context_updates_accumulate() {
        let store = InMemoryConversationStore::new();
        store
            .update_context(&sid("s1"), ContextUpdate::new().with_topic("attention"))
            .await;
        store
            .update_context(&sid("s1"), ContextUpdate::new().with_topic("fine-tuning"))
            .await;

        let context = store.context(&sid("s1")).await;
        assert_eq!(context.topics, vec!["attention", "fine-tuning"]);
    }
}
