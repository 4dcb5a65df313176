//! Per-session conversation aggregate.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::foundation::SessionId;

use super::{ContextUpdate, ConversationContext, Message};

/// A session's ordered message history plus rolling context.
///
/// Messages are appended only; `clear` empties the history but keeps the
/// session id and context alive. Removal of the whole session is the
/// store's job, not this type's.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Conversation {
    pub session_id: SessionId,
    messages: Vec<Message>,
    context: ConversationContext,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Conversation {
    /// Create an empty conversation for the given session.
    pub fn new(session_id: SessionId) -> Self {
        let now = Utc::now();
        Self {
            session_id,
            messages: Vec::new(),
            context: ConversationContext::new(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Append a message to the history.
    pub fn push(&mut self, message: Message) {
        self.messages.push(message);
        self.updated_at = Utc::now();
    }

    /// Full ordered history.
    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    /// The most recent `limit` messages, oldest first.
    pub fn recent_messages(&self, limit: usize) -> &[Message] {
        let start = self.messages.len().saturating_sub(limit);
        &self.messages[start..]
    }

    /// Rolling context for this session.
    pub fn context(&self) -> &ConversationContext {
        &self.context
    }

    /// Fold a turn's outcome into the rolling context.
    pub fn update_context(&mut self, update: ContextUpdate) {
        self.context.apply(update);
        self.updated_at = Utc::now();
    }

    /// Empty the message history, keeping the session and its context.
    pub fn clear(&mut self) {
        self.messages.clear();
        self.updated_at = Utc::now();
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::Intent;

    fn conversation() -> Conversation {
        Conversation::new(SessionId::new("s1"))
    }

    #[test]
    fn test_new_conversation_is_empty() {
        let convo = conversation();
        assert!(convo.is_empty());
        assert!(convo.context().last_intent.is_none());
    }

    #[test]
    fn test_push_appends_in_order() {
        let mut convo = conversation();
        convo.push(Message::user(convo.session_id.clone(), "first"));
        convo.push(Message::assistant(convo.session_id.clone(), "second"));

        let contents: Vec<_> = convo.messages().iter().map(|m| m.content.as_str()).collect();
        assert_eq!(contents, vec!["first", "second"]);
    }

    #[test]
    fn test_recent_messages_takes_tail() {
        let mut convo = conversation();
        for i in 0..5 {
            convo.push(Message::user(convo.session_id.clone(), format!("m{i}")));
        }

        let recent = convo.recent_messages(2);
        assert_eq!(recent.len(), 2);
        assert_eq!(recent[0].content, "m3");
        assert_eq!(recent[1].content, "m4");
    }

    #[test]
    fn test_recent_messages_limit_exceeding_len() {
        let mut convo = conversation();
        convo.push(Message::user(convo.session_id.clone(), "only"));
        assert_eq!(convo.recent_messages(10).len(), 1);
    }

    #[test]
    fn test_clear_keeps_context() {
        let mut convo = conversation();
        convo.push(Message::user(convo.session_id.clone(), "q"));
        convo.update_context(ContextUpdate::new().with_intent(Intent::PdfQuery));

        convo.clear();

        assert!(convo.is_empty());
        assert_eq!(convo.context().last_intent, Some(Intent::PdfQuery));
        assert_eq!(convo.session_id, SessionId::new("s1"));
    }
}
