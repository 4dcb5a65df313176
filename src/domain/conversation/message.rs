//! Conversation messages.
//!
//! Messages are append-only: once created they are never mutated or
//! reordered, so the structs here expose constructors but no setters.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::foundation::{AgentName, MessageId, SessionId};

/// Role of the message author. Only these two roles ever appear in history;
/// system instructions live in classifier prompts, not in the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    User,
    Assistant,
}

impl MessageRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            MessageRole::User => "user",
            MessageRole::Assistant => "assistant",
        }
    }
}

/// Per-message metadata with every field declared up front.
///
/// The flags here drive routing on later turns: `force_web_search` on an
/// incoming user message bypasses classification, and `has_search_results`
/// on an assistant message marks the next user turn as a follow-up
/// candidate.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MessageMetadata {
    /// Caller requested a web search regardless of content.
    #[serde(default)]
    pub force_web_search: bool,
    /// Agent that produced this assistant message.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub agent_used: Option<AgentName>,
    /// This assistant message carried retrieval results.
    #[serde(default)]
    pub has_search_results: bool,
    /// Error marker recorded when the producing turn failed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl MessageMetadata {
    /// Metadata for an incoming user message.
    pub fn for_user(force_web_search: bool) -> Self {
        Self {
            force_web_search,
            ..Self::default()
        }
    }

    /// Metadata for an assistant reply.
    pub fn for_assistant(agent_used: Option<AgentName>, has_search_results: bool) -> Self {
        Self {
            agent_used,
            has_search_results,
            ..Self::default()
        }
    }
}

/// A single immutable message in a session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub id: MessageId,
    pub session_id: SessionId,
    pub role: MessageRole,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub metadata: MessageMetadata,
}

impl Message {
    /// Create a new message with the given role and content.
    pub fn new(
        session_id: SessionId,
        role: MessageRole,
        content: impl Into<String>,
        metadata: MessageMetadata,
    ) -> Self {
        Self {
            id: MessageId::new(),
            session_id,
            role,
            content: content.into(),
            created_at: Utc::now(),
            metadata,
        }
    }

    /// Create a user message with default metadata.
    pub fn user(session_id: SessionId, content: impl Into<String>) -> Self {
        Self::new(
            session_id,
            MessageRole::User,
            content,
            MessageMetadata::default(),
        )
    }

    /// Create an assistant message with default metadata.
    pub fn assistant(session_id: SessionId, content: impl Into<String>) -> Self {
        Self::new(
            session_id,
            MessageRole::Assistant,
            content,
            MessageMetadata::default(),
        )
    }
}
