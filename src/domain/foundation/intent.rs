//! Intent labels shared across the domain.
//!
//! The classifier, router, conversation context, and caller-facing result all
//! speak in these labels; keeping them in one enum removes the duplicated
//! string-based branching the routing logic would otherwise accumulate.

use serde::{Deserialize, Serialize};

/// Classified purpose of a user utterance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Intent {
    /// User is greeting or opening the conversation.
    Greeting,
    /// Question about the ingested document corpus.
    PdfQuery,
    /// General-knowledge question or explicit search request.
    WebSearch,
    /// Reference to an earlier turn in this session.
    FollowUp,
    /// Utterance too unclear to act on.
    ClarificationNeeded,
}

impl Intent {
    /// Stable wire label for this intent.
    pub fn as_str(&self) -> &'static str {
        match self {
            Intent::Greeting => "greeting",
            Intent::PdfQuery => "pdf_query",
            Intent::WebSearch => "web_search",
            Intent::FollowUp => "follow_up",
            Intent::ClarificationNeeded => "clarification_needed",
        }
    }
}

impl std::fmt::Display for Intent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Intent label reported back to the caller.
///
/// Identical to [`Intent`] plus the `error` label the outermost boundary
/// uses when the whole pipeline failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReplyIntent {
    Greeting,
    PdfQuery,
    WebSearch,
    FollowUp,
    ClarificationNeeded,
    Error,
}

impl ReplyIntent {
    /// Stable wire label for this intent.
    pub fn as_str(&self) -> &'static str {
        match self {
            ReplyIntent::Greeting => "greeting",
            ReplyIntent::PdfQuery => "pdf_query",
            ReplyIntent::WebSearch => "web_search",
            ReplyIntent::FollowUp => "follow_up",
            ReplyIntent::ClarificationNeeded => "clarification_needed",
            ReplyIntent::Error => "error",
        }
    }
}

impl From<Intent> for ReplyIntent {
    fn from(intent: Intent) -> Self {
        match intent {
            Intent::Greeting => ReplyIntent::Greeting,
            Intent::PdfQuery => ReplyIntent::PdfQuery,
            Intent::WebSearch => ReplyIntent::WebSearch,
            Intent::FollowUp => ReplyIntent::FollowUp,
            Intent::ClarificationNeeded => ReplyIntent::ClarificationNeeded,
        }
    }
}

impl std::fmt::Display for ReplyIntent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Name of the agent that last touched a turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AgentName {
    PdfQuery,
    WebSearch,
    Response,
}

impl AgentName {
    /// Stable name used in metadata and the processing-steps trail.
    pub fn as_str(&self) -> &'static str {
        match self {
            AgentName::PdfQuery => "pdf_query_agent",
            AgentName::WebSearch => "web_search_agent",
            AgentName::Response => "response_agent",
        }
    }
}

impl std::fmt::Display for AgentName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_intent_serializes_snake_case() {
        let json = serde_json::to_string(&Intent::PdfQuery).unwrap();
        assert_eq!(json, "\"pdf_query\"");

        let json = serde_json::to_string(&Intent::ClarificationNeeded).unwrap();
        assert_eq!(json, "\"clarification_needed\"");
    }

    #[test]
    fn test_intent_deserializes_from_label() {
        let intent: Intent = serde_json::from_str("\"follow_up\"").unwrap();
        assert_eq!(intent, Intent::FollowUp);
    }

    #[test]
    fn test_reply_intent_from_intent() {
        assert_eq!(ReplyIntent::from(Intent::WebSearch), ReplyIntent::WebSearch);
        assert_eq!(
            ReplyIntent::from(Intent::Greeting).as_str(),
            Intent::Greeting.as_str()
        );
    }

    #[test]
    fn test_reply_intent_error_label() {
        assert_eq!(ReplyIntent::Error.as_str(), "error");
    }

    #[test]
    fn test_agent_name_labels() {
        assert_eq!(AgentName::PdfQuery.as_str(), "pdf_query_agent");
        assert_eq!(AgentName::WebSearch.as_str(), "web_search_agent");
        assert_eq!(AgentName::Response.as_str(), "response_agent");
    }
}
