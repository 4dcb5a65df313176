//! Per-invocation turn state.
//!
//! One `TurnState` is owned by the orchestrator for the duration of a
//! single `process_message` call. It is never shared across turns or
//! sessions.

use crate::domain::conversation::{Message, MessageRole};
use crate::domain::foundation::{AgentName, Intent, SessionId};

use super::{Classification, SearchHit};

/// Everything one turn accumulates on its way through the workflow.
///
/// All fields are declared up front with defaults applied at construction;
/// [`TurnState::normalize`] re-applies the defaults and is idempotent.
#[derive(Debug, Clone, PartialEq)]
pub struct TurnState {
    pub session_id: SessionId,
    /// History snapshot including the current user message (last element).
    pub messages: Vec<Message>,
    /// Caller-supplied force flag for this turn.
    pub force_web_search: bool,
    /// Resolved intent; set by the classify node on every path.
    pub intent: Option<Intent>,
    /// The utterance as received.
    pub original_query: String,
    /// The query actually sent to retrieval (follow-ups splice in context).
    pub effective_query: String,
    /// Reply text, once some node has decided it.
    pub response: Option<String>,
    /// Ranked retrieval hits from the selected agent.
    pub search_results: Vec<SearchHit>,
    pub classification: Option<Classification>,
    pub needs_clarification: bool,
    pub clarification_questions: Vec<String>,
    pub follow_up_questions: Vec<String>,
    /// Agent that produced the current results/response.
    pub produced_by: Option<AgentName>,
    /// Error marker set when a node failed.
    pub error: Option<String>,
    processing_steps: Vec<String>,
}

impl TurnState {
    /// Build the turn state for one invocation.
    pub fn new(session_id: SessionId, messages: Vec<Message>, force_web_search: bool) -> Self {
        let mut state = Self {
            session_id,
            messages,
            force_web_search,
            intent: None,
            original_query: String::new(),
            effective_query: String::new(),
            response: None,
            search_results: Vec::new(),
            classification: None,
            needs_clarification: false,
            clarification_questions: Vec::new(),
            follow_up_questions: Vec::new(),
            produced_by: None,
            error: None,
            processing_steps: Vec::new(),
        };
        state.normalize();
        state
    }

    /// Apply defaults for anything not yet set. Safe to call repeatedly;
    /// a second call leaves the state untouched.
    pub fn normalize(&mut self) {
        if self.processing_steps.is_empty() {
            self.processing_steps.push("started".to_string());
        }
        if self.original_query.is_empty() {
            self.original_query = self
                .current_message()
                .map(|m| m.content.trim().to_string())
                .unwrap_or_default();
        }
        if self.effective_query.is_empty() {
            self.effective_query = self.original_query.clone();
        }
    }

    /// The user message this turn is answering (last in the snapshot).
    pub fn current_message(&self) -> Option<&Message> {
        self.messages.last()
    }

    /// Flattened "role: content" history, excluding the current message.
    pub fn history_text(&self) -> String {
        let end = self.messages.len().saturating_sub(1);
        self.messages[..end]
            .iter()
            .map(|m| format!("{}: {}", m.role.as_str(), m.content))
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// The most recent assistant message before the current turn, if any.
    pub fn last_assistant_message(&self) -> Option<&Message> {
        let end = self.messages.len().saturating_sub(1);
        self.messages[..end]
            .iter()
            .rev()
            .find(|m| m.role == MessageRole::Assistant)
    }

    /// Whether the previous assistant turn carried search results, making
    /// this turn a follow-up candidate.
    pub fn follow_up_candidate(&self) -> bool {
        self.last_assistant_message()
            .is_some_and(|m| m.metadata.has_search_results)
    }

    /// Whether intent resolution marked this turn a follow-up.
    pub fn is_follow_up(&self) -> bool {
        self.classification
            .as_ref()
            .is_some_and(|c| c.is_follow_up)
    }

    /// Record a component touching this turn. Append-only by construction;
    /// used for diagnostics, never for control decisions.
    pub fn record_step(&mut self, step: impl Into<String>) {
        self.processing_steps.push(step.into());
    }

    /// Ordered audit trail of components that touched this turn.
    pub fn processing_steps(&self) -> &[String] {
        &self.processing_steps
    }

    /// Resolve the intent and attach the classification that justified it.
    pub fn resolve(&mut self, intent: Intent, classification: Classification) {
        self.intent = Some(intent);
        self.classification = Some(classification);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::conversation::MessageMetadata;
    use crate::domain::routing::{DocumentHit, SearchHit};

    fn sid() -> SessionId {
        SessionId::new("s1")
    }

    fn turn_with(messages: Vec<Message>) -> TurnState {
        TurnState::new(sid(), messages, false)
    }

    #[test]
    fn test_new_captures_query_from_last_message() {
        let turn = turn_with(vec![
            Message::user(sid(), "first question"),
            Message::user(sid(), "  second question  "),
        ]);
        assert_eq!(turn.original_query, "second question");
        assert_eq!(turn.effective_query, "second question");
    }

    #[test]
    fn test_normalize_is_idempotent() {
        let mut turn = turn_with(vec![Message::user(sid(), "hello world question")]);
        let before = turn.clone();
        turn.normalize();
        assert_eq!(turn, before);
        turn.normalize();
        assert_eq!(turn, before);
    }

    #[test]
    fn test_normalize_preserves_modified_query() {
        let mut turn = turn_with(vec![Message::user(sid(), "what about him")]);
        turn.effective_query = "earlier context what about him".to_string();
        turn.normalize();
        assert_eq!(turn.effective_query, "earlier context what about him");
    }

    #[test]
    fn test_history_text_excludes_current() {
        let turn = turn_with(vec![
            Message::user(sid(), "q1"),
            Message::assistant(sid(), "a1"),
            Message::user(sid(), "q2"),
        ]);
        assert_eq!(turn.history_text(), "user: q1\nassistant: a1");
    }

    #[test]
    fn test_history_text_empty_for_first_turn() {
        let turn = turn_with(vec![Message::user(sid(), "q1")]);
        assert_eq!(turn.history_text(), "");
    }

    #[test]
    fn test_follow_up_candidate_requires_results_marker() {
        let mut assistant = Message::assistant(sid(), "here are results");
        assistant.metadata = MessageMetadata::for_assistant(None, true);

        let turn = turn_with(vec![
            Message::user(sid(), "q1"),
            assistant,
            Message::user(sid(), "what about him"),
        ]);
        assert!(turn.follow_up_candidate());

        let turn = turn_with(vec![
            Message::user(sid(), "q1"),
            Message::assistant(sid(), "plain reply"),
            Message::user(sid(), "what about him"),
        ]);
        assert!(!turn.follow_up_candidate());
    }

    #[test]
    fn test_processing_steps_append_only() {
        let mut turn = turn_with(vec![Message::user(sid(), "q")]);
        let initial = turn.processing_steps().len();
        turn.record_step("classify_intent");
        turn.record_step("pdf_query_agent");
        assert_eq!(turn.processing_steps().len(), initial + 2);
        assert_eq!(turn.processing_steps()[0], "started");
    }

    #[test]
    fn test_resolve_sets_intent_and_classification() {
        let mut turn = turn_with(vec![Message::user(sid(), "q")]);
        turn.resolve(Intent::WebSearch, Classification::forced());
        assert_eq!(turn.intent, Some(Intent::WebSearch));
        assert!(turn.classification.is_some());
    }

    #[test]
    fn test_search_results_default_empty() {
        let turn = turn_with(vec![Message::user(sid(), "q")]);
        assert!(turn.search_results.is_empty());

        let mut turn = turn;
        turn.search_results.push(SearchHit::Document(DocumentHit {
            id: "1".into(),
            score: 0.7,
            text: "t".into(),
            source: "s.pdf".into(),
            page: None,
        }));
        assert_eq!(turn.search_results.len(), 1);
    }
}
