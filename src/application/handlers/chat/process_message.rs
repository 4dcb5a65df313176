//! Process Message Handler - one full chat turn.
//!
//! The orchestrator: records the incoming message, resolves the intent,
//! walks the retrieval workflow, formats the reply, and books both sides
//! of the exchange into the session. The handler is infallible from the
//! caller's point of view; every failure inside the pipeline becomes a
//! reply with the `error` intent instead of a returned error.

use std::sync::Arc;

use serde::Serialize;
use tracing::{info, warn};

use crate::application::agents::{Agent, PdfQueryAgent, ResponseAgent, WebSearchAgent};
use crate::application::classifier::IntentClassifier;
use crate::config::AppConfig;
use crate::domain::conversation::{ContextUpdate, Message, MessageMetadata, MessageRole};
use crate::domain::foundation::{AgentName, Intent, ReplyIntent, SessionId};
use crate::domain::routing::{
    keyword_fallback_intent, route_after_classify, route_after_pdf, AmbiguityDetector,
    Classification, ClassificationSource, RouteTarget, SearchHit, TurnState,
};
use crate::ports::{ConversationStore, DocumentRetrieval, LanguageOracle, WebSearch};

const ERROR_REPLY: &str = "I encountered an error processing your request. Please try again.";

/// Command to process one user message
#[derive(Debug, Clone)]
pub struct ProcessMessageCommand {
    /// Session to continue; `None` starts a new session.
    pub session_id: Option<String>,
    /// The user's utterance.
    pub message: String,
    /// Bypass classification and search the web directly.
    pub force_web_search: bool,
}

/// Turn provenance reported back to the caller. The session id and the
/// resolved intent are repeated here so the block is self-contained when
/// serialized on its own.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResponseMetadata {
    pub session_id: SessionId,
    pub intent: ReplyIntent,
    pub agent_used: Option<AgentName>,
    pub success: bool,
    pub processing_steps: Vec<String>,
    pub source: Option<ClassificationSource>,
    pub confidence: Option<f32>,
}

/// Result of processing one message
#[derive(Debug, Clone, Serialize)]
pub struct ProcessMessageResult {
    pub intent: ReplyIntent,
    pub message: String,
    pub session_id: SessionId,
    pub search_results: Vec<SearchHit>,
    pub needs_clarification: bool,
    pub clarification_questions: Vec<String>,
    pub follow_up_questions: Vec<String>,
    pub conversation_history: Vec<Message>,
    pub metadata: ResponseMetadata,
}

/// Handler for processing chat messages
pub struct ProcessMessageHandler {
    store: Arc<dyn ConversationStore>,
    classifier: IntentClassifier,
    detector: AmbiguityDetector,
    pdf_agent: PdfQueryAgent,
    web_agent: WebSearchAgent,
    response_agent: ResponseAgent,
}

impl ProcessMessageHandler {
    /// Wire the handler from its collaborators and configuration.
    pub fn new(
        store: Arc<dyn ConversationStore>,
        oracle: Arc<dyn LanguageOracle>,
        retrieval: Arc<dyn DocumentRetrieval>,
        web: Arc<dyn WebSearch>,
        config: &AppConfig,
    ) -> Self {
        Self {
            store,
            classifier: IntentClassifier::new(oracle),
            detector: AmbiguityDetector::new(config.routing.catch_all_vague_questions),
            pdf_agent: PdfQueryAgent::new(retrieval, config.retrieval.clone()),
            web_agent: WebSearchAgent::new(web, config.retrieval.clone()),
            response_agent: ResponseAgent::new(),
        }
    }

    /// Process one user message and produce the reply.
    ///
    /// Always returns a result; pipeline failures surface as a reply with
    /// the `error` intent and `success: false` in the metadata.
    pub async fn handle(&self, command: ProcessMessageCommand) -> ProcessMessageResult {
        let session_id = command
            .session_id
            .map(SessionId::new)
            .unwrap_or_else(SessionId::generate);

        info!(session_id = %session_id, force = command.force_web_search, "processing message");

        let user_message = Message::new(
            session_id.clone(),
            MessageRole::User,
            command.message,
            MessageMetadata::for_user(command.force_web_search),
        );
        self.store.append_message(user_message).await;

        let history = self.store.history(&session_id).await;
        let mut turn = TurnState::new(session_id, history, command.force_web_search);

        self.classify(&mut turn).await;

        match route_after_classify(&turn) {
            RouteTarget::PdfQuery => {
                self.pdf_agent.run(&mut turn).await;
                if turn.error.is_none() && route_after_pdf(&mut turn) == RouteTarget::WebSearch {
                    self.web_agent.run(&mut turn).await;
                }
            }
            RouteTarget::WebSearch => self.web_agent.run(&mut turn).await,
            RouteTarget::Respond => {}
        }

        self.response_agent.run(&mut turn).await;
        self.finish(turn).await
    }

    /// Resolve the turn's intent.
    ///
    /// Order matters: the caller's force flag wins outright, then the
    /// explicit-web-search check runs before the ambiguity detector so an
    /// explicit request is never misread as vague, then the local detector,
    /// and only then the oracle. An oracle failure degrades to keyword
    /// routing instead of failing the turn.
    async fn classify(&self, turn: &mut TurnState) {
        turn.record_step("classify_intent");

        if turn.force_web_search {
            turn.resolve(Intent::WebSearch, Classification::forced());
            return;
        }

        if let Some(classification) = self
            .classifier
            .detect_explicit_web_search(&turn.original_query)
            .await
        {
            turn.resolve(Intent::WebSearch, classification);
            return;
        }

        let follow_up_candidate = turn.follow_up_candidate();

        if let Some(clarification) = self.detector.detect(&turn.original_query, follow_up_candidate)
        {
            turn.needs_clarification = true;
            turn.clarification_questions.push(clarification.prompt.clone());
            turn.response = Some(clarification.into_response_text());
            turn.resolve(Intent::ClarificationNeeded, Classification::ambiguous());
            return;
        }

        let context = turn.last_assistant_message().map(|m| m.content.clone());
        let history_text = turn.history_text();

        match self
            .classifier
            .classify(
                &turn.original_query,
                &history_text,
                context.as_deref(),
                follow_up_candidate,
            )
            .await
        {
            Ok(classification) => {
                if classification.is_follow_up {
                    if let Some(inherited) = classification.context.as_deref() {
                        turn.effective_query =
                            format!("{inherited} {}", turn.original_query);
                    }
                }
                turn.resolve(classification.detected_intent, classification);
            }
            Err(err) => {
                warn!(error = %err, "intent classification failed, using keyword routing");
                turn.record_step("classify_intent_error");
                let intent = keyword_fallback_intent(&turn.original_query);
                turn.resolve(intent, Classification::keyword_fallback(intent));
            }
        }
    }

    /// Book the assistant turn, fold the outcome into the session context,
    /// and shape the caller-facing result.
    async fn finish(&self, mut turn: TurnState) -> ProcessMessageResult {
        let message = match turn.response.clone() {
            Some(text) => text,
            None => {
                // The formatter guarantees a reply; reaching this arm means
                // the turn broke in a way no node accounted for.
                turn.error
                    .get_or_insert_with(|| "turn finished without a response".to_string());
                ERROR_REPLY.to_string()
            }
        };

        let success = turn.error.is_none();
        let intent = if success {
            turn.intent
                .map(ReplyIntent::from)
                .unwrap_or(ReplyIntent::ClarificationNeeded)
        } else {
            ReplyIntent::Error
        };

        let has_results = !turn.search_results.is_empty();
        let assistant_message = Message::new(
            turn.session_id.clone(),
            MessageRole::Assistant,
            message.clone(),
            MessageMetadata {
                force_web_search: false,
                agent_used: turn.produced_by,
                has_search_results: has_results,
                error: turn.error.clone(),
            },
        );
        self.store.append_message(assistant_message).await;

        let mut update = ContextUpdate::new();
        if let Some(resolved) = turn.intent {
            update = update.with_intent(resolved);
        }
        for hit in turn.search_results.iter().take(3) {
            let topic = hit.topic().trim();
            if !topic.is_empty() {
                update = update.with_topic(topic);
            }
        }
        self.store.update_context(&turn.session_id, update).await;

        let conversation_history = self.store.history(&turn.session_id).await;

        info!(
            session_id = %turn.session_id,
            intent = %intent,
            success,
            results = turn.search_results.len(),
            "message processed"
        );

        ProcessMessageResult {
            intent,
            message,
            session_id: turn.session_id.clone(),
            search_results: turn.search_results.clone(),
            needs_clarification: turn.needs_clarification,
            clarification_questions: turn.clarification_questions.clone(),
            follow_up_questions: turn.follow_up_questions.clone(),
            conversation_history,
            metadata: ResponseMetadata {
                session_id: turn.session_id.clone(),
                intent,
                agent_used: turn.produced_by,
                success,
                processing_steps: turn.processing_steps().to_vec(),
                source: turn.classification.as_ref().map(|c| c.source),
                confidence: turn.classification.as_ref().map(|c| c.confidence),
            },
        }
    }
}
