//! Classification metadata attached to a turn.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::Intent;

/// Where a routing decision came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClassificationSource {
    /// Caller set the force-web-search flag.
    Forced,
    /// The binary explicit-search check fired before full classification.
    ExplicitDetection,
    /// The five-way oracle classification.
    IntentClassifier,
    /// The local ambiguity detector short-circuited the turn.
    AmbiguityDetector,
    /// Empty document retrieval rerouted the turn to the web.
    PdfSearchFallback,
    /// Oracle failure degraded to keyword matching.
    KeywordFallback,
}

impl ClassificationSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            ClassificationSource::Forced => "forced",
            ClassificationSource::ExplicitDetection => "explicit_detection",
            ClassificationSource::IntentClassifier => "intent_classifier",
            ClassificationSource::AmbiguityDetector => "ambiguity_detector",
            ClassificationSource::PdfSearchFallback => "pdf_search_fallback",
            ClassificationSource::KeywordFallback => "keyword_fallback",
        }
    }
}

/// Outcome of intent resolution for one turn.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Classification {
    pub detected_intent: Intent,
    /// Confidence in [0, 1].
    pub confidence: f32,
    pub reasoning: String,
    pub source: ClassificationSource,
    pub needs_clarification: bool,
    pub is_follow_up: bool,
    /// Inherited context text for follow-up turns.
    pub context: Option<String>,
}

impl Classification {
    /// Synthetic judgment for a caller-forced web search.
    pub fn forced() -> Self {
        Self {
            detected_intent: Intent::WebSearch,
            confidence: 1.0,
            reasoning: "Web search forced by request flag".to_string(),
            source: ClassificationSource::Forced,
            needs_clarification: false,
            is_follow_up: false,
            context: None,
        }
    }

    /// Judgment produced by the explicit-web-search binary check.
    pub fn explicit_web_search(confidence: f32, reasoning: impl Into<String>) -> Self {
        Self {
            detected_intent: Intent::WebSearch,
            confidence: confidence.clamp(0.0, 1.0),
            reasoning: reasoning.into(),
            source: ClassificationSource::ExplicitDetection,
            needs_clarification: false,
            is_follow_up: false,
            context: None,
        }
    }

    /// Judgment produced by the five-way oracle classification.
    pub fn from_classifier(
        detected_intent: Intent,
        confidence: f32,
        reasoning: impl Into<String>,
    ) -> Self {
        Self {
            detected_intent,
            confidence: confidence.clamp(0.0, 1.0),
            reasoning: reasoning.into(),
            source: ClassificationSource::IntentClassifier,
            needs_clarification: detected_intent == Intent::ClarificationNeeded,
            is_follow_up: false,
            context: None,
        }
    }

    /// Short-circuit judgment from the local ambiguity detector.
    pub fn ambiguous() -> Self {
        Self {
            detected_intent: Intent::ClarificationNeeded,
            confidence: 0.9,
            reasoning: "Question was detected as ambiguous".to_string(),
            source: ClassificationSource::AmbiguityDetector,
            needs_clarification: true,
            is_follow_up: false,
            context: None,
        }
    }

    /// Synthetic judgment recorded when empty document retrieval reroutes
    /// the turn to the web.
    pub fn pdf_search_fallback() -> Self {
        Self {
            detected_intent: Intent::WebSearch,
            confidence: 0.8,
            reasoning: "No document results; falling back to web search".to_string(),
            source: ClassificationSource::PdfSearchFallback,
            needs_clarification: false,
            is_follow_up: false,
            context: None,
        }
    }

    /// Degraded judgment after an oracle failure.
    pub fn keyword_fallback(detected_intent: Intent) -> Self {
        Self {
            detected_intent,
            confidence: 0.0,
            reasoning: "Intent classification failed; routed by keyword match".to_string(),
            source: ClassificationSource::KeywordFallback,
            needs_clarification: true,
            is_follow_up: false,
            context: None,
        }
    }

    /// Mark this turn as a follow-up, attaching the inherited context.
    pub fn as_follow_up(mut self, context: Option<String>) -> Self {
        self.is_follow_up = true;
        self.context = context;
        self
    }
}
