//! Intent classification over the language oracle.
//!
//! Two prompts, both requesting strict JSON: a cheap binary check for
//! explicit web-search phrasing, and the five-way classification proper.
//! The oracle is untrusted; anything it returns that is not the JSON we
//! asked for degrades to a safe verdict instead of an error.

use std::sync::Arc;

use serde::Deserialize;
use tracing::{debug, warn};

use crate::domain::foundation::Intent;
use crate::domain::routing::Classification;
use crate::ports::{LanguageOracle, OracleError};

/// Confidence floor for the explicit-web-search pre-check; below it the
/// turn proceeds to full classification.
const EXPLICIT_CONFIDENCE_FLOOR: f32 = 0.7;

/// Characters of prior-turn context carried into a follow-up verdict.
const FOLLOW_UP_CONTEXT_CHARS: usize = 200;

/// Classifies user utterances by asking the language oracle.
#[derive(Clone)]
pub struct IntentClassifier {
    oracle: Arc<dyn LanguageOracle>,
}

/// Raw JSON shape of the explicit-web-search verdict.
#[derive(Debug, Deserialize)]
struct ExplicitVerdict {
    is_web_search: bool,
    #[serde(default)]
    confidence: f32,
    #[serde(default)]
    reasoning: String,
}

/// Raw JSON shape of the five-way verdict.
#[derive(Debug, Deserialize)]
struct IntentVerdict {
    intent: String,
    #[serde(default)]
    confidence: f32,
    #[serde(default)]
    reasoning: String,
}

impl IntentClassifier {
    pub fn new(oracle: Arc<dyn LanguageOracle>) -> Self {
        Self { oracle }
    }

    /// Binary pre-check: is this utterance an explicit request to search
    /// the web ("search the web for ...", "google ...")?
    ///
    /// Runs before the ambiguity detector so explicit requests are never
    /// misread as vague. Any oracle or parse failure degrades to `None`
    /// and the turn proceeds to full classification.
    pub async fn detect_explicit_web_search(&self, query: &str) -> Option<Classification> {
        let prompt = explicit_web_search_prompt(query);

        let raw = match self.oracle.complete(&prompt).await {
            Ok(raw) => raw,
            Err(err) => {
                warn!(error = %err, "explicit web-search check failed, skipping");
                return None;
            }
        };

        let verdict: ExplicitVerdict = match parse_json_payload(&raw) {
            Ok(verdict) => verdict,
            Err(err) => {
                warn!(error = %err, "explicit web-search verdict unparseable, skipping");
                return None;
            }
        };

        debug!(
            is_web_search = verdict.is_web_search,
            confidence = verdict.confidence,
            "explicit web-search verdict"
        );

        if verdict.is_web_search && verdict.confidence >= EXPLICIT_CONFIDENCE_FLOOR {
            Some(Classification::explicit_web_search(
                verdict.confidence,
                verdict.reasoning,
            ))
        } else {
            None
        }
    }

    /// Five-way classification of the utterance.
    ///
    /// `context` is the most recent assistant reply, used to resolve
    /// follow-ups; `follow_up_candidate` reports whether that reply carried
    /// retrieval results. Candidacy is authoritative in both directions: a
    /// disagreeing verdict on a candidate turn is overridden to
    /// `follow_up` (with the override recorded in the reasoning), and a
    /// `follow_up` verdict without a candidate turn to follow is
    /// downgraded to `pdf_query`.
    ///
    /// # Errors
    ///
    /// Returns the oracle's transport failure unchanged; the caller decides
    /// how to degrade. A *malformed* verdict is not an error: it resolves
    /// to `clarification_needed` with zero confidence.
    pub async fn classify(
        &self,
        query: &str,
        history: &str,
        context: Option<&str>,
        follow_up_candidate: bool,
    ) -> Result<Classification, OracleError> {
        let prompt = classification_prompt(query, history);
        let raw = self.oracle.complete(&prompt).await?;

        let verdict: IntentVerdict = match parse_json_payload(&raw) {
            Ok(verdict) => verdict,
            Err(err) => {
                warn!(error = %err, "intent verdict unparseable, treating as unclear");
                return Ok(Classification::from_classifier(
                    Intent::ClarificationNeeded,
                    0.0,
                    "Classifier returned an unparseable verdict",
                ));
            }
        };

        let intent = match verdict.intent.as_str() {
            "greeting" => Intent::Greeting,
            "pdf_query" => Intent::PdfQuery,
            "web_search" => Intent::WebSearch,
            "follow_up" => Intent::FollowUp,
            "clarification_needed" => Intent::ClarificationNeeded,
            other => {
                warn!(label = other, "classifier produced an unknown intent label");
                return Ok(Classification::from_classifier(
                    Intent::ClarificationNeeded,
                    0.0,
                    format!("Classifier produced unknown intent '{other}'"),
                ));
            }
        };

        debug!(intent = %intent, confidence = verdict.confidence, "intent verdict");

        if follow_up_candidate {
            let inherited = context.map(|c| truncate_context(c, FOLLOW_UP_CONTEXT_CHARS));
            let reasoning = if intent == Intent::FollowUp {
                verdict.reasoning
            } else {
                format!(
                    "{} (previous reply carried search results; overridden to follow_up)",
                    verdict.reasoning
                )
            };
            return Ok(Classification::from_classifier(
                Intent::FollowUp,
                verdict.confidence,
                reasoning,
            )
            .as_follow_up(inherited));
        }

        if intent == Intent::FollowUp {
            // Nothing to follow up on; read it as a fresh corpus question.
            return Ok(Classification::from_classifier(
                Intent::PdfQuery,
                verdict.confidence,
                verdict.reasoning,
            ));
        }

        Ok(Classification::from_classifier(
            intent,
            verdict.confidence,
            verdict.reasoning,
        ))
    }
}

fn explicit_web_search_prompt(query: &str) -> String {
    format!(
        r#"Determine if this message explicitly asks for a web search (phrases like "search the web", "search online", "google", "look up online").

Message: "{query}"

Respond with ONLY a JSON object, no other text:
{{"is_web_search": true or false, "confidence": 0.0 to 1.0, "reasoning": "brief explanation"}}"#
    )
}

fn classification_prompt(query: &str, history: &str) -> String {
    format!(
        r#"Classify the user's message into exactly one intent:

- greeting: greetings or conversation openers ("hi", "hello", "good morning")
- pdf_query: questions about the uploaded documents or papers
- web_search: general-knowledge questions or requests for current information
- follow_up: references to the previous answer ("tell me more", "what about him")
- clarification_needed: too vague or ambiguous to act on

Conversation so far:
{history}

User message: "{query}"

Respond with ONLY a JSON object, no other text:
{{"intent": "<one of the labels above>", "confidence": 0.0 to 1.0, "reasoning": "brief explanation"}}"#
    )
}

/// Extract and parse the first JSON object in an oracle completion.
///
/// Models wrap JSON in prose or markdown fences often enough that parsing
/// the raw text directly would fail on otherwise good verdicts.
fn parse_json_payload<T: serde::de::DeserializeOwned>(raw: &str) -> Result<T, serde_json::Error> {
    let trimmed = raw.trim();
    let candidate = match (trimmed.find('{'), trimmed.rfind('}')) {
        (Some(start), Some(end)) if start < end => &trimmed[start..=end],
        _ => trimmed,
    };
    serde_json::from_str(candidate)
}

fn truncate_context(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        text.to_string()
    } else {
        text.chars().take(max_chars).collect()
    }
}
