//! Pure routing decisions.
//!
//! The workflow is a small directed graph:
//!
//! ```text
//! classify_intent -> {pdf_query, web_search, response}
//! pdf_query       -> {response, web_search}   (empty-result fallback)
//! web_search      -> response
//! response        -> END
//! ```
//!
//! These functions decide the edges; the application layer executes the
//! nodes.

use crate::domain::foundation::Intent;

use super::{Classification, TurnState};

/// Workflow node a turn is routed to next.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteTarget {
    PdfQuery,
    WebSearch,
    Respond,
}

impl RouteTarget {
    pub fn as_str(&self) -> &'static str {
        match self {
            RouteTarget::PdfQuery => "pdf_query",
            RouteTarget::WebSearch => "web_search",
            RouteTarget::Respond => "response",
        }
    }
}

/// Pick the node to run after intent resolution.
///
/// A turn that already carries a response goes straight to the formatter;
/// otherwise the resolved intent maps through the single dispatch table.
/// Unrecognized or missing intents fall back conservatively: the corpus is
/// document-centric, so `pdf_query` is the default retrieval route, and a
/// turn with no intent at all can only be answered by the formatter.
pub fn route_after_classify(turn: &TurnState) -> RouteTarget {
    if turn.response.is_some() {
        return RouteTarget::Respond;
    }

    match turn.intent {
        Some(Intent::WebSearch) => RouteTarget::WebSearch,
        Some(Intent::PdfQuery) => RouteTarget::PdfQuery,
        Some(Intent::FollowUp) => {
            let context = turn
                .classification
                .as_ref()
                .and_then(|c| c.context.as_deref())
                .unwrap_or_default();
            if wants_web_search(context) {
                RouteTarget::WebSearch
            } else {
                RouteTarget::PdfQuery
            }
        }
        Some(Intent::Greeting) | Some(Intent::ClarificationNeeded) | None => RouteTarget::Respond,
    }
}

/// Pick the node to run after document retrieval, applying the fallback
/// rule: empty document results reroute to web search, never straight to a
/// "no results" reply. The fallback rewrites the turn's intent and records
/// its provenance.
pub fn route_after_pdf(turn: &mut TurnState) -> RouteTarget {
    if !turn.search_results.is_empty() {
        return RouteTarget::Respond;
    }

    turn.resolve(Intent::WebSearch, Classification::pdf_search_fallback());
    RouteTarget::WebSearch
}

/// Whether a piece of text reads as a request to search the web.
pub fn wants_web_search(text: &str) -> bool {
    let lower = text.to_lowercase();
    ["search", "find", "look up"]
        .iter()
        .any(|kw| lower.contains(kw))
}

/// Best-effort intent when classification failed entirely.
///
/// Keyword scan over the raw query: search verbs route to the web,
/// document words to the corpus, anything else to a clarification reply.
pub fn keyword_fallback_intent(query: &str) -> Intent {
    let lower = query.to_lowercase();
    if ["search", "find", "look up"].iter().any(|kw| lower.contains(kw)) {
        Intent::WebSearch
    } else if ["document", "pdf", "file"].iter().any(|kw| lower.contains(kw)) {
        Intent::PdfQuery
    } else {
        Intent::ClarificationNeeded
    }
}
