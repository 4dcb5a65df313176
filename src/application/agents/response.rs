//! Response formatting agent.
//!
//! The single owner of user-facing reply text. Every path through the
//! workflow terminates here, and by the time this agent returns the turn
//! always carries a response.

use async_trait::async_trait;
use tracing::debug;

use super::Agent;
use crate::domain::foundation::{AgentName, Intent};
use crate::domain::routing::{SearchHit, TurnState};

/// Result text snippets are condensed to this many characters.
const SNIPPET_CHARS: usize = 200;

/// At most this many results are rendered, however many the turn carries.
const RENDERED_RESULTS: usize = 3;

const GREETING_REPLY: &str = "Hello! How can I assist you today?";

const CLARIFICATION_REPLY: &str =
    "I'm having trouble understanding your request. Could you please rephrase?";

const FOLLOW_UP_EMPTY_REPLY: &str = "I'm having trouble finding more information about that. \
     Could you rephrase your question or provide more context?";

const NO_RESULTS_REPLY: &str = "I couldn't find any relevant information. \
     Could you please provide more details or try a different query?";

/// Formats a turn's outcome into the final reply.
#[derive(Debug, Default)]
pub struct ResponseAgent;

impl ResponseAgent {
    pub fn new() -> Self {
        Self
    }

    fn compose(&self, turn: &mut TurnState) -> String {
        match turn.intent {
            Some(Intent::Greeting) => GREETING_REPLY.to_string(),
            Some(Intent::ClarificationNeeded) | None => {
                turn.needs_clarification = true;
                CLARIFICATION_REPLY.to_string()
            }
            _ if turn.search_results.is_empty() => self.compose_empty(turn),
            _ => self.compose_results(turn),
        }
    }

    fn compose_empty(&self, turn: &mut TurnState) -> String {
        if turn.is_follow_up() {
            return FOLLOW_UP_EMPTY_REPLY.to_string();
        }

        turn.needs_clarification = true;
        turn.clarification_questions.extend([
            "Would you like me to search the web for this information?".to_string(),
            "Would you like to try a different query?".to_string(),
        ]);
        NO_RESULTS_REPLY.to_string()
    }

    fn compose_results(&self, turn: &TurnState) -> String {
        let heading = if turn.is_follow_up() {
            "Here's what I found about that:"
        } else {
            "Here's what I found:"
        };

        let mut reply = format!("{heading}\n\n");
        for (index, hit) in turn.search_results.iter().take(RENDERED_RESULTS).enumerate() {
            let position = index + 1;
            match hit {
                SearchHit::Document(doc) => {
                    let text = condense(&doc.text);
                    match doc.page {
                        Some(page) => reply.push_str(&format!(
                            "{position}. From {} (Page {page}):\n   {text}\n",
                            doc.source
                        )),
                        None => reply
                            .push_str(&format!("{position}. From {}:\n   {text}\n", doc.source)),
                    }
                }
                SearchHit::Web(web) => {
                    let snippet = condense(&web.snippet);
                    reply.push_str(&format!(
                        "{position}. {}\n   URL: {}\n   Snippet: {snippet}\n",
                        web.title, web.link
                    ));
                }
            }
        }
        reply
    }

    /// Populate 2-4 follow-up suggestions, topic-derived first.
    fn suggest_follow_ups(&self, turn: &mut TurnState) {
        for hit in turn.search_results.iter().take(2) {
            let topic = hit.topic().trim();
            if !topic.is_empty() {
                turn.follow_up_questions
                    .push(format!("Would you like to know more about {topic}?"));
            }
        }

        let generic = [
            "Would you like me to search for more specific information?",
            "Do you have any other questions?",
        ];
        for question in generic {
            if turn.follow_up_questions.len() >= 2 {
                break;
            }
            turn.follow_up_questions.push(question.to_string());
        }
        turn.follow_up_questions.truncate(4);
    }
}

#[async_trait]
impl Agent for ResponseAgent {
    /// Produce the reply for a finished turn.
    ///
    /// A response decided earlier (ambiguity short-circuit, node failure)
    /// passes through unchanged; otherwise the reply is derived from the
    /// intent and the retrieval results. Follow-up suggestions are always
    /// populated.
    async fn run(&self, turn: &mut TurnState) {
        turn.record_step(AgentName::Response.as_str());

        if turn.response.is_none() {
            turn.response = Some(self.compose(turn));
        }

        self.suggest_follow_ups(turn);
        debug!(intent = ?turn.intent, "response composed");
    }
}

/// Collapse internal whitespace and cap the text at the snippet length,
/// appending an ellipsis when something was cut.
fn condense(text: &str) -> String {
    let collapsed = text.split_whitespace().collect::<Vec<_>>().join(" ");
    if collapsed.chars().count() <= SNIPPET_CHARS {
        collapsed
    } else {
        let truncated: String = collapsed.chars().take(SNIPPET_CHARS).collect();
        format!("{truncated}...")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::conversation::Message;
    use crate::domain::foundation::SessionId;
    use crate::domain::routing::{Classification, DocumentHit, WebHit};
    use proptest::prelude::*;

    fn turn(query: &str) -> TurnState {
        let sid = SessionId::new("s1");
        TurnState::new(sid.clone(), vec![Message::user(sid, query)], false)
    }

    fn doc_hit(source: &str, page: Option<u32>, text: &str) -> SearchHit {
        SearchHit::Document(DocumentHit {
            id: "c1".into(),
            score: 0.9,
            text: text.into(),
            source: source.into(),
            page,
        })
    }

    fn web_hit(title: &str, link: &str, snippet: &str) -> SearchHit {
        SearchHit::Web(WebHit {
            title: title.into(),
            link: link.into(),
            snippet: snippet.into(),
        })
    }

    #[tokio::test]
    async fn test_existing_response_passes_through() {
        let mut t = turn("how?");
        t.response = Some("Your question seems a bit brief.".to_string());
        ResponseAgent::new().run(&mut t).await;
        assert_eq!(t.response.as_deref(), Some("Your question seems a bit brief."));
    }

    #[tokio::test]
    async fn test_greeting_reply() {
        let mut t = turn("hello");
        t.resolve(
            Intent::Greeting,
            Classification::from_classifier(Intent::Greeting, 0.95, "greeting"),
        );
        ResponseAgent::new().run(&mut t).await;
        assert_eq!(t.response.as_deref(), Some(GREETING_REPLY));
        assert!(!t.needs_clarification);
    }

    #[tokio::test]
    async fn test_clarification_reply() {
        let mut t = turn("mumble");
        t.resolve(
            Intent::ClarificationNeeded,
            Classification::from_classifier(Intent::ClarificationNeeded, 0.3, "unclear"),
        );
        ResponseAgent::new().run(&mut t).await;
        assert_eq!(t.response.as_deref(), Some(CLARIFICATION_REPLY));
        assert!(t.needs_clarification);
    }

    #[tokio::test]
    async fn test_document_results_formatting() {
        let mut t = turn("what is attention");
        t.resolve(
            Intent::PdfQuery,
            Classification::from_classifier(Intent::PdfQuery, 0.9, "paper question"),
        );
        t.search_results = vec![
            doc_hit("attention.pdf", Some(3), "Attention weighs token pairs."),
            doc_hit("notes.pdf", None, "Scores come   from dot\nproducts."),
        ];
        ResponseAgent::new().run(&mut t).await;

        let reply = t.response.unwrap();
        assert!(reply.starts_with("Here's what I found:\n\n"));
        assert!(reply.contains("1. From attention.pdf (Page 3):\n   Attention weighs token pairs."));
        assert!(reply.contains("2. From notes.pdf:\n   Scores come from dot products."));
    }

    #[tokio::test]
    async fn test_web_results_formatting() {
        let mut t = turn("latest rust release");
        t.resolve(
            Intent::WebSearch,
            Classification::from_classifier(Intent::WebSearch, 0.9, "current info"),
        );
        t.search_results = vec![web_hit(
            "Rust 1.80 released",
            "https://blog.rust-lang.org",
            "The release ships with...",
        )];
        ResponseAgent::new().run(&mut t).await;

        let reply = t.response.unwrap();
        assert!(reply.contains("1. Rust 1.80 released"));
        assert!(reply.contains("   URL: https://blog.rust-lang.org"));
        assert!(reply.contains("   Snippet: The release ships with..."));
    }

    #[tokio::test]
    async fn test_at_most_three_results_rendered() {
        let mut t = turn("latest rust release");
        t.resolve(
            Intent::WebSearch,
            Classification::from_classifier(Intent::WebSearch, 0.9, "current info"),
        );
        t.search_results = (1..=5)
            .map(|n| {
                web_hit(
                    &format!("Result {n}"),
                    "https://example.com",
                    "a snippet",
                )
            })
            .collect();
        ResponseAgent::new().run(&mut t).await;

        let reply = t.response.unwrap();
        assert!(reply.contains("3. Result 3"));
        assert!(!reply.contains("4. Result 4"));
    }

    #[tokio::test]
    async fn test_follow_up_heading() {
        let mut t = turn("tell me more");
        t.resolve(
            Intent::FollowUp,
            Classification::from_classifier(Intent::FollowUp, 0.9, "r")
                .as_follow_up(Some("earlier answer".into())),
        );
        t.search_results = vec![doc_hit("attention.pdf", Some(1), "more detail")];
        ResponseAgent::new().run(&mut t).await;

        assert!(t
            .response
            .unwrap()
            .starts_with("Here's what I found about that:"));
    }

    #[tokio::test]
    async fn test_follow_up_with_no_results() {
        let mut t = turn("tell me more");
        t.resolve(
            Intent::FollowUp,
            Classification::from_classifier(Intent::FollowUp, 0.9, "r")
                .as_follow_up(Some("earlier answer".into())),
        );
        ResponseAgent::new().run(&mut t).await;

        assert_eq!(t.response.as_deref(), Some(FOLLOW_UP_EMPTY_REPLY));
        assert!(!t.needs_clarification);
    }

    #[tokio::test]
    async fn test_no_results_asks_for_clarification() {
        let mut t = turn("latest rust release");
        t.resolve(
            Intent::WebSearch,
            Classification::from_classifier(Intent::WebSearch, 0.9, "current info"),
        );
        ResponseAgent::new().run(&mut t).await;

        assert_eq!(t.response.as_deref(), Some(NO_RESULTS_REPLY));
        assert!(t.needs_clarification);
        assert_eq!(t.clarification_questions.len(), 2);
    }

    #[tokio::test]
    async fn test_follow_up_suggestions_always_populated() {
        let mut t = turn("hello");
        t.resolve(
            Intent::Greeting,
            Classification::from_classifier(Intent::Greeting, 0.95, "greeting"),
        );
        ResponseAgent::new().run(&mut t).await;
        assert!(t.follow_up_questions.len() >= 2);
        assert!(t.follow_up_questions.len() <= 4);
    }

    #[tokio::test]
    async fn test_follow_up_suggestions_use_topics() {
        let mut t = turn("what is attention");
        t.resolve(
            Intent::PdfQuery,
            Classification::from_classifier(Intent::PdfQuery, 0.9, "r"),
        );
        t.search_results = vec![doc_hit("attention.pdf", Some(1), "text")];
        ResponseAgent::new().run(&mut t).await;

        assert!(t
            .follow_up_questions
            .iter()
            .any(|q| q.contains("attention.pdf")));
    }

    #[test]
    fn test_condense_collapses_whitespace() {
        assert_eq!(condense("a\n  b\t c"), "a b c");
        assert_eq!(condense("   "), "");
    }

    #[test]
    fn test_condense_truncates_long_text() {
        let long = "word ".repeat(100);
        let out = condense(&long);
        assert!(out.ends_with("..."));
        assert_eq!(out.chars().count(), SNIPPET_CHARS + 3);
    }

    proptest! {
        #[test]
        fn prop_condense_bounded_and_single_line(text in ".*") {
            let out = condense(&text);
            prop_assert!(out.chars().count() <= SNIPPET_CHARS + 3);
            prop_assert!(!out.contains('\n'));
            prop_assert!(!out.contains('\t'));
        }

        #[test]
        fn prop_condense_short_input_unchanged_modulo_whitespace(
            words in proptest::collection::vec("[a-z]{1,8}", 0..10)
        ) {
            let input = words.join("  ");
            let out = condense(&input);
            prop_assert_eq!(out, words.join(" "));
        }
    }
}
