//! Ambiguity detection.
//!
//! A pure, deterministic pre-filter that runs before any oracle call so
//! that unusable input never costs an external round trip. Follow-up turns
//! are exempt: they inherit context from the previous exchange.

use once_cell::sync::Lazy;
use regex::Regex;

/// Clarification returned for an ambiguous utterance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Clarification {
    /// What to ask the user.
    pub prompt: String,
    /// A concrete rephrasing example.
    pub example: String,
}

impl Clarification {
    /// Render the clarification as a single reply body.
    pub fn into_response_text(self) -> String {
        format!("{}\n\n{}", self.prompt, self.example)
    }
}

struct AmbiguityRule {
    pattern: &'static Lazy<Regex>,
    clarification: &'static str,
    example: &'static str,
}

static VAGUE_QUANTITY: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)\b(how many|how much|what (?:is|are) (?:the )?(?:number|amount|quantity))\b.*\b(enough|sufficient|good|required|necessary|adequate|appropriate|suitable|decent|reasonable|acceptable|satisfactory|optimal|ideal|recommended|suggested)\b",
    )
    .expect("vague-quantity pattern is valid")
});

static VAGUE_QUALITY: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)\b(is|are|does|do|will|would|can|could|should|might|may)\b.*\b(bad|worse|faster|slower|more accurate|less accurate|more efficient|less efficient|more effective|less effective|superior|inferior|preferable|optimal)\b",
    )
    .expect("vague-quality pattern is valid")
});

static VAGUE_COMPARISON: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\b(which|what) (is|are) (better|best|worse|worst)\b")
        .expect("vague-comparison pattern is valid")
});

// Matches a message that consists solely of a bare question opener,
// optionally followed by a question mark.
static BARE_QUESTION: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)^\s*(what|how|when|where|who|why|which|can you|could you|would you|is there|are there|does anyone|do you know|i need help|help me|explain|describe|tell me about|what is|what are|what do|what does|how do|how does|how can|how to|how much|how many|what about|what else|what kind of|what type of|what sort of|what is the|what are the)\s*\??\s*$",
    )
    .expect("bare-question pattern is valid")
});

const BRIEF_CLARIFICATION: &str =
    "Your question seems a bit brief. Could you provide more details?";
const BRIEF_EXAMPLE: &str = "For example, instead of 'How to?', try 'How do I implement a neural network in PyTorch for image classification?'";

static RULES: &[AmbiguityRule] = &[
    AmbiguityRule {
        pattern: &VAGUE_QUANTITY,
        clarification: "I'm not sure I understand your question. Could you explain what you mean by 'enough' in this context?",
        example: "For example, instead of 'How many examples are enough for good accuracy?', try 'How many training examples do I need to achieve 95% accuracy on the test set for sentiment analysis?'",
    },
    AmbiguityRule {
        pattern: &VAGUE_QUALITY,
        clarification: "I'm not sure I understand your question. Could you explain what you mean by 'good/bad' in this context?",
        example: "For example, instead of 'Is this model good?', try 'How does this model's 90% accuracy compare to state-of-the-art on the IMDB dataset?'",
    },
    AmbiguityRule {
        pattern: &VAGUE_COMPARISON,
        clarification: "To help you compare effectively, could you explain what you mean by 'better' in this context?",
        example: "For example, instead of 'Which model is better?', try 'Which model has higher F1 score on small text classification tasks with limited training data?'",
    },
    AmbiguityRule {
        pattern: &BARE_QUESTION,
        clarification: "I'd be happy to help! Could you be more specific about what you'd like to know?",
        example: "For example, instead of 'Tell me about transformers', try 'What are the key components of the transformer architecture in NLP?'",
    },
];

/// Deterministic vagueness check for incoming utterances.
#[derive(Debug, Clone)]
pub struct AmbiguityDetector {
    /// Whether the catch-all bare-question rule participates.
    catch_all_enabled: bool,
}

impl AmbiguityDetector {
    pub fn new(catch_all_enabled: bool) -> Self {
        Self { catch_all_enabled }
    }

    /// Decide whether an utterance is too vague to act on.
    ///
    /// Returns `None` for follow-up turns unconditionally, then applies the
    /// brevity check, then the pattern rules in order; the first matching
    /// rule wins.
    pub fn detect(&self, message: &str, is_follow_up: bool) -> Option<Clarification> {
        if is_follow_up {
            return None;
        }

        if self.is_too_brief(message) {
            return Some(Clarification {
                prompt: BRIEF_CLARIFICATION.to_string(),
                example: BRIEF_EXAMPLE.to_string(),
            });
        }

        for rule in self.active_rules() {
            if rule.pattern.is_match(message) {
                return Some(Clarification {
                    prompt: rule.clarification.to_string(),
                    example: rule.example.to_string(),
                });
            }
        }

        None
    }

    fn active_rules(&self) -> &[AmbiguityRule] {
        if self.catch_all_enabled {
            RULES
        } else {
            // The catch-all is always last.
            &RULES[..RULES.len() - 1]
        }
    }

    /// At most three tokens and none of them a greeting word.
    fn is_too_brief(&self, message: &str) -> bool {
        let tokens: Vec<&str> = message.split_whitespace().collect();
        tokens.len() <= 3 && !tokens.iter().any(|t| is_greeting_token(t))
    }
}

impl Default for AmbiguityDetector {
    fn default() -> Self {
        Self::new(true)
    }
}

fn is_greeting_token(token: &str) -> bool {
    let word: String = token
        .chars()
        .filter(|c| c.is_alphanumeric())
        .collect::<String>()
        .to_lowercase();
    matches!(word.as_str(), "hi" | "hello" | "hey")
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn detector() -> AmbiguityDetector {
        AmbiguityDetector::default()
    }

    #[test]
    fn test_brief_message_is_ambiguous() {
        let verdict = detector().detect("ok", false);
        let clarification = verdict.expect("one-token message is ambiguous");
        assert!(clarification.prompt.contains("brief"));
    }

    #[test]
    fn test_greeting_is_not_brief_ambiguous() {
        assert!(detector().detect("hi", false).is_none());
        assert!(detector().detect("hello there", false).is_none());
        assert!(detector().detect("Hey!", false).is_none());
    }

    #[test]
    fn test_greeting_token_is_whole_word() {
        // "this" contains "hi" as a substring but is not a greeting.
        let verdict = detector().detect("this", false);
        assert!(verdict.is_some());
    }

    #[test]
    fn test_follow_up_is_exempt() {
        assert!(detector().detect("ok", true).is_none());
        assert!(detector().detect("which is better", true).is_none());
    }

    #[test]
    fn test_vague_quantity_rule() {
        let verdict = detector().detect("How many examples are enough for this", false);
        let clarification = verdict.expect("vague quantity should match");
        assert!(clarification.prompt.contains("'enough'"));
    }

    #[test]
    fn test_vague_quality_rule() {
        let verdict = detector().detect("Is this approach more efficient than the old one", false);
        let clarification = verdict.expect("vague quality should match");
        assert!(clarification.prompt.contains("'good/bad'"));
    }

    #[test]
    fn test_vague_comparison_rule() {
        let verdict = detector().detect("So which is better for long documents overall", false);
        let clarification = verdict.expect("vague comparison should match");
        assert!(clarification.prompt.contains("'better'"));
    }

    #[test]
    fn test_bare_question_opener_is_ambiguous() {
        let verdict = detector().detect("tell me about", false);
        assert!(verdict.is_some());
        let verdict = detector().detect("  How does ?", false);
        assert!(verdict.is_some());
    }

    #[test]
    fn test_catch_all_can_be_disabled() {
        // Four tokens, so the brevity rule is not in play; only the
        // catch-all bare-question rule can flag this.
        let message = "what kind of ?";
        assert!(AmbiguityDetector::new(true).detect(message, false).is_some());
        assert!(AmbiguityDetector::new(false).detect(message, false).is_none());
    }

    #[test]
    fn test_specific_question_is_not_ambiguous() {
        let verdict = detector().detect(
            "What does the Zhang paper say about transformers fine-tuning strategies",
            false,
        );
        assert!(verdict.is_none());
    }

    #[test]
    fn test_clarification_into_response_text() {
        let text = Clarification {
            prompt: "p".into(),
            example: "e".into(),
        }
        .into_response_text();
        assert_eq!(text, "p\n\ne");
    }

    proptest! {
        // Brevity law: any utterance of at most three non-greeting tokens
        // is flagged, regardless of content.
        #[test]
        fn prop_short_non_greeting_is_ambiguous(tokens in prop::collection::vec("[a-gj-z]{1,8}", 1..=3)) {
            let message = tokens.join(" ");
            prop_assume!(!tokens.iter().any(|t| is_greeting_token(t)));
            prop_assert!(detector().detect(&message, false).is_some());
        }

        // Follow-up exemption holds for arbitrary input.
        #[test]
        fn prop_follow_up_never_ambiguous(message in ".{0,80}") {
            prop_assert!(detector().detect(&message, true).is_none());
        }
    }
}
