//! Rolling per-session context.
//!
//! Context is a weak signal for follow-up resolution, never authoritative:
//! routing decisions consult it but are not bound by it.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::domain::foundation::Intent;

/// Mutable session-scoped context accumulated across turns.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConversationContext {
    /// Intent detected on the most recent routed turn.
    pub last_intent: Option<Intent>,
    /// Entities mentioned so far, shallow-merged on update.
    pub last_entities: HashMap<String, String>,
    /// Topics in insertion order, no duplicates.
    pub topics: Vec<String>,
}

impl ConversationContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply an update: intent replaces, entities shallow-merge, topics
    /// append in order skipping duplicates.
    pub fn apply(&mut self, update: ContextUpdate) {
        if let Some(intent) = update.intent {
            self.last_intent = Some(intent);
        }
        self.last_entities.extend(update.entities);
        for topic in update.topics {
            if !self.topics.contains(&topic) {
                self.topics.push(topic);
            }
        }
    }
}

/// One turn's contribution to the rolling context.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ContextUpdate {
    pub intent: Option<Intent>,
    pub entities: HashMap<String, String>,
    pub topics: Vec<String>,
}

impl ContextUpdate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_intent(mut self, intent: Intent) -> Self {
        self.intent = Some(intent);
        self
    }

    pub fn with_topic(mut self, topic: impl Into<String>) -> Self {
        self.topics.push(topic.into());
        self
    }

    pub fn with_entity(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.entities.insert(key.into(), value.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_apply_replaces_intent() {
        let mut ctx = ConversationContext::new();
        ctx.apply(ContextUpdate::new().with_intent(Intent::PdfQuery));
        ctx.apply(ContextUpdate::new().with_intent(Intent::WebSearch));
        assert_eq!(ctx.last_intent, Some(Intent::WebSearch));
    }

    #[test]
    fn test_apply_without_intent_keeps_previous() {
        let mut ctx = ConversationContext::new();
        ctx.apply(ContextUpdate::new().with_intent(Intent::Greeting));
        ctx.apply(ContextUpdate::new().with_topic("transformers"));
        assert_eq!(ctx.last_intent, Some(Intent::Greeting));
    }

    #[test]
    fn test_topics_deduplicated_in_insertion_order() {
        let mut ctx = ConversationContext::new();
        ctx.apply(
            ContextUpdate::new()
                .with_topic("attention")
                .with_topic("fine-tuning"),
        );
        ctx.apply(
            ContextUpdate::new()
                .with_topic("attention")
                .with_topic("distillation"),
        );
        assert_eq!(ctx.topics, vec!["attention", "fine-tuning", "distillation"]);
    }

    #[test]
    fn test_entities_shallow_merge() {
        let mut ctx = ConversationContext::new();
        ctx.apply(ContextUpdate::new().with_entity("paper", "Zhang 2023"));
        ctx.apply(ContextUpdate::new().with_entity("model", "BERT"));
        ctx.apply(ContextUpdate::new().with_entity("paper", "Liu 2024"));

        assert_eq!(ctx.last_entities.len(), 2);
        assert_eq!(ctx.last_entities["paper"], "Liu 2024");
    }
}
