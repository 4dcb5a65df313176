//! Routing configuration

use serde::Deserialize;

/// Configuration for the routing core
#[derive(Debug, Clone, Deserialize)]
pub struct RoutingConfig {
    /// Whether the catch-all bare-question ambiguity rule is active.
    ///
    /// Historical revisions disagreed on this rule; it defaults on and can
    /// be switched off for corpora where terse questions are the norm.
    #[serde(default = "default_catch_all")]
    pub catch_all_vague_questions: bool,
}

impl Default for RoutingConfig {
    fn default() -> Self {
        Self {
            catch_all_vague_questions: default_catch_all(),
        }
    }
}

fn default_catch_all() -> bool {
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_routing_defaults() {
        assert!(RoutingConfig::default().catch_all_vague_questions);
    }
}
