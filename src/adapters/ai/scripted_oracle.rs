//! Scripted Oracle - deterministic LanguageOracle for tests.
//!
//! Returns pre-configured completions in order and counts every call, so
//! tests can assert both what the core concluded and how many oracle round
//! trips it spent getting there.
//!
//! # Example
//!
//! ```ignore
//! let oracle = ScriptedOracle::with_responses(vec![
//!     Ok(r#"{"intent": "greeting", "confidence": 0.95}"#.to_string()),
//! ]);
//! assert_eq!(oracle.call_count(), 0);
//! ```

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;

use crate::ports::{LanguageOracle, OracleError};

/// Deterministic oracle that replays a scripted sequence of outcomes.
#[derive(Debug, Default)]
pub struct ScriptedOracle {
    responses: Mutex<VecDeque<Result<String, OracleError>>>,
    calls: AtomicUsize,
}

impl ScriptedOracle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build an oracle that replays `responses` in order.
    pub fn with_responses(responses: Vec<Result<String, OracleError>>) -> Self {
        Self {
            responses: Mutex::new(responses.into()),
            calls: AtomicUsize::new(0),
        }
    }

    /// Queue one more successful completion.
    pub fn push_response(&self, response: impl Into<String>) {
        if let Ok(mut queue) = self.responses.lock() {
            queue.push_back(Ok(response.into()));
        }
    }

    /// Queue one more failure.
    pub fn push_error(&self, error: OracleError) {
        if let Ok(mut queue) = self.responses.lock() {
            queue.push_back(Err(error));
        }
    }

    /// How many times `complete` has been called.
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl LanguageOracle for ScriptedOracle {
    async fn complete(&self, _prompt: &str) -> Result<String, OracleError> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        let next = self
            .responses
            .lock()
            .ok()
            .and_then(|mut queue| queue.pop_front());

        next.unwrap_or_else(|| {
            Err(OracleError::Unavailable(
                "scripted oracle exhausted".to_string(),
            ))
        })
    }
}
