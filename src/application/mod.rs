//! Application layer - orchestration over the domain and ports.
//!
//! Handlers own the workflow for each caller-facing operation; agents are
//! the individual workflow nodes; the classifier mediates every oracle
//! conversation.

pub mod agents;
pub mod classifier;
pub mod handlers;

pub use classifier::IntentClassifier;
