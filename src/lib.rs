//! Paperchat - Conversational Retrieval Assistant Core
//!
//! This crate implements the intent-routing and retrieval-orchestration core
//! of a document-centric chat assistant: classification of user utterances,
//! per-session conversation state, the pdf-to-web fallback chain, and
//! response formatting.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
