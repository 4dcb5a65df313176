//! Adapters - concrete implementations of the ports.
//!
//! Each submodule pairs a production adapter with a deterministic
//! in-memory one; the in-memory adapters double as test doubles and as a
//! way to run the core with no external services at all.

pub mod ai;
pub mod retrieval;
pub mod search;
pub mod storage;
