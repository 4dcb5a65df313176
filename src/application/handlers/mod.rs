//! Application handlers grouped by concern.

pub mod chat;
