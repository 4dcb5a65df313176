//! Retrieval hits carried through a turn.

use serde::{Deserialize, Serialize};

/// One chunk returned by the document-retrieval capability.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentHit {
    /// Identifier of the chunk in the external index.
    pub id: String,
    /// Similarity score reported by the index.
    pub score: f32,
    /// Chunk text.
    pub text: String,
    /// Source document name.
    pub source: String,
    /// Page the chunk came from, when the ingester recorded one.
    pub page: Option<u32>,
}

/// One result returned by the web-search capability.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WebHit {
    pub title: String,
    pub link: String,
    pub snippet: String,
}

/// A ranked retrieval hit from either capability.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SearchHit {
    Document(DocumentHit),
    Web(WebHit),
}

impl SearchHit {
    /// Topic label for follow-up suggestions: the source document name or
    /// the web page title.
    pub fn topic(&self) -> &str {
        match self {
            SearchHit::Document(hit) => &hit.source,
            SearchHit::Web(hit) => &hit.title,
        }
    }
}
