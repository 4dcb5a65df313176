//! In-Memory Document Index - DocumentRetrieval without a vector service.
//!
//! Scores chunks by keyword overlap: the fraction of the query's distinct
//! tokens that appear in the chunk. Crude next to real embeddings, but
//! deterministic, dependency-free, and honest about the port's contract
//! (ranked results, floor applied, empty list when nothing clears it).

use std::collections::HashSet;

use async_trait::async_trait;

use crate::domain::routing::DocumentHit;
use crate::ports::{DocumentRetrieval, RetrievalError};

/// Keyword-overlap index over a fixed chunk set.
#[derive(Debug, Default)]
pub struct InMemoryDocumentIndex {
    chunks: Vec<DocumentHit>,
}

impl InMemoryDocumentIndex {
    /// Build an index over the given chunks. Stored scores are ignored;
    /// searching recomputes them per query.
    pub fn new(chunks: Vec<DocumentHit>) -> Self {
        Self { chunks }
    }

    pub fn add_chunk(&mut self, chunk: DocumentHit) {
        self.chunks.push(chunk);
    }

    pub fn is_empty(&self) -> bool {
        self.chunks.is_empty()
    }
}

fn tokenize(text: &str) -> HashSet<String> {
    text.split_whitespace()
        .map(|token| {
            token
                .trim_matches(|c: char| !c.is_alphanumeric())
                .to_lowercase()
        })
        .filter(|token| !token.is_empty())
        .collect()
}

fn overlap_score(query_tokens: &HashSet<String>, chunk_text: &str) -> f32 {
    if query_tokens.is_empty() {
        return 0.0;
    }
    let chunk_tokens = tokenize(chunk_text);
    let matched = query_tokens
        .iter()
        .filter(|token| chunk_tokens.contains(*token))
        .count();
    matched as f32 / query_tokens.len() as f32
}

#[async_trait]
impl DocumentRetrieval for InMemoryDocumentIndex {
    async fn search_similar(
        &self,
        query: &str,
        limit: usize,
        min_similarity: f32,
    ) -> Result<Vec<DocumentHit>, RetrievalError> {
        let query_tokens = tokenize(query);

        let mut scored: Vec<DocumentHit> = self
            .chunks
            .iter()
            .filter_map(|chunk| {
                let score = overlap_score(&query_tokens, &chunk.text);
                (score >= min_similarity && score > 0.0).then(|| DocumentHit {
                    score,
                    ..chunk.clone()
                })
            })
            .collect();

        scored.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(std::cmp::Ordering::Equal));
        scored.truncate(limit);
        Ok(scored)
    }
}
