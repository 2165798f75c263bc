//! Hybrid and metadata-filtered search over indexed recipe chunks

use std::cmp::Ordering;
use std::collections::HashMap;
use uuid::Uuid;

use crate::types::{FilterSet, RecipeChunk, ScoredChunk};

/// A chunk stored with its embedding
struct IndexedChunk {
    chunk: RecipeChunk,
    embedding: Vec<f32>,
}

/// In-memory index over recipe chunks.
///
/// Built once at initialization and read-only afterwards. Hybrid search
/// merges lexical term scoring with cosine similarity, keeping the better
/// score per chunk; filtered search ranks by similarity within the subset
/// matching the metadata constraints.
#[derive(Default)]
pub struct RecipeIndex {
    entries: Vec<IndexedChunk>,
}

impl RecipeIndex {
    /// Create an empty index
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a chunk with its embedding
    pub fn insert(&mut self, chunk: RecipeChunk, embedding: Vec<f32>) {
        self.entries.push(IndexedChunk { chunk, embedding });
    }

    /// Number of indexed chunks
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Rank all chunks by cosine similarity against the query embedding
    pub fn semantic_search(&self, query_embedding: &[f32], top_k: usize) -> Vec<ScoredChunk> {
        let mut hits: Vec<ScoredChunk> = self
            .entries
            .iter()
            .map(|entry| ScoredChunk {
                chunk: entry.chunk.clone(),
                score: cosine_similarity(query_embedding, &entry.embedding),
            })
            .collect();

        sort_and_truncate(&mut hits, top_k);
        hits
    }

    /// Rank chunks by lexical overlap with the query terms.
    ///
    /// Score is the fraction of query terms present in the chunk content;
    /// chunks without any match are omitted.
    pub fn lexical_search(&self, query: &str, top_k: usize) -> Vec<ScoredChunk> {
        let terms = query_terms(query);
        if terms.is_empty() {
            return Vec::new();
        }

        let mut hits: Vec<ScoredChunk> = self
            .entries
            .iter()
            .filter_map(|entry| {
                let content = entry.chunk.content.to_lowercase();
                let dish = entry.chunk.metadata.dish_name.to_lowercase();
                let matched = terms
                    .iter()
                    .filter(|term| content.contains(term.as_str()) || dish.contains(term.as_str()))
                    .count();
                if matched == 0 {
                    return None;
                }
                Some(ScoredChunk {
                    chunk: entry.chunk.clone(),
                    score: matched as f32 / terms.len() as f32,
                })
            })
            .collect();

        sort_and_truncate(&mut hits, top_k);
        hits
    }

    /// Combined lexical + semantic search over the full corpus.
    ///
    /// Merges the two hit lists by chunk id, keeping the better score.
    pub fn hybrid_search(
        &self,
        query: &str,
        query_embedding: &[f32],
        top_k: usize,
    ) -> Vec<ScoredChunk> {
        let dense_hits = self.semantic_search(query_embedding, top_k);
        let text_hits = self.lexical_search(query, top_k);

        let mut by_id: HashMap<Uuid, ScoredChunk> = HashMap::new();
        for hit in dense_hits.into_iter().chain(text_hits.into_iter()) {
            by_id
                .entry(hit.chunk.id)
                .and_modify(|existing| {
                    if hit.score > existing.score {
                        *existing = hit.clone();
                    }
                })
                .or_insert(hit);
        }

        let mut merged: Vec<ScoredChunk> = by_id.into_values().collect();
        sort_and_truncate(&mut merged, top_k);
        merged
    }

    /// Similarity-ranked search restricted to chunks matching the filters
    pub fn filtered_search(
        &self,
        query_embedding: &[f32],
        filters: &FilterSet,
        top_k: usize,
    ) -> Vec<ScoredChunk> {
        let mut hits: Vec<ScoredChunk> = self
            .entries
            .iter()
            .filter(|entry| entry.chunk.metadata.matches(filters))
            .map(|entry| ScoredChunk {
                chunk: entry.chunk.clone(),
                score: cosine_similarity(query_embedding, &entry.embedding),
            })
            .collect();

        sort_and_truncate(&mut hits, top_k);
        hits
    }
}

fn sort_and_truncate(hits: &mut Vec<ScoredChunk>, top_k: usize) {
    hits.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal));
    hits.truncate(top_k);
}

fn query_terms(query: &str) -> Vec<String> {
    query
        .to_lowercase()
        .split(|c: char| !c.is_alphanumeric())
        .filter(|term| term.len() >= 2)
        .map(str::to_string)
        .collect()
}

fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    if a.len() != b.len() || a.is_empty() {
        return 0.0;
    }

    let dot: f32 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
    let norm_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();

    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }
    (dot / (norm_a * norm_b)).clamp(0.0, 1.0)
}
