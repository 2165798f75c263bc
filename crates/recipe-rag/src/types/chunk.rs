//! Chunk, parent document, and source projection types

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use uuid::Uuid;

use super::query::FilterSet;

/// Number of preview characters exposed to the client per source
const PREVIEW_CHARS: usize = 100;

/// Metadata attached to every chunk and parent document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChunkMetadata {
    /// Name of the dish the passage belongs to
    pub dish_name: String,
    /// Recipe category (e.g. dessert, soup)
    pub category: String,
    /// Difficulty rating (easy, medium, hard)
    pub difficulty: String,
    /// Free-form additional attributes
    #[serde(default)]
    pub extra: HashMap<String, String>,
}

impl ChunkMetadata {
    /// Create metadata with the three required attributes
    pub fn new(
        dish_name: impl Into<String>,
        category: impl Into<String>,
        difficulty: impl Into<String>,
    ) -> Self {
        Self {
            dish_name: dish_name.into(),
            category: category.into(),
            difficulty: difficulty.into(),
            extra: HashMap::new(),
        }
    }

    /// Look up an attribute by name, falling back to the free-form extras
    pub fn attribute(&self, name: &str) -> Option<&str> {
        match name {
            "dish_name" => Some(&self.dish_name),
            "category" => Some(&self.category),
            "difficulty" => Some(&self.difficulty),
            other => self.extra.get(other).map(String::as_str),
        }
    }

    /// True when every filter constraint matches this metadata
    pub fn matches(&self, filters: &FilterSet) -> bool {
        filters.iter().all(|(attribute, value)| {
            self.attribute(attribute)
                .is_some_and(|actual| actual.eq_ignore_ascii_case(value))
        })
    }
}

/// A retrieved evidence unit: an excerpt of a recipe document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecipeChunk {
    /// Unique chunk ID
    pub id: Uuid,
    /// Parent document ID
    pub document_id: Uuid,
    /// Text content
    pub content: String,
    /// Recipe metadata for filtering and source display
    pub metadata: ChunkMetadata,
    /// Chunk index within the parent document
    pub chunk_index: u32,
}

impl RecipeChunk {
    /// Create a new chunk
    pub fn new(
        document_id: Uuid,
        content: impl Into<String>,
        metadata: ChunkMetadata,
        chunk_index: u32,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            document_id,
            content: content.into(),
            metadata,
            chunk_index,
        }
    }
}

/// A chunk paired with its retrieval relevance score
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredChunk {
    /// The retrieved chunk
    pub chunk: RecipeChunk,
    /// Relevance score (0.0-1.0, higher is better)
    pub score: f32,
}

/// The full recipe document a chunk was excerpted from
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParentDocument {
    /// Document ID, referenced by `RecipeChunk::document_id`
    pub id: Uuid,
    /// Name of the dish
    pub dish_name: String,
    /// Full document text
    pub content: String,
    /// Recipe metadata
    pub metadata: ChunkMetadata,
    /// When the document entered the knowledge base
    pub ingested_at: chrono::DateTime<chrono::Utc>,
}

impl ParentDocument {
    /// Create a document stamped with the current time
    pub fn new(
        id: Uuid,
        dish_name: impl Into<String>,
        content: impl Into<String>,
        metadata: ChunkMetadata,
    ) -> Self {
        Self {
            id,
            dish_name: dish_name.into(),
            content: content.into(),
            metadata,
            ingested_at: chrono::Utc::now(),
        }
    }
}

/// Client-facing projection of a chunk.
///
/// Derived once from a retrieved chunk and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceInfo {
    /// Dish name
    pub dish_name: String,
    /// Recipe category
    pub category: String,
    /// Difficulty rating
    pub difficulty: String,
    /// Bounded content preview, newlines collapsed to spaces
    pub content: String,
}

impl SourceInfo {
    /// Project a chunk into its client-facing summary
    pub fn from_chunk(chunk: &RecipeChunk) -> Self {
        let preview: String = chunk
            .content
            .chars()
            .take(PREVIEW_CHARS)
            .collect::<String>()
            .replace('\n', " ");

        Self {
            dish_name: chunk.metadata.dish_name.clone(),
            category: chunk.metadata.category.clone(),
            difficulty: chunk.metadata.difficulty.clone(),
            content: preview,
        }
    }
}
