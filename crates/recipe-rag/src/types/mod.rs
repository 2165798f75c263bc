//! Data model for the query pipeline

pub mod chunk;
pub mod event;
pub mod query;

pub use chunk::{ChunkMetadata, ParentDocument, RecipeChunk, ScoredChunk, SourceInfo};
pub use event::StreamEvent;
pub use query::{ChatRequest, FilterSet};
