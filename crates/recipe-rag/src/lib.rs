//! recipe-rag: recipe Q&A with hybrid retrieval and streaming answers
//!
//! Answers free-text cooking questions by retrieving relevant recipe
//! passages and streaming a grounded answer back as newline-delimited JSON
//! events. The core is the query orchestration pipeline: route
//! classification, conditional rewriting, filter-driven retrieval strategy
//! selection, parent-document expansion, and route-shaped generation behind
//! a typed event stream.

pub mod config;
pub mod error;
pub mod filters;
pub mod generation;
pub mod knowledge;
pub mod pipeline;
pub mod providers;
pub mod retrieval;
pub mod routing;
pub mod server;
pub mod types;

#[cfg(test)]
pub(crate) mod test_support;

pub use config::RagConfig;
pub use error::{Error, Result};
pub use pipeline::{ChatOutcome, ChatPipeline};
pub use routing::RouteType;
pub use types::{
    ChatRequest, ChunkMetadata, FilterSet, ParentDocument, RecipeChunk, ScoredChunk, SourceInfo,
    StreamEvent,
};
