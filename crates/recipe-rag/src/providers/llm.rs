//! Language-generation provider abstraction

use async_trait::async_trait;
use futures_util::Stream;
use std::pin::Pin;

use crate::error::Result;
use crate::routing::RouteType;
use crate::types::ParentDocument;

/// Single-pass sequence of answer fragments from a streaming generation call
pub type AnswerStream = Pin<Box<dyn Stream<Item = Result<String>> + Send>>;

/// Trait for LLM providers covering the three generation collaborators of the
/// pipeline: routing, rewriting, and route-shaped answer generation.
#[async_trait]
pub trait LlmProvider: Send + Sync {
    /// Classify a query into an answer shape.
    ///
    /// Must always produce one of the three routes; classification failures
    /// fall back to a deterministic heuristic rather than propagating.
    async fn classify_route(&self, query: &str) -> RouteType;

    /// Reformulate a query to improve retrieval recall
    async fn rewrite_query(&self, query: &str) -> Result<String>;

    /// Generate a complete, enumerable answer in one blocking call
    async fn generate_list_answer(
        &self,
        query: &str,
        documents: &[ParentDocument],
    ) -> Result<String>;

    /// Generate a step-by-step answer as an incremental stream
    async fn generate_detail_stream(
        &self,
        query: &str,
        documents: &[ParentDocument],
    ) -> Result<AnswerStream>;

    /// Generate a general answer as an incremental stream
    async fn generate_basic_stream(
        &self,
        query: &str,
        documents: &[ParentDocument],
    ) -> Result<AnswerStream>;

    /// Check if the provider is available
    async fn health_check(&self) -> Result<bool>;

    /// Provider name for logging
    fn name(&self) -> &str;

    /// Generation model identifier
    fn model(&self) -> &str;
}
