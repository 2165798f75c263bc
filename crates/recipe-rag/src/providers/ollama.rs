//! Ollama-based providers for embeddings and generation
//!
//! Wraps the OllamaClient to implement the provider traits, sharing a single
//! client between the embedder and the LLM.

use async_trait::async_trait;
use std::sync::Arc;

use crate::config::LlmConfig;
use crate::error::Result;
use crate::generation::{OllamaClient, PromptBuilder};
use crate::routing::RouteType;
use crate::types::ParentDocument;

use super::embedding::EmbeddingProvider;
use super::llm::{AnswerStream, LlmProvider};

/// Ollama embedding provider using nomic-embed-text or similar models
pub struct OllamaEmbedder {
    client: Arc<OllamaClient>,
    dimensions: usize,
}

impl OllamaEmbedder {
    /// Create a new Ollama embedder
    pub fn new(config: &LlmConfig, dimensions: usize) -> Self {
        Self {
            client: Arc::new(OllamaClient::new(config)),
            dimensions,
        }
    }

    /// Create from an existing client
    pub fn from_client(client: Arc<OllamaClient>, dimensions: usize) -> Self {
        Self { client, dimensions }
    }
}

#[async_trait]
impl EmbeddingProvider for OllamaEmbedder {
    async fn embed(&self, text: &str) -> Result<Vec<f32>> {
        self.client.embed(text).await
    }

    fn dimensions(&self) -> usize {
        self.dimensions
    }

    async fn health_check(&self) -> Result<bool> {
        self.client.health_check().await
    }

    fn name(&self) -> &str {
        "ollama"
    }
}

/// Ollama LLM provider for routing, rewriting, and answer generation
pub struct OllamaLlm {
    client: Arc<OllamaClient>,
    model: String,
}

impl OllamaLlm {
    /// Create a new Ollama LLM provider
    pub fn new(config: &LlmConfig) -> Self {
        Self {
            client: Arc::new(OllamaClient::new(config)),
            model: config.generate_model.clone(),
        }
    }

    /// Create from an existing client
    pub fn from_client(client: Arc<OllamaClient>, model: String) -> Self {
        Self { client, model }
    }
}

#[async_trait]
impl LlmProvider for OllamaLlm {
    async fn classify_route(&self, query: &str) -> RouteType {
        match self.client.complete(&PromptBuilder::router_prompt(query)).await {
            Ok(label) => match RouteType::from_label(&label) {
                Some(route) => route,
                None => {
                    tracing::debug!("Unusable route label {:?}, using heuristic", label);
                    RouteType::detect(query)
                }
            },
            Err(e) => {
                tracing::warn!("Route classification failed ({}), using heuristic", e);
                RouteType::detect(query)
            }
        }
    }

    async fn rewrite_query(&self, query: &str) -> Result<String> {
        let rewritten = self
            .client
            .complete(&PromptBuilder::rewrite_prompt(query))
            .await?;
        let rewritten = rewritten.trim().trim_matches('"').trim();

        // A degenerate rewrite must not blank out the retrieval query
        if rewritten.is_empty() {
            tracing::warn!("Rewriter returned empty text, keeping original query");
            return Ok(query.to_string());
        }
        Ok(rewritten.to_string())
    }

    async fn generate_list_answer(
        &self,
        query: &str,
        documents: &[ParentDocument],
    ) -> Result<String> {
        let context = PromptBuilder::build_context(documents);
        self.client
            .complete(&PromptBuilder::list_prompt(query, &context))
            .await
    }

    async fn generate_detail_stream(
        &self,
        query: &str,
        documents: &[ParentDocument],
    ) -> Result<AnswerStream> {
        let context = PromptBuilder::build_context(documents);
        self.client
            .complete_stream(&PromptBuilder::detail_prompt(query, &context))
            .await
    }

    async fn generate_basic_stream(
        &self,
        query: &str,
        documents: &[ParentDocument],
    ) -> Result<AnswerStream> {
        let context = PromptBuilder::build_context(documents);
        self.client
            .complete_stream(&PromptBuilder::basic_prompt(query, &context))
            .await
    }

    async fn health_check(&self) -> Result<bool> {
        self.client.health_check().await
    }

    fn name(&self) -> &str {
        "ollama"
    }

    fn model(&self) -> &str {
        &self.model
    }
}
