//! Shared test doubles for pipeline and server tests

use async_trait::async_trait;
use parking_lot::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use uuid::Uuid;

use crate::error::{Error, Result};
use crate::providers::{AnswerStream, EmbeddingProvider, LlmProvider, RetrievalProvider};
use crate::routing::RouteType;
use crate::types::{ChunkMetadata, FilterSet, ParentDocument, RecipeChunk, ScoredChunk};

/// Deterministic embedder: maps text to a fixed-dimension vector derived
/// from byte content, with no network access.
pub struct StaticEmbedder {
    dimensions: usize,
}

impl StaticEmbedder {
    pub fn new(dimensions: usize) -> Self {
        Self { dimensions }
    }
}

#[async_trait]
impl EmbeddingProvider for StaticEmbedder {
    async fn embed(&self, text: &str) -> Result<Vec<f32>> {
        let mut vector = vec![0.0f32; self.dimensions];
        for (i, byte) in text.bytes().enumerate() {
            vector[i % self.dimensions] += f32::from(byte) / 255.0;
        }
        Ok(vector)
    }

    fn dimensions(&self) -> usize {
        self.dimensions
    }

    async fn health_check(&self) -> Result<bool> {
        Ok(true)
    }

    fn name(&self) -> &str {
        "static"
    }
}

/// Scripted LLM returning canned outputs while recording invocations
pub struct ScriptedLlm {
    pub route: RouteType,
    pub rewritten: String,
    pub list_answer: String,
    pub fragments: Vec<String>,
    /// Yield an error after this many fragments (streaming modes only)
    pub fail_after: Option<usize>,
    pub rewrite_calls: Mutex<Vec<String>>,
    pub generate_calls: AtomicUsize,
}

impl ScriptedLlm {
    pub fn new(route: RouteType) -> Self {
        Self {
            route,
            rewritten: "rewritten query".to_string(),
            list_answer: "1. Egg Tart\n2. Congee".to_string(),
            fragments: vec!["Hello ".to_string(), "world".to_string()],
            fail_after: None,
            rewrite_calls: Mutex::new(Vec::new()),
            generate_calls: AtomicUsize::new(0),
        }
    }

    pub fn rewrite_count(&self) -> usize {
        self.rewrite_calls.lock().len()
    }

    pub fn generate_count(&self) -> usize {
        self.generate_calls.load(Ordering::SeqCst)
    }

    fn scripted_stream(&self) -> AnswerStream {
        let mut items: Vec<Result<String>> = Vec::new();
        for (i, fragment) in self.fragments.iter().enumerate() {
            if self.fail_after.is_some_and(|n| i >= n) {
                break;
            }
            items.push(Ok(fragment.clone()));
        }
        if self.fail_after.is_some() {
            items.push(Err(Error::llm("generation backend failed")));
        }
        Box::pin(futures_util::stream::iter(items))
    }
}

#[async_trait]
impl LlmProvider for ScriptedLlm {
    async fn classify_route(&self, _query: &str) -> RouteType {
        self.route
    }

    async fn rewrite_query(&self, query: &str) -> Result<String> {
        self.rewrite_calls.lock().push(query.to_string());
        Ok(self.rewritten.clone())
    }

    async fn generate_list_answer(
        &self,
        _query: &str,
        _documents: &[ParentDocument],
    ) -> Result<String> {
        self.generate_calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.list_answer.clone())
    }

    async fn generate_detail_stream(
        &self,
        _query: &str,
        _documents: &[ParentDocument],
    ) -> Result<AnswerStream> {
        self.generate_calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.scripted_stream())
    }

    async fn generate_basic_stream(
        &self,
        _query: &str,
        _documents: &[ParentDocument],
    ) -> Result<AnswerStream> {
        self.generate_calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.scripted_stream())
    }

    async fn health_check(&self) -> Result<bool> {
        Ok(true)
    }

    fn name(&self) -> &str {
        "scripted"
    }

    fn model(&self) -> &str {
        "scripted-model"
    }
}

/// Retrieval double returning canned chunks while recording which search
/// strategy was invoked with which query.
pub struct RecordingRetrieval {
    pub chunks: Vec<ScoredChunk>,
    pub parents: Vec<ParentDocument>,
    pub hybrid_calls: Mutex<Vec<String>>,
    pub filtered_calls: Mutex<Vec<(String, FilterSet)>>,
}

impl RecordingRetrieval {
    pub fn new(chunks: Vec<ScoredChunk>, parents: Vec<ParentDocument>) -> Self {
        Self {
            chunks,
            parents,
            hybrid_calls: Mutex::new(Vec::new()),
            filtered_calls: Mutex::new(Vec::new()),
        }
    }

    pub fn empty() -> Self {
        Self::new(Vec::new(), Vec::new())
    }

    pub fn hybrid_queries(&self) -> Vec<String> {
        self.hybrid_calls.lock().clone()
    }

    pub fn filtered_queries(&self) -> Vec<(String, FilterSet)> {
        self.filtered_calls.lock().clone()
    }
}

#[async_trait]
impl RetrievalProvider for RecordingRetrieval {
    async fn hybrid_search(&self, query: &str, _top_k: usize) -> Result<Vec<ScoredChunk>> {
        self.hybrid_calls.lock().push(query.to_string());
        Ok(self.chunks.clone())
    }

    async fn filtered_search(
        &self,
        query: &str,
        filters: &FilterSet,
        _top_k: usize,
    ) -> Result<Vec<ScoredChunk>> {
        self.filtered_calls
            .lock()
            .push((query.to_string(), filters.clone()));
        Ok(self.chunks.clone())
    }

    fn parent_documents(&self, _chunks: &[ScoredChunk]) -> Vec<ParentDocument> {
        self.parents.clone()
    }
}

/// One sample recipe with a scored chunk and its parent document
pub fn sample_corpus() -> (Vec<ScoredChunk>, Vec<ParentDocument>) {
    let document_id = Uuid::new_v4();
    let metadata = ChunkMetadata::new("Steamed Fish", "seafood", "easy");

    let chunk = RecipeChunk::new(
        document_id,
        "Steam the fish over high heat for eight minutes.",
        metadata.clone(),
        0,
    );
    let parent = ParentDocument::new(
        document_id,
        "Steamed Fish",
        "Steam the fish over high heat for eight minutes. Finish with hot oil.",
        metadata,
    );

    (vec![ScoredChunk { chunk, score: 0.87 }], vec![parent])
}
