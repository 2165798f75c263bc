//! Application state and the lazily-initialized backend singleton

use parking_lot::RwLock;
use std::sync::Arc;
use tokio::sync::Mutex;

use crate::config::RagConfig;
use crate::error::Result;
use crate::generation::OllamaClient;
use crate::knowledge::KnowledgeBase;
use crate::pipeline::ChatPipeline;
use crate::providers::{EmbeddingProvider, LlmProvider, OllamaEmbedder, OllamaLlm, RetrievalProvider};

/// Fully-constructed backend: knowledge base plus the query pipeline.
///
/// Built once per process and read-only afterwards.
pub struct RagBackend {
    pipeline: ChatPipeline,
}

impl RagBackend {
    /// Wrap a pipeline as a backend
    pub fn new(pipeline: ChatPipeline) -> Self {
        Self { pipeline }
    }

    /// Construct the backend from configuration: providers, knowledge base,
    /// and pipeline.
    pub async fn build(config: &RagConfig) -> Result<Self> {
        tracing::info!("Initializing backend (model: {})", config.llm.generate_model);

        let client = Arc::new(OllamaClient::new(&config.llm));
        let embedder: Arc<dyn EmbeddingProvider> = Arc::new(OllamaEmbedder::from_client(
            Arc::clone(&client),
            config.embeddings.dimensions,
        ));
        let llm: Arc<dyn LlmProvider> = Arc::new(OllamaLlm::from_client(
            client,
            config.llm.generate_model.clone(),
        ));

        let knowledge_base =
            KnowledgeBase::build(&config.knowledge, Arc::clone(&embedder)).await?;
        let retrieval: Arc<dyn RetrievalProvider> = Arc::new(knowledge_base);

        let pipeline = ChatPipeline::new(llm, retrieval, config.retrieval.top_k);

        Ok(Self::new(pipeline))
    }

    /// The query pipeline
    pub fn pipeline(&self) -> &ChatPipeline {
        &self.pipeline
    }
}

/// Result of an initialization request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InitStatus {
    /// Backend was constructed by this call
    Initialized,
    /// Backend already existed; nothing was rebuilt
    AlreadyReady,
}

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    /// Configuration
    config: RagConfig,
    /// Lazily-initialized backend; None until /api/init succeeds
    backend: RwLock<Option<Arc<RagBackend>>>,
    /// Serializes backend construction across concurrent init requests
    init_lock: Mutex<()>,
}

impl AppState {
    /// Create state with no backend yet
    pub fn new(config: RagConfig) -> Self {
        Self {
            inner: Arc::new(AppStateInner {
                config,
                backend: RwLock::new(None),
                init_lock: Mutex::new(()),
            }),
        }
    }

    /// Get configuration
    pub fn config(&self) -> &RagConfig {
        &self.inner.config
    }

    /// Current backend, if initialized
    pub fn backend(&self) -> Option<Arc<RagBackend>> {
        self.inner.backend.read().clone()
    }

    /// Check if the backend is ready
    pub fn is_ready(&self) -> bool {
        self.inner.backend.read().is_some()
    }

    /// Publish a constructed backend
    pub fn install_backend(&self, backend: RagBackend) {
        *self.inner.backend.write() = Some(Arc::new(backend));
    }

    /// Idempotent backend initialization.
    ///
    /// Construction runs at most once: concurrent callers queue on the init
    /// lock, and whoever arrives after the build observes the published
    /// backend and reports readiness without rebuilding.
    pub async fn initialize(&self) -> Result<InitStatus> {
        if self.is_ready() {
            return Ok(InitStatus::AlreadyReady);
        }

        let _guard = self.inner.init_lock.lock().await;
        if self.is_ready() {
            return Ok(InitStatus::AlreadyReady);
        }

        let backend = RagBackend::build(&self.inner.config).await?;
        self.install_backend(backend);
        tracing::info!("Backend initialized");

        Ok(InitStatus::Initialized)
    }
}
