//! Retrieval provider abstraction

use async_trait::async_trait;

use crate::error::Result;
use crate::types::{FilterSet, ParentDocument, ScoredChunk};

/// Trait for retrieval backends.
///
/// Both search methods return chunks in relevance order; that order must be
/// preserved by every downstream consumer.
#[async_trait]
pub trait RetrievalProvider: Send + Sync {
    /// Combined lexical + semantic search over the full corpus
    async fn hybrid_search(&self, query: &str, top_k: usize) -> Result<Vec<ScoredChunk>>;

    /// Relevance-ranked search restricted to chunks matching the filters
    async fn filtered_search(
        &self,
        query: &str,
        filters: &FilterSet,
        top_k: usize,
    ) -> Result<Vec<ScoredChunk>>;

    /// Expand chunks to their full parent documents, order-preserving.
    ///
    /// A chunk whose parent cannot be located is dropped with a logged
    /// warning rather than failing the request.
    fn parent_documents(&self, chunks: &[ScoredChunk]) -> Vec<ParentDocument>;
}
