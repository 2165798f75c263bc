//! Recipe knowledge base: corpus loading, parent documents, and retrieval

pub mod corpus;

use async_trait::async_trait;
use dashmap::DashMap;
use std::collections::HashSet;
use std::sync::Arc;
use uuid::Uuid;
use walkdir::WalkDir;

use crate::config::KnowledgeConfig;
use crate::error::{Error, Result};
use crate::providers::{EmbeddingProvider, RetrievalProvider};
use crate::retrieval::RecipeIndex;
use crate::types::{ChunkMetadata, FilterSet, ParentDocument, RecipeChunk, ScoredChunk};

/// The process-wide recipe knowledge base.
///
/// Built once at initialization; read-only for every request afterwards.
pub struct KnowledgeBase {
    embedder: Arc<dyn EmbeddingProvider>,
    index: RecipeIndex,
    parents: DashMap<Uuid, ParentDocument>,
    dedup_parents: bool,
}

impl KnowledgeBase {
    /// Load the recipe corpus, chunk and embed it, and build the index
    pub async fn build(
        config: &KnowledgeConfig,
        embedder: Arc<dyn EmbeddingProvider>,
    ) -> Result<Self> {
        if !config.recipes_dir.is_dir() {
            return Err(Error::knowledge_base(format!(
                "Recipe directory not found: {}",
                config.recipes_dir.display()
            )));
        }

        let mut index = RecipeIndex::new();
        let parents = DashMap::new();

        for entry in WalkDir::new(&config.recipes_dir)
            .into_iter()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_type().is_file())
        {
            let path = entry.path();
            let extension = path
                .extension()
                .and_then(|ext| ext.to_str())
                .unwrap_or_default()
                .to_lowercase();
            if !matches!(extension.as_str(), "md" | "markdown" | "txt") {
                continue;
            }

            let text = match std::fs::read_to_string(path) {
                Ok(text) => text,
                Err(e) => {
                    tracing::warn!("Skipping unreadable recipe {}: {}", path.display(), e);
                    continue;
                }
            };

            let stem = path
                .file_stem()
                .and_then(|s| s.to_str())
                .unwrap_or("recipe");
            let recipe = corpus::parse_recipe(&text, stem);

            let document_id = Uuid::new_v4();
            let metadata = ChunkMetadata::new(
                recipe.dish_name.as_str(),
                recipe.category.as_str(),
                recipe.difficulty.as_str(),
            );

            for (i, content) in corpus::chunk_body(&recipe.body, config.chunk_size, config.min_chunk_size)
                .into_iter()
                .enumerate()
            {
                let embedding = embedder.embed(&content).await?;
                index.insert(
                    RecipeChunk::new(document_id, content, metadata.clone(), i as u32),
                    embedding,
                );
            }

            parents.insert(
                document_id,
                ParentDocument::new(document_id, recipe.dish_name, recipe.body, metadata),
            );
        }

        if parents.is_empty() {
            return Err(Error::knowledge_base(format!(
                "No recipe documents found in {}",
                config.recipes_dir.display()
            )));
        }

        tracing::info!(
            "Knowledge base built: {} documents, {} chunks",
            parents.len(),
            index.len()
        );

        Ok(Self {
            embedder,
            index,
            parents,
            dedup_parents: config.dedup_parents,
        })
    }

    /// Number of parent documents
    pub fn document_count(&self) -> usize {
        self.parents.len()
    }

    /// Number of indexed chunks
    pub fn chunk_count(&self) -> usize {
        self.index.len()
    }

    #[cfg(test)]
    pub(crate) fn from_parts(
        embedder: Arc<dyn EmbeddingProvider>,
        index: RecipeIndex,
        documents: Vec<ParentDocument>,
        dedup_parents: bool,
    ) -> Self {
        let parents = DashMap::new();
        for doc in documents {
            parents.insert(doc.id, doc);
        }
        Self {
            embedder,
            index,
            parents,
            dedup_parents,
        }
    }
}

#[async_trait]
impl RetrievalProvider for KnowledgeBase {
    async fn hybrid_search(&self, query: &str, top_k: usize) -> Result<Vec<ScoredChunk>> {
        let embedding = self.embedder.embed(query).await?;
        Ok(self.index.hybrid_search(query, &embedding, top_k))
    }

    async fn filtered_search(
        &self,
        query: &str,
        filters: &FilterSet,
        top_k: usize,
    ) -> Result<Vec<ScoredChunk>> {
        let embedding = self.embedder.embed(query).await?;
        Ok(self.index.filtered_search(&embedding, filters, top_k))
    }

    fn parent_documents(&self, chunks: &[ScoredChunk]) -> Vec<ParentDocument> {
        let mut seen: HashSet<Uuid> = HashSet::new();
        let mut documents = Vec::new();

        for scored in chunks {
            let document_id = scored.chunk.document_id;
            if self.dedup_parents && !seen.insert(document_id) {
                continue;
            }
            match self.parents.get(&document_id) {
                Some(doc) => documents.push(doc.value().clone()),
                None => tracing::warn!(
                    "Parent document {} not found for chunk {}, dropping it",
                    document_id,
                    scored.chunk.id
                ),
            }
        }

        documents
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::StaticEmbedder;
    use std::io::Write;

    fn scored(chunk: RecipeChunk) -> ScoredChunk {
        ScoredChunk { chunk, score: 0.9 }
    }

    fn base_with_one_parent() -> (KnowledgeBase, ParentDocument) {
        let doc = ParentDocument::new(
            Uuid::new_v4(),
            "Egg Tart",
            "Pastry shell with custard filling.",
            ChunkMetadata::new("Egg Tart", "dessert", "medium"),
        );
        let kb = KnowledgeBase::from_parts(
            Arc::new(StaticEmbedder::new(4)),
            RecipeIndex::new(),
            vec![doc.clone()],
            false,
        );
        (kb, doc)
    }

    #[test]
    fn test_expander_preserves_order_and_duplicates() {
        let (kb, doc) = base_with_one_parent();
        let metadata = ChunkMetadata::new("Egg Tart", "dessert", "medium");
        let chunks = vec![
            scored(RecipeChunk::new(doc.id, "shell", metadata.clone(), 0)),
            scored(RecipeChunk::new(doc.id, "custard", metadata, 1)),
        ];

        let docs = kb.parent_documents(&chunks);
        assert_eq!(docs.len(), 2);
        assert_eq!(docs[0].id, doc.id);
        assert_eq!(docs[1].id, doc.id);
    }

    #[test]
    fn test_expander_dedup_flag() {
        let (kb, doc) = base_with_one_parent();
        let kb = KnowledgeBase {
            dedup_parents: true,
            ..kb
        };
        let metadata = ChunkMetadata::new("Egg Tart", "dessert", "medium");
        let chunks = vec![
            scored(RecipeChunk::new(doc.id, "shell", metadata.clone(), 0)),
            scored(RecipeChunk::new(doc.id, "custard", metadata, 1)),
        ];

        let docs = kb.parent_documents(&chunks);
        assert_eq!(docs.len(), 1);
    }

    #[test]
    fn test_expander_drops_orphan_chunks() {
        let (kb, doc) = base_with_one_parent();
        let metadata = ChunkMetadata::new("Ghost Dish", "unknown", "unknown");
        let chunks = vec![
            scored(RecipeChunk::new(Uuid::new_v4(), "orphan", metadata, 0)),
            scored(RecipeChunk::new(
                doc.id,
                "shell",
                ChunkMetadata::new("Egg Tart", "dessert", "medium"),
                0,
            )),
        ];

        let docs = kb.parent_documents(&chunks);
        assert_eq!(docs.len(), 1);
        assert_eq!(docs[0].id, doc.id);
    }

    #[tokio::test]
    async fn test_build_from_directory() {
        let dir = tempfile::tempdir().expect("temp dir");
        let mut file = std::fs::File::create(dir.path().join("egg-tart.md")).expect("file");
        writeln!(
            file,
            "# Egg Tart\n\n- Category: dessert\n- Difficulty: medium\n\nBlind-bake the pastry shell until golden, then pour in the custard."
        )
        .expect("write");

        let config = KnowledgeConfig {
            recipes_dir: dir.path().to_path_buf(),
            chunk_size: 800,
            min_chunk_size: 20,
            dedup_parents: false,
        };

        let kb = KnowledgeBase::build(&config, Arc::new(StaticEmbedder::new(4)))
            .await
            .expect("build succeeds");

        assert_eq!(kb.document_count(), 1);
        assert!(kb.chunk_count() >= 1);

        let hits = kb.hybrid_search("custard pastry", 5).await.expect("search");
        assert!(!hits.is_empty());
        assert_eq!(hits[0].chunk.metadata.dish_name, "Egg Tart");
    }

    #[tokio::test]
    async fn test_build_fails_on_missing_directory() {
        let config = KnowledgeConfig {
            recipes_dir: std::path::PathBuf::from("/nonexistent/recipes"),
            ..KnowledgeConfig::default()
        };

        let result = KnowledgeBase::build(&config, Arc::new(StaticEmbedder::new(4))).await;
        assert!(result.is_err());
    }
}
