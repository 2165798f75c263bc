//! Provider abstractions for the pipeline's external collaborators

pub mod embedding;
pub mod llm;
pub mod ollama;
pub mod retrieval;

pub use embedding::EmbeddingProvider;
pub use llm::{AnswerStream, LlmProvider};
pub use ollama::{OllamaEmbedder, OllamaLlm};
pub use retrieval::RetrievalProvider;
