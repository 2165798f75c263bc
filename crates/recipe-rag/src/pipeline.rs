//! Query orchestration and streaming-response pipeline
//!
//! Turns one incoming question into a retrieval strategy, a set of evidence
//! documents, and an incrementally-delivered answer encoded as an ordered
//! event stream. Stages run sequentially per request; the only overlap with
//! the caller is that events are flushed as they are produced.

use futures_util::StreamExt;
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio_stream::wrappers::ReceiverStream;

use crate::error::{Error, Result};
use crate::filters::FilterExtractor;
use crate::providers::{LlmProvider, RetrievalProvider};
use crate::routing::RouteType;
use crate::types::{ParentDocument, SourceInfo, StreamEvent};

/// Fixed message for the empty-result outcome
pub const NO_RESULTS_MESSAGE: &str =
    "Sorry, no matching recipes were found. Try another dish name or keyword.";

/// Buffered events between the producer task and the response body
const EVENT_CHANNEL_CAPACITY: usize = 32;

/// Outcome of one pipeline run
pub enum ChatOutcome {
    /// Retrieval found nothing; a single terminal response, not a stream
    NoResults {
        /// Fixed apology message
        answer: String,
    },
    /// Ordered event stream: one `sources` event, then `content` events
    Stream(ReceiverStream<StreamEvent>),
}

/// The query orchestration pipeline.
///
/// Holds only shared, read-only collaborators; one instance serves all
/// requests.
pub struct ChatPipeline {
    llm: Arc<dyn LlmProvider>,
    retrieval: Arc<dyn RetrievalProvider>,
    filters: FilterExtractor,
    top_k: usize,
}

impl ChatPipeline {
    /// Create a new pipeline
    pub fn new(
        llm: Arc<dyn LlmProvider>,
        retrieval: Arc<dyn RetrievalProvider>,
        top_k: usize,
    ) -> Self {
        Self {
            llm,
            retrieval,
            filters: FilterExtractor::new(),
            top_k,
        }
    }

    /// Run the pipeline for one query.
    ///
    /// Everything up to and including retrieval runs synchronously here, so
    /// collaborator failures in that phase surface as a plain `Err` before
    /// any event is emitted. Generation runs behind the returned stream.
    pub async fn respond(&self, query: &str) -> Result<ChatOutcome> {
        let query = query.trim();
        if query.is_empty() {
            return Err(Error::EmptyQuery);
        }

        // 1. Route classification; computed once, never revisited
        let route = self.llm.classify_route(query).await;
        tracing::info!("Query routed as {}: \"{}\"", route.as_str(), query);

        // 2. Rewrite, skipped for list queries to keep enumeration cues
        let retrieval_query = if route == RouteType::List {
            query.to_string()
        } else {
            self.llm.rewrite_query(query).await?
        };

        // 3. Strategy selection: filters from the original query text
        let filters = self.filters.extract(query);
        let chunks = if filters.is_empty() {
            self.retrieval
                .hybrid_search(&retrieval_query, self.top_k)
                .await?
        } else {
            tracing::info!("Constrained retrieval with {} filter(s)", filters.len());
            self.retrieval
                .filtered_search(&retrieval_query, &filters, self.top_k)
                .await?
        };

        if chunks.is_empty() {
            tracing::info!("No chunks retrieved, returning empty-result message");
            return Ok(ChatOutcome::NoResults {
                answer: NO_RESULTS_MESSAGE.to_string(),
            });
        }

        // 4. Client-facing source summaries, in retrieval order
        let sources: Vec<SourceInfo> = chunks
            .iter()
            .map(|scored| SourceInfo::from_chunk(&scored.chunk))
            .collect();

        // 5. Expand to parent documents for generation context
        let documents = self.retrieval.parent_documents(&chunks);

        Ok(ChatOutcome::Stream(self.stream_answer(
            route,
            query.to_string(),
            sources,
            documents,
        )))
    }

    /// Spawn the generation phase behind an event channel.
    ///
    /// The receiver side backs the response body; when the caller
    /// disconnects the channel closes and the producer task stops pulling
    /// from the generation backend.
    fn stream_answer(
        &self,
        route: RouteType,
        query: String,
        sources: Vec<SourceInfo>,
        documents: Vec<ParentDocument>,
    ) -> ReceiverStream<StreamEvent> {
        let (tx, rx) = mpsc::channel::<StreamEvent>(EVENT_CHANNEL_CAPACITY);
        let llm = Arc::clone(&self.llm);

        tokio::spawn(async move {
            if tx.send(StreamEvent::Sources(sources)).await.is_err() {
                return;
            }

            match route {
                RouteType::List => {
                    // Blocking generation, replayed one character at a time
                    // to keep the streaming interface uniform
                    match llm.generate_list_answer(&query, &documents).await {
                        Ok(answer) => {
                            for c in answer.chars() {
                                if tx.send(StreamEvent::Content(c.to_string())).await.is_err() {
                                    return;
                                }
                            }
                        }
                        Err(e) => fail_stream(&tx, e).await,
                    }
                }
                RouteType::Detail | RouteType::Basic => {
                    let stream = if route == RouteType::Detail {
                        llm.generate_detail_stream(&query, &documents).await
                    } else {
                        llm.generate_basic_stream(&query, &documents).await
                    };

                    match stream {
                        Ok(mut fragments) => {
                            while let Some(fragment) = fragments.next().await {
                                match fragment {
                                    Ok(text) => {
                                        if text.is_empty() {
                                            continue;
                                        }
                                        if tx.send(StreamEvent::Content(text)).await.is_err() {
                                            return;
                                        }
                                    }
                                    Err(e) => {
                                        fail_stream(&tx, e).await;
                                        return;
                                    }
                                }
                            }
                        }
                        Err(e) => fail_stream(&tx, e).await,
                    }
                }
            }
        });

        ReceiverStream::new(rx)
    }
}

/// Terminate a stream after a mid-generation failure: one terminal error
/// event, then the channel closes.
async fn fail_stream(tx: &mpsc::Sender<StreamEvent>, error: Error) {
    tracing::error!("Generation failed mid-stream: {}", error);
    let _ = tx.send(StreamEvent::Error(error.to_string())).await;
}
