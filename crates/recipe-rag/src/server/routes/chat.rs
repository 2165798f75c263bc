//! Chat endpoint: the streaming query pipeline behind HTTP

use axum::{
    body::Body,
    extract::State,
    http::header,
    response::{IntoResponse, Response},
    Json,
};
use futures_util::StreamExt;
use serde_json::json;
use std::convert::Infallible;

use crate::error::{Error, Result};
use crate::pipeline::ChatOutcome;
use crate::server::state::AppState;
use crate::types::ChatRequest;

/// POST /api/chat - Answer a cooking question.
///
/// Streaming mode returns `application/x-ndjson`: one `sources` record, then
/// incremental `content` records, one JSON value per line. Non-streaming
/// mode is not implemented.
pub async fn chat(
    State(state): State<AppState>,
    Json(request): Json<ChatRequest>,
) -> Result<Response> {
    let backend = state.backend().ok_or(Error::NotInitialized)?;

    if request.query.trim().is_empty() {
        return Err(Error::EmptyQuery);
    }
    if !request.stream {
        return Err(Error::NotImplemented);
    }

    match backend.pipeline().respond(&request.query).await? {
        ChatOutcome::NoResults { answer } => Ok(Json(json!({
            "status": "success",
            "answer": answer,
            "sources": [],
        }))
        .into_response()),
        ChatOutcome::Stream(events) => {
            let body = Body::from_stream(
                events.map(|event| Ok::<String, Infallible>(event.to_ndjson_line())),
            );
            Ok((
                [(header::CONTENT_TYPE, "application/x-ndjson")],
                body,
            )
                .into_response())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RagConfig;
    use crate::pipeline::ChatPipeline;
    use crate::routing::RouteType;
    use crate::server::state::RagBackend;
    use crate::test_support::{sample_corpus, RecordingRetrieval, ScriptedLlm};
    use axum::http::StatusCode;
    use std::sync::Arc;

    fn ready_state() -> AppState {
        let (chunks, parents) = sample_corpus();
        let pipeline = ChatPipeline::new(
            Arc::new(ScriptedLlm::new(RouteType::Basic)),
            Arc::new(RecordingRetrieval::new(chunks, parents)),
            5,
        );
        let state = AppState::new(RagConfig::default());
        state.install_backend(RagBackend::new(pipeline));
        state
    }

    #[tokio::test]
    async fn test_rejects_when_not_initialized() {
        let state = AppState::new(RagConfig::default());
        let result = chat(State(state), Json(ChatRequest::new("steamed fish"))).await;

        assert!(matches!(result, Err(Error::NotInitialized)));
    }

    #[tokio::test]
    async fn test_rejects_empty_query() {
        let result = chat(State(ready_state()), Json(ChatRequest::new("  "))).await;
        assert!(matches!(result, Err(Error::EmptyQuery)));
    }

    #[tokio::test]
    async fn test_non_streaming_mode_is_unimplemented() {
        let mut request = ChatRequest::new("steamed fish");
        request.stream = false;

        let result = chat(State(ready_state()), Json(request)).await;
        assert!(matches!(result, Err(Error::NotImplemented)));
    }

    #[tokio::test]
    async fn test_streaming_response_is_ndjson() {
        let response = chat(State(ready_state()), Json(ChatRequest::new("steamed fish")))
            .await
            .expect("stream response");

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response
                .headers()
                .get(header::CONTENT_TYPE)
                .and_then(|v| v.to_str().ok()),
            Some("application/x-ndjson")
        );

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body");
        let text = String::from_utf8(bytes.to_vec()).expect("utf8");

        let lines: Vec<&str> = text.lines().collect();
        assert!(lines.len() >= 2);

        let first: serde_json::Value = serde_json::from_str(lines[0]).expect("json per line");
        assert_eq!(first["type"], "sources");
        for line in &lines[1..] {
            let value: serde_json::Value = serde_json::from_str(line).expect("json per line");
            assert_eq!(value["type"], "content");
        }
    }

    #[tokio::test]
    async fn test_empty_retrieval_returns_terminal_json() {
        let pipeline = ChatPipeline::new(
            Arc::new(ScriptedLlm::new(RouteType::Basic)),
            Arc::new(RecordingRetrieval::empty()),
            5,
        );
        let state = AppState::new(RagConfig::default());
        state.install_backend(RagBackend::new(pipeline));

        let response = chat(State(state), Json(ChatRequest::new("unicorn stew")))
            .await
            .expect("terminal response");

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body");
        let value: serde_json::Value = serde_json::from_slice(&bytes).expect("json body");

        assert_eq!(value["status"], "success");
        assert_eq!(value["sources"].as_array().map(Vec::len), Some(0));
        assert!(value["answer"].as_str().is_some_and(|a| !a.is_empty()));
    }
}
