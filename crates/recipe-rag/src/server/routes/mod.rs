//! API routes for the recipe Q&A server

pub mod chat;
pub mod init;

use axum::{
    routing::{get, post},
    Router,
};

use crate::server::state::AppState;

/// Build all API routes
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/init", post(init::init_system))
        .route("/chat", post(chat::chat))
        .route("/info", get(info))
}

/// API info endpoint
async fn info() -> axum::Json<serde_json::Value> {
    axum::Json(serde_json::json!({
        "name": "recipe-rag",
        "version": env!("CARGO_PKG_VERSION"),
        "description": "Recipe Q&A with hybrid retrieval and streaming answers",
        "endpoints": {
            "POST /api/init": "Initialize the backend (idempotent)",
            "POST /api/chat": "Ask a cooking question (NDJSON stream)",
            "GET /api/info": "This document"
        },
        "stream_format": "One JSON record per line: {\"type\": \"sources\"|\"content\", \"data\": ...}"
    }))
}
