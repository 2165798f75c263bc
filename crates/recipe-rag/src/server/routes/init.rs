//! Backend initialization endpoint

use axum::{extract::State, Json};
use serde_json::{json, Value};

use crate::error::Result;
use crate::server::state::{AppState, InitStatus};

/// POST /api/init - Lazily initialize the backend.
///
/// Idempotent: a repeated call reports readiness without rebuilding.
pub async fn init_system(State(state): State<AppState>) -> Result<Json<Value>> {
    match state.initialize().await? {
        InitStatus::Initialized => Ok(Json(json!({
            "status": "success",
            "message": "System initialized",
        }))),
        InitStatus::AlreadyReady => Ok(Json(json!({
            "status": "success",
            "message": "System already ready",
        }))),
    }
}
