use crate::error::HttpAppError;
use crate::state::AppState;
use axum::{extract::State, response::IntoResponse, Json};
use serde_json::json;
use std::sync::Arc;

/// Liveness check including a database ping.
#[utoipa::path(
    get,
    path = "/health",
    tag = "health",
    responses(
        (status = 200, description = "Service is healthy")
    )
)]
pub async fn health(State(state): State<Arc<AppState>>) -> Result<impl IntoResponse, HttpAppError> {
    sqlx::query("SELECT 1").execute(&state.db.pool).await?;

    Ok(Json(json!({ "status": "ok" })))
}
