//! Health endpoint handler.

use axum::{extract::State, Json};

use crate::models::HealthResponse;
use crate::AppState;

/// Report that the service is up.
///
/// # Returns
/// `{"ok": true}` whenever the process can answer at all.
pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(state.service.health())
}
