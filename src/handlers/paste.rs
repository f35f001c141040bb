//! Paste HTTP handlers.

use axum::{
    extract::{Path, State},
    Json,
};

use crate::error::AppError;
use crate::models::paste::{CreatePasteRequest, CreatePasteResponse, ReadPasteResponse};
use crate::AppState;

/// Create a new paste.
///
/// # Arguments
/// - `state`: Application state.
/// - `req`: Paste creation payload.
///
/// # Returns
/// The assigned id and share URL as JSON.
///
/// # Errors
/// Returns an error if validation fails or no free id could be found.
pub async fn create_paste(
    State(state): State<AppState>,
    Json(req): Json<CreatePasteRequest>,
) -> Result<Json<CreatePasteResponse>, AppError> {
    state.service.create(req).map(Json)
}

/// Read a paste by id, spending one view of it.
///
/// # Arguments
/// - `state`: Application state.
/// - `id`: Paste identifier from the path.
///
/// # Returns
/// The paste content and remaining lifetime fields as JSON.
///
/// # Errors
/// Returns not-found for missing, expired, and exhausted pastes alike.
pub async fn read_paste(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ReadPasteResponse>, AppError> {
    state.service.read(&id).map(Json)
}
