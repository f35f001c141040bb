//! Data models for API requests and stored pastes.

use serde::Serialize;

/// Paste data types.
pub mod paste;

/// Service health report.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub ok: bool,
}
