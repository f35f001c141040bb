//! Paste record and wire types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A stored paste with its two expiry dimensions.
///
/// `expires_at` is `None` for pastes without a time limit and
/// `remaining_views` is `None` for pastes without a view budget. A record
/// whose budget reached zero never stays in the store; the read that spends
/// the final view removes it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PasteRecord {
    pub id: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub expires_at: Option<DateTime<Utc>>,
    pub remaining_views: Option<u32>,
}

impl PasteRecord {
    /// Create a paste record.
    ///
    /// # Arguments
    /// - `id`: Assigned short identifier.
    /// - `content`: Paste text.
    /// - `created_at`: Creation instant.
    /// - `expires_at`: Absolute expiry deadline, if any.
    /// - `remaining_views`: Initial view budget, if any.
    ///
    /// # Returns
    /// A new [`PasteRecord`].
    pub fn new(
        id: String,
        content: String,
        created_at: DateTime<Utc>,
        expires_at: Option<DateTime<Utc>>,
        remaining_views: Option<u32>,
    ) -> Self {
        Self {
            id,
            content,
            created_at,
            expires_at,
            remaining_views,
        }
    }
}

/// Snapshot of a record taken after the caller's own view was counted.
#[derive(Debug, Clone)]
pub struct PasteView {
    pub content: String,
    pub remaining_views: Option<u32>,
    pub expires_at: Option<DateTime<Utc>>,
}

impl From<&PasteRecord> for PasteView {
    fn from(value: &PasteRecord) -> Self {
        Self {
            content: value.content.clone(),
            remaining_views: value.remaining_views,
            expires_at: value.expires_at,
        }
    }
}

/// Request payload for creating a paste.
#[derive(Debug, Deserialize)]
pub struct CreatePasteRequest {
    pub content: String,
    pub ttl_seconds: Option<u64>,
    pub max_views: Option<u32>,
}

/// Response payload for a created paste.
#[derive(Debug, Serialize)]
pub struct CreatePasteResponse {
    pub id: String,
    pub url: String,
}

/// Response payload for a consumed paste view.
///
/// `remaining_views` and `expires_at` serialize as `null` when the paste has
/// no view budget or no time limit.
#[derive(Debug, Serialize)]
pub struct ReadPasteResponse {
    pub content: String,
    pub remaining_views: Option<u32>,
    pub expires_at: Option<DateTime<Utc>>,
}

impl From<PasteView> for ReadPasteResponse {
    fn from(value: PasteView) -> Self {
        Self {
            content: value.content,
            remaining_views: value.remaining_views,
            expires_at: value.expires_at,
        }
    }
}
