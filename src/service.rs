//! Paste lifecycle service: validation, id assignment, consuming reads.

use std::sync::Arc;

use chrono::{Duration, Utc};

use crate::config::Config;
use crate::error::AppError;
use crate::ident::IdGenerator;
use crate::models::paste::{
    CreatePasteRequest, CreatePasteResponse, PasteRecord, ReadPasteResponse,
};
use crate::models::HealthResponse;
use crate::store::PasteStore;

// Fresh-id draws per create before declaring the id space exhausted.
const MAX_ID_ATTEMPTS: usize = 16;

/// Façade over the paste store, id generator, and configured limits.
pub struct PasteService {
    config: Arc<Config>,
    store: PasteStore,
    ids: IdGenerator,
}

impl PasteService {
    /// Construct a service with an empty store.
    ///
    /// # Arguments
    /// - `config`: Loaded configuration supplying limits and the share URL
    ///   base.
    pub fn new(config: Arc<Config>) -> Self {
        let ids = IdGenerator::new(config.id_length);
        Self {
            config,
            store: PasteStore::new(),
            ids,
        }
    }

    /// Report service health.
    pub fn health(&self) -> HealthResponse {
        HealthResponse { ok: true }
    }

    /// Validate and store a new paste.
    ///
    /// All validation happens before any mutation; a rejected request leaves
    /// no trace. Identifier collisions are retried transparently with fresh
    /// draws.
    ///
    /// # Arguments
    /// - `req`: Paste creation payload.
    ///
    /// # Returns
    /// The assigned id and the share URL built from the configured base.
    ///
    /// # Errors
    /// Returns [`AppError::Validation`] for rejected input and
    /// [`AppError::Internal`] when no free id could be found.
    pub fn create(&self, req: CreatePasteRequest) -> Result<CreatePasteResponse, AppError> {
        self.validate(&req)?;
        let now = Utc::now();
        let expires_at = req
            .ttl_seconds
            .map(|ttl| now + Duration::seconds(ttl as i64));

        let mut attempts = 0;
        loop {
            attempts += 1;
            let id = self.ids.generate();
            let record = PasteRecord::new(
                id.clone(),
                req.content.clone(),
                now,
                expires_at,
                req.max_views,
            );
            match self.store.insert(record) {
                Ok(()) => {
                    return Ok(CreatePasteResponse {
                        url: self.share_url(&id),
                        id,
                    })
                }
                Err(AppError::DuplicateId(taken)) if attempts < MAX_ID_ATTEMPTS => {
                    tracing::warn!("Paste id collision on {}, retrying", taken);
                }
                Err(AppError::DuplicateId(_)) => {
                    tracing::error!("No free paste id after {} attempts", MAX_ID_ATTEMPTS);
                    return Err(AppError::Internal);
                }
                Err(other) => return Err(other),
            }
        }
    }

    /// Read a paste, spending one view of it.
    ///
    /// # Arguments
    /// - `id`: Paste identifier.
    ///
    /// # Returns
    /// The content together with the post-decrement view budget and the
    /// expiry deadline.
    ///
    /// # Errors
    /// Returns [`AppError::NotFound`] for missing, expired, and exhausted
    /// pastes alike.
    pub fn read(&self, id: &str) -> Result<ReadPasteResponse, AppError> {
        self.store
            .get_and_consume(id, Utc::now())
            .map(ReadPasteResponse::from)
    }

    /// Remove time-expired pastes now.
    ///
    /// # Returns
    /// The number of pastes removed.
    pub fn sweep_expired(&self) -> usize {
        self.store.delete_expired(Utc::now())
    }

    /// Number of currently resident pastes.
    pub fn paste_count(&self) -> usize {
        self.store.len()
    }

    fn validate(&self, req: &CreatePasteRequest) -> Result<(), AppError> {
        let length = req.content.chars().count();
        if length == 0 {
            return Err(AppError::Validation("Content must not be empty".to_string()));
        }
        if length > self.config.max_content_chars {
            return Err(AppError::Validation(format!(
                "Content exceeds maximum of {} characters",
                self.config.max_content_chars
            )));
        }
        if let Some(ttl) = req.ttl_seconds {
            if ttl < self.config.ttl_min_secs || ttl > self.config.ttl_max_secs {
                return Err(AppError::Validation(format!(
                    "ttl_seconds must be between {} and {}",
                    self.config.ttl_min_secs, self.config.ttl_max_secs
                )));
            }
        }
        if let Some(views) = req.max_views {
            if views == 0 || views > self.config.max_views_limit {
                return Err(AppError::Validation(format!(
                    "max_views must be between 1 and {}",
                    self.config.max_views_limit
                )));
            }
        }
        Ok(())
    }

    fn share_url(&self, id: &str) -> String {
        format!(
            "{}/p/{}",
            self.config.public_base_url.trim_end_matches('/'),
            id
        )
    }
}
