//! In-memory paste storage with per-key atomic view consumption.
//!
//! Built on a sharded concurrent map. Holding a map entry guard gives
//! exclusive access to that key, which makes the whole
//! check-decrement-maybe-delete sequence of [`PasteStore::get_and_consume`]
//! indivisible with respect to other readers of the same paste.

use chrono::{DateTime, Utc};
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;

use crate::error::AppError;
use crate::expiry::{self, ConsumeOutcome};
use crate::models::paste::{PasteRecord, PasteView};

/// Authoritative keyed store of paste records.
#[derive(Debug, Default)]
pub struct PasteStore {
    entries: DashMap<String, PasteRecord>,
}

impl PasteStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self {
            entries: DashMap::new(),
        }
    }

    /// Insert a new paste record under its id.
    ///
    /// Ids are never reused: insertion fails even when the resident record
    /// is already dead and merely awaiting removal.
    ///
    /// # Errors
    /// Returns [`AppError::DuplicateId`] when the id is already present.
    pub fn insert(&self, record: PasteRecord) -> Result<(), AppError> {
        match self.entries.entry(record.id.clone()) {
            Entry::Occupied(_) => Err(AppError::DuplicateId(record.id)),
            Entry::Vacant(slot) => {
                slot.insert(record);
                Ok(())
            }
        }
    }

    /// Look up a paste and spend one view of it, as a single atomic step.
    ///
    /// A dead record found here is removed before reporting not-found, so
    /// expired pastes are reclaimed lazily even without the sweeper. When
    /// the caller's view exhausts a finite budget, the record is removed
    /// before the key is released; the racing next reader sees not-found.
    ///
    /// # Arguments
    /// - `id`: Paste identifier.
    /// - `now`: Instant to evaluate liveness against.
    ///
    /// # Returns
    /// The post-decrement snapshot of the paste.
    ///
    /// # Errors
    /// Returns [`AppError::NotFound`] for missing, time-expired, and
    /// view-exhausted pastes alike.
    pub fn get_and_consume(&self, id: &str, now: DateTime<Utc>) -> Result<PasteView, AppError> {
        let Entry::Occupied(mut slot) = self.entries.entry(id.to_string()) else {
            return Err(AppError::NotFound);
        };
        match expiry::consume_view(slot.get_mut(), now) {
            ConsumeOutcome::Denied => {
                slot.remove();
                Err(AppError::NotFound)
            }
            ConsumeOutcome::Granted { exhausted } => {
                let view = PasteView::from(slot.get());
                if exhausted {
                    slot.remove();
                }
                Ok(view)
            }
        }
    }

    /// Remove every record whose deadline has passed.
    ///
    /// Only the time dimension is swept; view exhaustion is settled at read
    /// time inside the consuming entry guard.
    ///
    /// # Returns
    /// The number of records removed.
    pub fn delete_expired(&self, now: DateTime<Utc>) -> usize {
        let mut removed = 0usize;
        self.entries.retain(|_, record| {
            let keep = record.expires_at.map_or(true, |deadline| now < deadline);
            if !keep {
                removed += 1;
            }
            keep
        });
        removed
    }

    /// Number of resident records.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the store holds no records.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
