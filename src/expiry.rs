//! Liveness and view-consumption decisions for pastes.
//!
//! A paste dies along either of two independent dimensions: an absolute
//! deadline or an exhausted view budget. The functions here are pure
//! decision logic; the store supplies the per-key atomicity around them.

use chrono::{DateTime, Utc};

use crate::models::paste::PasteRecord;

/// Outcome of attempting to spend one view of a paste.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConsumeOutcome {
    /// The view was granted. `exhausted` marks that this was the final view
    /// and the record must not be served again.
    Granted { exhausted: bool },
    /// The paste is dead on at least one dimension; nothing was spent.
    Denied,
}

/// Whether a paste is retrievable at `now`.
///
/// A record is live iff its deadline (when present) lies strictly in the
/// future and its view budget (when present) is nonzero. A paste whose
/// deadline equals `now` is already dead.
pub fn is_live(record: &PasteRecord, now: DateTime<Utc>) -> bool {
    let time_ok = record.expires_at.map_or(true, |deadline| now < deadline);
    let views_ok = record.remaining_views.map_or(true, |left| left > 0);
    time_ok && views_ok
}

/// Spend one view of `record` at `now`, decrementing a finite budget.
///
/// Mutates only the record it is handed; callers must hold exclusive access
/// to it for the whole check-and-decrement to count as one step.
pub fn consume_view(record: &mut PasteRecord, now: DateTime<Utc>) -> ConsumeOutcome {
    if !is_live(record, now) {
        return ConsumeOutcome::Denied;
    }
    let mut exhausted = false;
    if let Some(left) = record.remaining_views {
        let left = left.saturating_sub(1);
        record.remaining_views = Some(left);
        exhausted = left == 0;
    }
    ConsumeOutcome::Granted { exhausted }
}
