//! Background removal of time-expired pastes.
//!
//! The read path already reclaims dead pastes lazily; the sweeper only
//! keeps records that nobody asks for again from lingering in memory.

use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

use crate::service::PasteService;

/// Spawn the periodic expiry sweep task.
///
/// # Arguments
/// - `service`: Service whose store is swept.
/// - `interval_secs`: Sweep period in seconds; `0` disables the sweeper.
///
/// # Returns
/// The task handle, or `None` when sweeping is disabled.
pub fn spawn_sweeper(service: Arc<PasteService>, interval_secs: u64) -> Option<JoinHandle<()>> {
    if interval_secs == 0 {
        tracing::info!("Expiry sweep disabled");
        return None;
    }
    let handle = tokio::spawn(async move {
        let mut ticker = tokio::time::interval(Duration::from_secs(interval_secs));
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        // The first tick completes immediately; consume it so the first
        // sweep runs one full period after startup.
        ticker.tick().await;
        loop {
            ticker.tick().await;
            let removed = service.sweep_expired();
            if removed > 0 {
                tracing::info!("Expiry sweep removed {} paste(s)", removed);
            } else {
                tracing::debug!("Expiry sweep found nothing to remove");
            }
        }
    });
    Some(handle)
}
