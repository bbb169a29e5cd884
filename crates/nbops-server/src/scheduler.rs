//! Periodic drift checks.

use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

use crate::state::AppState;

/// Submit a drift check job every `drift.monitoring_interval_secs`, the
/// first one a full interval after startup. Returns `None` when the
/// interval is 0.
pub fn spawn_drift_schedule(state: AppState) -> Option<JoinHandle<()>> {
    let period = state.config.drift.monitoring_interval()?;
    tracing::info!(interval_secs = period.as_secs(), "drift monitoring scheduled");

    Some(tokio::spawn(async move {
        let mut ticker = tokio::time::interval(period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        // The first tick completes immediately.
        ticker.tick().await;
        loop {
            ticker.tick().await;
            let job = state.submit_drift_check();
            tracing::info!(job_id = %job.id, "scheduled drift check submitted");
        }
    }))
}
