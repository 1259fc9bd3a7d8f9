//! Periodic re-checking on a fixed interval

use std::sync::Arc;
use std::time::Duration;

use tokio::time::MissedTickBehavior;
use tracing::{debug, error};

use crate::error::UpdaterError;
use crate::updater::Updater;

/// Re-runs update checks on a fixed interval
///
/// Ticks that land while a previous check is still running are skipped
/// instead of queueing up. The first check runs immediately when the loop
/// starts. Spawn [`run`](Self::run) as a task and abort it to stop.
pub struct UpdateScheduler {
    updater: Arc<Updater>,
    interval: Duration,
}

impl UpdateScheduler {
    /// Create a new scheduler around a shared driver
    pub fn new(updater: Arc<Updater>, interval: Duration) -> Self {
        Self { updater, interval }
    }

    /// Interval between scheduled checks
    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Run the scheduling loop
    pub async fn run(self) {
        let mut ticker = tokio::time::interval(self.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            ticker.tick().await;

            match self.updater.check_for_updates().await {
                Ok(()) => {
                    debug!(
                        backend = self.updater.backend_key(),
                        "scheduled update check started"
                    );
                }
                Err(UpdaterError::CheckInProgress) => {
                    debug!("previous check still running, skipping tick");
                }
                Err(e) => {
                    error!("scheduled update check failed: {e}");
                }
            }
        }
    }
}
