//! Position heartbeat
//!
//! The manager does not schedule itself; whoever owns it spawns a ticker
//! that calls [`PlaybackManager::poll_position`] at a fixed period.

use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

use crate::manager::PlaybackManager;

/// Shortest accepted period
const MIN_PERIOD: Duration = Duration::from_millis(1);

/// Background task polling the playback position
///
/// Dropping the ticker stops it.
#[derive(Debug)]
pub struct PositionTicker {
    handle: JoinHandle<()>,
    period: Duration,
}

impl PositionTicker {
    /// Start polling `manager` every `period`
    ///
    /// Must be called from within a tokio runtime. Late ticks are skipped
    /// rather than bunched up; poll errors are logged and polling goes on.
    pub fn spawn(manager: Arc<PlaybackManager>, period: Duration) -> Self {
        let period = period.max(MIN_PERIOD);

        let handle = tokio::spawn(async move {
            let mut interval = tokio::time::interval(period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Skip);

            loop {
                interval.tick().await;
                if let Err(e) = manager.poll_position().await {
                    tracing::warn!(error = %e, "Position poll failed");
                }
            }
        });

        Self { handle, period }
    }

    /// Start polling at the manager's configured period
    pub fn spawn_with_config(manager: Arc<PlaybackManager>) -> Self {
        let period = Duration::from_millis(manager.config().poll_interval_ms);
        Self::spawn(manager, period)
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    pub fn is_running(&self) -> bool {
        !self.handle.is_finished()
    }

    /// Stop polling
    pub fn stop(self) {
        drop(self);
    }
}

impl Drop for PositionTicker {
    fn drop(&mut self) {
        self.handle.abort();
    }
}
