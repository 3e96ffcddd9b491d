//! In-process refresh scheduler
//!
//! Replaces an external cron trigger: runs the refresh job on a fixed
//! interval, first tick one full interval after start.

use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tracing::{error, info};

use crate::refresh::RefreshJob;

pub struct RefreshScheduler {
    job: Arc<RefreshJob>,
    interval: Duration,
}

impl RefreshScheduler {
    pub fn new(job: Arc<RefreshJob>, interval: Duration) -> Self {
        Self { job, interval }
    }

    /// Start the refresh loop in a background task
    pub fn spawn(self) -> JoinHandle<()> {
        tokio::spawn(async move { self.run_loop().await })
    }

    async fn run_loop(self) {
        info!("Refresh scheduler started (every {}s)", self.interval.as_secs());

        let mut ticker = interval_at(Instant::now() + self.interval, self.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            ticker.tick().await;

            match self.job.run().await {
                Ok(outcome) => info!("Scheduled refresh succeeded with {}", outcome.provider_used),
                Err(e) => error!("Scheduled refresh failed: {}", e),
            }
        }
    }
}
