//! Callback pacing
//!
//! Consecutive calls to [`Throttle::wait`] return at least `gap` apart, no
//! matter how long the work between them took. Page fetches, refreshes and
//! skipped records all fall inside the same window.

use std::time::Duration;
use tokio::time::Instant;
use tracing::debug;

/// Spaces crawl callbacks at least `gap` apart
#[derive(Debug)]
pub struct Throttle {
    gap: Duration,
    last: Option<Instant>,
}

impl Throttle {
    /// Create a throttle; a zero gap never sleeps
    pub fn new(gap: Duration) -> Self {
        Self { gap, last: None }
    }

    /// Minimum time between two releases
    pub fn gap(&self) -> Duration {
        self.gap
    }

    /// Wait until `gap` has passed since the previous release, then release.
    ///
    /// The first call returns at once.
    pub async fn wait(&mut self) {
        if let Some(last) = self.last {
            let due = last + self.gap;
            let now = Instant::now();
            if due > now {
                debug!(sleep_ms = (due - now).as_millis() as u64, "Throttling crawl");
                tokio::time::sleep_until(due).await;
            }
        }
        self.last = Some(Instant::now());
    }
}
