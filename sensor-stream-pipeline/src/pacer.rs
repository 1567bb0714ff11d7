//! Emission pacing.
//!
//! Workers pause between submissions to imitate readings arriving in real
//! time. The pause is the only throttle in the pipeline.

use async_trait::async_trait;
use std::time::Duration;

/// Default pause between two submissions of one worker.
pub const DEFAULT_PACING_INTERVAL: Duration = Duration::from_secs(1);

/// Decides how long a worker waits after each submission.
#[async_trait]
pub trait Pacer: Send + Sync {
    /// Wait before the next record is processed.
    async fn pause(&self);
}

/// Sleeps for a fixed interval on the tokio timer.
///
/// Under a paused test runtime the sleep advances virtual time only.
#[derive(Debug, Clone, Copy)]
pub struct IntervalPacer {
    interval: Duration,
}

impl IntervalPacer {
    pub fn new(interval: Duration) -> Self {
        Self { interval }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }
}

impl Default for IntervalPacer {
    fn default() -> Self {
        Self::new(DEFAULT_PACING_INTERVAL)
    }
}

#[async_trait]
impl Pacer for IntervalPacer {
    async fn pause(&self) {
        tokio::time::sleep(self.interval).await;
    }
}

/// Does not wait at all.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoPacer;

#[async_trait]
impl Pacer for NoPacer {
    async fn pause(&self) {}
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::time::Instant;

    #[tokio::test(start_paused = true)]
    async fn test_interval_pacer_sleeps_for_interval() {
        let pacer = IntervalPacer::new(Duration::from_millis(250));
        let start = Instant::now();

        pacer.pause().await;
        pacer.pause().await;

        assert!(start.elapsed() >= Duration::from_millis(500));
    }

    #[tokio::test(start_paused = true)]
    async fn test_no_pacer_returns_immediately() {
        let start = Instant::now();

        NoPacer.pause().await;

        assert_eq!(start.elapsed(), Duration::ZERO);
    }

    #[test]
    fn test_default_interval_is_one_second() {
        assert_eq!(IntervalPacer::default().interval(), Duration::from_secs(1));
    }
}
