//! Delay between chunk copies.

use std::time::Duration;

use tracing::debug;

/// Sleeps between chunks to bound load and replication lag.
///
/// The delay is passed in on every call rather than stored, so a throttle
/// changed from the pause menu applies to the very next sleep.
#[derive(Debug, Default)]
pub struct Throttler {
    sleeps: u64,
    total: Duration,
}

impl Throttler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Convert a millisecond throttle to fractional seconds.
    pub fn throttle_seconds(throttle_ms: u64) -> f64 {
        throttle_ms as f64 / 1000.0
    }

    /// Suspend the current task for `throttle_ms` milliseconds.
    pub async fn sleep_for(&mut self, throttle_ms: u64) {
        let delay = Duration::from_millis(throttle_ms);
        debug!("Throttling for {:.3}s", Self::throttle_seconds(throttle_ms));
        tokio::time::sleep(delay).await;
        self.sleeps += 1;
        self.total += delay;
    }

    /// Sleep after a chunk only if it copied rows. Returns whether it slept.
    pub async fn after_chunk(&mut self, affected_rows: u64, throttle_ms: u64) -> bool {
        if affected_rows == 0 {
            return false;
        }
        self.sleep_for(throttle_ms).await;
        true
    }

    /// Number of sleeps taken so far.
    pub fn sleeps(&self) -> u64 {
        self.sleeps
    }

    /// Total time spent sleeping so far.
    pub fn total(&self) -> Duration {
        self.total
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::time::Instant;

    #[test]
    fn test_throttle_seconds() {
        assert_eq!(Throttler::throttle_seconds(100), 0.1);
        assert_eq!(Throttler::throttle_seconds(0), 0.0);
        assert_eq!(Throttler::throttle_seconds(2500), 2.5);
    }

    #[tokio::test(start_paused = true)]
    async fn test_sleeps_when_rows_were_copied() {
        let mut throttler = Throttler::new();
        let before = Instant::now();

        assert!(throttler.after_chunk(500, 100).await);

        let elapsed = before.elapsed();
        assert!(elapsed >= Duration::from_millis(100), "slept {:?}", elapsed);
        assert!(elapsed < Duration::from_millis(101), "slept {:?}", elapsed);
        assert_eq!(throttler.sleeps(), 1);
        assert_eq!(throttler.total(), Duration::from_millis(100));
    }

    #[tokio::test(start_paused = true)]
    async fn test_skips_sleep_for_empty_chunk() {
        let mut throttler = Throttler::new();
        let before = Instant::now();

        assert!(!throttler.after_chunk(0, 100).await);

        assert_eq!(before.elapsed(), Duration::ZERO);
        assert_eq!(throttler.sleeps(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_uses_latest_throttle_value() {
        let mut throttler = Throttler::new();
        throttler.after_chunk(1, 100).await;
        throttler.after_chunk(1, 250).await;
        assert_eq!(throttler.sleeps(), 2);
        assert_eq!(throttler.total(), Duration::from_millis(350));
    }
}
