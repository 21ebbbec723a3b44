//! Politeness delay applied before every request
//!
//! The delay is the only throughput governor: with `n` concurrent callers the
//! request rate stays at or below `n / average delay`.

use async_trait::async_trait;
use rand::Rng;
use std::time::Duration;

/// Pause taken before each request is dispatched
#[async_trait]
pub trait PolitenessDelay: Send + Sync {
    async fn wait_before_request(&self);
}

/// Sleeps for a duration drawn uniformly from `[min, max)` milliseconds
#[derive(Debug, Clone, Copy)]
pub struct RandomDelay {
    min_ms: u64,
    max_ms: u64,
}

impl RandomDelay {
    pub fn new(min_ms: u64, max_ms: u64) -> Self {
        Self { min_ms, max_ms }
    }

    /// Draws the next pause
    pub fn sample(&self) -> Duration {
        if self.max_ms <= self.min_ms {
            return Duration::from_millis(self.min_ms);
        }
        Duration::from_millis(rand::thread_rng().gen_range(self.min_ms..self.max_ms))
    }
}

impl Default for RandomDelay {
    fn default() -> Self {
        Self::new(1000, 3000)
    }
}

#[async_trait]
impl PolitenessDelay for RandomDelay {
    async fn wait_before_request(&self) {
        let pause = self.sample();
        tracing::trace!("Politeness delay: {:?}", pause);
        tokio::time::sleep(pause).await;
    }
}

/// Does not wait at all
#[derive(Debug, Clone, Copy, Default)]
pub struct NoDelay;

#[async_trait]
impl PolitenessDelay for NoDelay {
    async fn wait_before_request(&self) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_within_range() {
        let delay = RandomDelay::default();
        for _ in 0..200 {
            let pause = delay.sample();
            assert!(pause >= Duration::from_millis(1000));
            assert!(pause < Duration::from_millis(3000));
        }
    }

    #[test]
    fn test_degenerate_range() {
        let delay = RandomDelay::new(250, 250);
        assert_eq!(delay.sample(), Duration::from_millis(250));
    }

    #[tokio::test]
    async fn test_random_delay_sleeps() {
        let delay = RandomDelay::new(20, 21);
        let start = std::time::Instant::now();
        delay.wait_before_request().await;
        assert!(start.elapsed() >= Duration::from_millis(20));
    }

    #[tokio::test]
    async fn test_no_delay_returns_immediately() {
        let start = std::time::Instant::now();
        NoDelay.wait_before_request().await;
        assert!(start.elapsed() < Duration::from_millis(50));
    }
}
