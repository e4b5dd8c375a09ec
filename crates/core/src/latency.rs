//! Simulated external latency.
//!
//! Every booking attempt waits out a simulated payment-provider delay
//! before entering its critical section. The source of that delay is an
//! injectable trait so tests can substitute a zero or controlled delay.

use std::time::Duration;

use async_trait::async_trait;
use rand::Rng;

/// Source of the simulated pre-booking delay.
#[async_trait]
pub trait LatencySimulator: Send + Sync {
    /// Wait out one unit of simulated external work.
    async fn simulate(&self);
}

/// Uniformly random delay within `[min_ms, max_ms]`.
#[derive(Debug, Clone)]
pub struct UniformLatency {
    min_ms: u64,
    max_ms: u64,
}

impl UniformLatency {
    pub fn new(min_ms: u64, max_ms: u64) -> Self {
        debug_assert!(min_ms <= max_ms);
        Self { min_ms, max_ms }
    }
}

#[async_trait]
impl LatencySimulator for UniformLatency {
    async fn simulate(&self) {
        // The thread-local RNG is not Send; pick the duration before
        // suspending.
        let ms = {
            let mut rng = rand::thread_rng();
            rng.gen_range(self.min_ms..=self.max_ms)
        };
        tokio::time::sleep(Duration::from_millis(ms)).await;
    }
}

/// No delay at all. Used by tests and throughput measurements.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoLatency;

#[async_trait]
impl LatencySimulator for NoLatency {
    async fn simulate(&self) {}
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Instant;

    #[tokio::test]
    async fn test_uniform_latency_completes() {
        let latency = UniformLatency::new(0, 1);
        latency.simulate().await;
    }

    #[tokio::test]
    async fn test_uniform_latency_accepts_fixed_range() {
        let latency = UniformLatency::new(1, 1);
        let start = Instant::now();
        latency.simulate().await;
        assert!(start.elapsed() >= Duration::from_millis(1));
    }

    #[tokio::test]
    async fn test_no_latency_is_instant() {
        let start = Instant::now();
        NoLatency.simulate().await;
        assert!(start.elapsed() < Duration::from_millis(50));
    }
}
