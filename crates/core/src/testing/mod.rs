//! Testing utilities: deterministic latency sources and fixtures.
//!
//! The latency seam is the only external dependency of the booking flow;
//! substituting it makes every concurrency property testable without
//! wall-clock randomness.

use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use tokio::sync::Notify;

use crate::latency::LatencySimulator;

/// Latency source that parks every caller until `release_all` is called.
///
/// Lets tests hold booking attempts inside the simulated delay and then
/// observe cancellation, or release them on demand.
#[derive(Debug, Default)]
pub struct StalledLatency {
    notify: Notify,
    waiting: AtomicUsize,
}

impl StalledLatency {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of attempts currently parked in the delay.
    pub fn waiting(&self) -> usize {
        self.waiting.load(Ordering::SeqCst)
    }

    /// Release every currently parked attempt.
    pub fn release_all(&self) {
        self.notify.notify_waiters();
    }
}

#[async_trait]
impl LatencySimulator for StalledLatency {
    async fn simulate(&self) {
        struct Parked<'a>(&'a AtomicUsize);
        impl Drop for Parked<'_> {
            fn drop(&mut self) {
                self.0.fetch_sub(1, Ordering::SeqCst);
            }
        }

        self.waiting.fetch_add(1, Ordering::SeqCst);
        let _parked = Parked(&self.waiting);
        self.notify.notified().await;
    }
}

/// Test fixtures and helper constructors.
pub mod fixtures {
    use std::sync::Arc;

    use crate::booking::{BookingService, Patron, Screening};
    use crate::latency::{LatencySimulator, NoLatency};
    use crate::orchestrator::BookingOrchestrator;

    pub fn patron(id: u64) -> Patron {
        Patron::new(id, format!("patron_{}", id))
    }

    pub fn screening(name: &str, capacity: u32) -> Screening {
        Screening::new(name, capacity)
    }

    /// Booking service with no simulated latency.
    pub fn instant_service(name: &str, capacity: u32) -> BookingService {
        BookingService::new(screening(name, capacity), Arc::new(NoLatency))
    }

    /// Orchestrator over the given screenings with no simulated latency.
    pub fn instant_orchestrator(
        entries: Vec<(&str, u32)>,
        max_concurrency: usize,
    ) -> BookingOrchestrator {
        orchestrator_with_latency(entries, max_concurrency, Arc::new(NoLatency))
    }

    /// Orchestrator with an explicit latency source.
    pub fn orchestrator_with_latency(
        entries: Vec<(&str, u32)>,
        max_concurrency: usize,
        latency: Arc<dyn LatencySimulator>,
    ) -> BookingOrchestrator {
        let screenings = entries
            .into_iter()
            .map(|(name, capacity)| screening(name, capacity))
            .collect();
        BookingOrchestrator::new(screenings, max_concurrency, latency)
            .expect("valid test screenings")
    }
}
