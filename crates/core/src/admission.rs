//! Global admission gate.
//!
//! Bounds how many booking attempts are in flight across every screening
//! at once, independently of the per-screening locks. A slot is consumed
//! only by a successful acquire and is returned exactly once when the
//! permit drops, whatever path the protected operation takes.

use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::sync::Arc;

use thiserror::Error;
use tokio::sync::{OwnedSemaphorePermit, Semaphore};
use tokio_util::sync::CancellationToken;

use crate::metrics;

#[derive(Debug, Error)]
pub enum AdmissionError {
    /// The cancellation signal fired while waiting for a slot.
    #[error("admission acquire canceled")]
    Canceled,

    /// The underlying semaphore was closed.
    #[error("admission gate closed")]
    Closed,
}

#[derive(Debug, Default)]
struct GateCounters {
    in_flight: AtomicUsize,
    peak_in_flight: AtomicUsize,
    acquired_total: AtomicU64,
    canceled_total: AtomicU64,
}

/// Point-in-time view of the gate counters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GateStats {
    pub in_flight: usize,
    pub peak_in_flight: usize,
    pub acquired_total: u64,
    pub canceled_total: u64,
}

/// Counting gate with a fixed number of slots shared system-wide.
#[derive(Clone)]
pub struct AdmissionGate {
    semaphore: Arc<Semaphore>,
    counters: Arc<GateCounters>,
    max_concurrency: usize,
}

impl AdmissionGate {
    pub fn new(max_concurrency: usize) -> Self {
        Self {
            semaphore: Arc::new(Semaphore::new(max_concurrency)),
            counters: Arc::new(GateCounters::default()),
            max_concurrency,
        }
    }

    pub fn max_concurrency(&self) -> usize {
        self.max_concurrency
    }

    /// Wait for a free slot or for cancellation, whichever comes first.
    ///
    /// A canceled wait consumes no slot.
    pub async fn acquire(
        &self,
        cancel: &CancellationToken,
    ) -> Result<AdmissionPermit, AdmissionError> {
        let permit = tokio::select! {
            biased;
            _ = cancel.cancelled() => {
                self.counters.canceled_total.fetch_add(1, Ordering::Relaxed);
                return Err(AdmissionError::Canceled);
            }
            result = Arc::clone(&self.semaphore).acquire_owned() => {
                result.map_err(|_| AdmissionError::Closed)?
            }
        };

        let occupied = self.counters.in_flight.fetch_add(1, Ordering::Relaxed) + 1;
        self.counters
            .peak_in_flight
            .fetch_max(occupied, Ordering::Relaxed);
        self.counters.acquired_total.fetch_add(1, Ordering::Relaxed);
        metrics::ADMISSION_IN_FLIGHT.inc();

        Ok(AdmissionPermit {
            _permit: permit,
            counters: Arc::clone(&self.counters),
        })
    }

    /// Snapshot of the occupancy counters.
    pub fn stats(&self) -> GateStats {
        GateStats {
            in_flight: self.counters.in_flight.load(Ordering::Relaxed),
            peak_in_flight: self.counters.peak_in_flight.load(Ordering::Relaxed),
            acquired_total: self.counters.acquired_total.load(Ordering::Relaxed),
            canceled_total: self.counters.canceled_total.load(Ordering::Relaxed),
        }
    }
}

/// RAII slot in the admission gate; dropping it frees the slot.
#[derive(Debug)]
pub struct AdmissionPermit {
    _permit: OwnedSemaphorePermit,
    counters: Arc<GateCounters>,
}

impl Drop for AdmissionPermit {
    fn drop(&mut self) {
        self.counters.in_flight.fetch_sub(1, Ordering::Relaxed);
        metrics::ADMISSION_IN_FLIGHT.dec();
    }
}
