//! Per-screening booking service.

use std::sync::Arc;

use tokio::sync::{Mutex, MutexGuard};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use crate::latency::LatencySimulator;
use crate::metrics;

use super::ledger::BookingLedger;
use super::pool::SeatPool;
use super::types::{BookingOutcome, BookingRecord, Patron, Screening};

/// Seat pool and ledger guarded together by one exclusive lock.
#[derive(Debug)]
pub(crate) struct BookingState {
    pub(crate) seats: SeatPool,
    pub(crate) ledger: BookingLedger,
}

/// Handles every booking attempt for one screening.
///
/// All seat and ledger mutation is serialized through the internal mutex;
/// the critical section never suspends.
pub struct BookingService {
    screening: Screening,
    state: Mutex<BookingState>,
    latency: Arc<dyn LatencySimulator>,
}

impl BookingService {
    pub fn new(screening: Screening, latency: Arc<dyn LatencySimulator>) -> Self {
        let seats = SeatPool::new(screening.capacity);
        Self {
            screening,
            state: Mutex::new(BookingState {
                seats,
                ledger: BookingLedger::new(),
            }),
            latency,
        }
    }

    pub fn screening(&self) -> &Screening {
        &self.screening
    }

    pub fn name(&self) -> &str {
        &self.screening.name
    }

    /// Attempt to book one seat for `patron`.
    ///
    /// Waits out the simulated external latency before touching any lock;
    /// cancellation during that delay aborts the attempt with no ledger
    /// entry. Rejection (sold out) is an ordinary outcome and is recorded.
    pub async fn attempt_booking(
        &self,
        patron: &Patron,
        cancel: &CancellationToken,
    ) -> BookingOutcome {
        tokio::select! {
            biased;
            _ = cancel.cancelled() => {
                debug!(
                    "[patron {}] attempt for {} canceled during latency",
                    patron.id, self.screening.name
                );
                return BookingOutcome::Canceled;
            }
            _ = self.latency.simulate() => {}
        }

        let mut state = self.state.lock().await;
        match state.seats.take_lowest() {
            Some(seat) => {
                state
                    .ledger
                    .append(BookingRecord::booked(patron.clone(), seat));
                metrics::BOOKINGS_CONFIRMED
                    .with_label_values(&[self.screening.name.as_str()])
                    .inc();
                info!(
                    "[patron {}] booked seat {} for {}",
                    patron.id, seat, self.screening.name
                );
                BookingOutcome::Booked(seat)
            }
            None => {
                state.ledger.append(BookingRecord::rejected(patron.clone()));
                metrics::BOOKINGS_REJECTED
                    .with_label_values(&[self.screening.name.as_str()])
                    .inc();
                debug!(
                    "[patron {}] no seats left for {}",
                    patron.id, self.screening.name
                );
                BookingOutcome::Rejected
            }
        }
    }

    /// Point-in-time copy of this screening's ledger.
    pub async fn ledger_snapshot(&self) -> Vec<BookingRecord> {
        self.state.lock().await.ledger.snapshot()
    }

    /// Seats still unassigned.
    pub async fn seats_remaining(&self) -> usize {
        self.state.lock().await.seats.remaining()
    }

    /// Exclusive access to the pool and ledger for operations that must
    /// hold more than one screening's lock (see `booking::cross`).
    pub(crate) async fn lock_state(&self) -> MutexGuard<'_, BookingState> {
        self.state.lock().await
    }
}
