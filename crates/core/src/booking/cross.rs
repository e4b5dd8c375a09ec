//! Atomic booking across two screenings.
//!
//! Booking one seat in each of two screenings means holding both
//! screenings' locks at once. Acquiring them in caller-argument order
//! deadlocks as soon as two calls race with swapped arguments: each holds
//! one lock and waits forever on the other. Locks are therefore always
//! acquired in screening-name order, a single total order under which no
//! wait-for cycle can form.

use thiserror::Error;
use tracing::{debug, info};

use crate::metrics;

use super::service::BookingService;
use super::types::{BookingRecord, Patron, SeatNumber};

/// Misuse of the cross-booking operation.
#[derive(Debug, Error)]
pub enum CrossBookingError {
    /// Both arguments refer to the same screening.
    #[error("cross-booking requires two distinct screenings, got '{0}' twice")]
    SameScreening(String),
}

/// Result of a cross-booking attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CrossBookingOutcome {
    /// One seat secured in each screening, reported in argument order.
    Booked {
        first: SeatNumber,
        second: SeatNumber,
    },
    /// At least one screening was sold out; nothing was taken from either.
    Rejected,
}

/// Book one seat in each of two screenings, atomically: either both seats
/// are taken and both ledgers gain a record, or neither pool is touched.
pub async fn book_pair(
    first: &BookingService,
    second: &BookingService,
    patron: &Patron,
) -> Result<CrossBookingOutcome, CrossBookingError> {
    if first.name() == second.name() {
        return Err(CrossBookingError::SameScreening(first.name().to_string()));
    }

    // Lock the lower-ordered screening first, regardless of argument order.
    let swapped = first.name() > second.name();
    let (lo, hi) = if swapped {
        (second, first)
    } else {
        (first, second)
    };

    let mut lo_state = lo.lock_state().await;
    debug!("[patron {}] holding lock for {}", patron.id, lo.name());
    let mut hi_state = hi.lock_state().await;
    debug!("[patron {}] holding lock for {}", patron.id, hi.name());

    if lo_state.seats.is_sold_out() || hi_state.seats.is_sold_out() {
        debug!(
            "[patron {}] cross-booking rejected, {} or {} is sold out",
            patron.id,
            lo.name(),
            hi.name()
        );
        return Ok(CrossBookingOutcome::Rejected);
    }

    let lo_seat = lo_state
        .seats
        .take_lowest()
        .expect("pool is non-empty inside the locked section");
    let hi_seat = hi_state
        .seats
        .take_lowest()
        .expect("pool is non-empty inside the locked section");

    lo_state
        .ledger
        .append(BookingRecord::booked(patron.clone(), lo_seat));
    hi_state
        .ledger
        .append(BookingRecord::booked(patron.clone(), hi_seat));
    metrics::CROSS_BOOKINGS.inc();
    info!(
        "[patron {}] booked {} seat {} and {} seat {}",
        patron.id,
        lo.name(),
        lo_seat,
        hi.name(),
        hi_seat
    );

    let (first_seat, second_seat) = if swapped {
        (hi_seat, lo_seat)
    } else {
        (lo_seat, hi_seat)
    };
    Ok(CrossBookingOutcome::Booked {
        first: first_seat,
        second: second_seat,
    })
}
