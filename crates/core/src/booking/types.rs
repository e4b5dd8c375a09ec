//! Core booking data types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Seat numbers are 1-based within a screening's capacity.
pub type SeatNumber = u32;

/// A simulated patron attempting to book one seat.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Patron {
    pub id: u64,
    pub name: String,
}

impl Patron {
    pub fn new(id: u64, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }
}

/// A screening with a fixed seat capacity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Screening {
    pub name: String,
    pub capacity: u32,
}

impl Screening {
    pub fn new(name: impl Into<String>, capacity: u32) -> Self {
        Self {
            name: name.into(),
            capacity,
        }
    }
}

/// Result of a single booking attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BookingOutcome {
    /// A seat was secured.
    Booked(SeatNumber),
    /// The screening was sold out at the moment of the attempt.
    Rejected,
    /// The shared cancellation signal fired before the attempt committed.
    Canceled,
}

impl BookingOutcome {
    pub fn is_booked(&self) -> bool {
        matches!(self, Self::Booked(_))
    }
}

/// One ledger entry: the immutable outcome of a completed attempt.
///
/// `seat` is `None` for a rejected attempt. Canceled attempts never reach
/// the ledger.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookingRecord {
    pub patron: Patron,
    pub seat: Option<SeatNumber>,
    pub recorded_at: DateTime<Utc>,
}

impl BookingRecord {
    pub fn booked(patron: Patron, seat: SeatNumber) -> Self {
        Self {
            patron,
            seat: Some(seat),
            recorded_at: Utc::now(),
        }
    }

    pub fn rejected(patron: Patron) -> Self {
        Self {
            patron,
            seat: None,
            recorded_at: Utc::now(),
        }
    }

    /// Whether this record represents a successful booking.
    pub fn is_booked(&self) -> bool {
        self.seat.is_some()
    }
}
