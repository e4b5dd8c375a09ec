//! Append-only record of booking attempts for one screening.

use super::types::BookingRecord;

/// Insertion-ordered, append-only collection of attempt outcomes.
///
/// Lives behind the same exclusive lock as the seat pool it accompanies,
/// so "take a seat and record it" is one atomic step; the ledger itself is
/// plain data.
#[derive(Debug, Clone, Default)]
pub struct BookingLedger {
    records: Vec<BookingRecord>,
}

impl BookingLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one record. Records are never mutated or removed.
    pub fn append(&mut self, record: BookingRecord) {
        self.records.push(record);
    }

    /// Point-in-time copy of every record, in insertion order.
    pub fn snapshot(&self) -> Vec<BookingRecord> {
        self.records.clone()
    }

    pub fn booked_count(&self) -> usize {
        self.records.iter().filter(|r| r.is_booked()).count()
    }

    pub fn rejected_count(&self) -> usize {
        self.records.iter().filter(|r| !r.is_booked()).count()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
