//! Per-screening booking: seat pool, ledger, booking service, and the
//! atomic two-screening cross-booking operation.

mod cross;
mod ledger;
mod pool;
mod service;
mod types;

pub use cross::{book_pair, CrossBookingError, CrossBookingOutcome};
pub use ledger::BookingLedger;
pub use pool::SeatPool;
pub use service::BookingService;
pub use types::{BookingOutcome, BookingRecord, Patron, Screening, SeatNumber};
