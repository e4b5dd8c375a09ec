//! Prometheus metrics for the booking core.
//!
//! This module provides metrics for:
//! - Booking outcomes (confirmed, rejected, canceled)
//! - Cross-bookings
//! - Admission gate occupancy

use once_cell::sync::Lazy;
use prometheus::{IntCounter, IntCounterVec, IntGauge, Opts};

/// Seats successfully booked, by screening.
pub static BOOKINGS_CONFIRMED: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new(
            "boxoffice_bookings_confirmed_total",
            "Seats successfully booked",
        ),
        &["screening"],
    )
    .unwrap()
});

/// Attempts rejected because the screening was sold out, by screening.
pub static BOOKINGS_REJECTED: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new(
            "boxoffice_bookings_rejected_total",
            "Booking attempts rejected because the screening was sold out",
        ),
        &["screening"],
    )
    .unwrap()
});

/// Attempts canceled before committing.
pub static BOOKINGS_CANCELED: Lazy<IntCounter> = Lazy::new(|| {
    IntCounter::new(
        "boxoffice_bookings_canceled_total",
        "Booking attempts canceled before committing",
    )
    .unwrap()
});

/// Completed two-screening bookings.
pub static CROSS_BOOKINGS: Lazy<IntCounter> = Lazy::new(|| {
    IntCounter::new(
        "boxoffice_cross_bookings_total",
        "Completed atomic two-screening bookings",
    )
    .unwrap()
});

/// Attempts currently holding an admission slot.
pub static ADMISSION_IN_FLIGHT: Lazy<IntGauge> = Lazy::new(|| {
    IntGauge::new(
        "boxoffice_admission_in_flight",
        "Booking attempts currently holding an admission slot",
    )
    .unwrap()
});

/// Get all core metrics for registration in a registry.
pub fn all_metrics() -> Vec<Box<dyn prometheus::core::Collector>> {
    vec![
        Box::new(BOOKINGS_CONFIRMED.clone()),
        Box::new(BOOKINGS_REJECTED.clone()),
        Box::new(BOOKINGS_CANCELED.clone()),
        Box::new(CROSS_BOOKINGS.clone()),
        Box::new(ADMISSION_IN_FLIGHT.clone()),
    ]
}
