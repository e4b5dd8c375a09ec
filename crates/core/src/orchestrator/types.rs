//! Orchestrator result and error types.

use std::collections::BTreeMap;
use std::time::Duration;

use thiserror::Error;

use crate::admission::GateStats;

#[derive(Debug, Error)]
pub enum OrchestratorError {
    /// At least one screening is required.
    #[error("at least one screening is required")]
    NoScreenings,

    /// Screening names must be unique.
    #[error("duplicate screening name: {0}")]
    DuplicateScreening(String),

    /// Capacities must be positive.
    #[error("screening '{0}' must have a positive capacity")]
    ZeroCapacity(String),

    /// The admission gate needs at least one slot.
    #[error("max_concurrency must be greater than zero")]
    ZeroConcurrency,

    /// A run needs at least one patron per screening.
    #[error("users_per_screening must be greater than zero")]
    ZeroUsers,

    /// A booking task panicked.
    #[error("booking task failed: {0}")]
    TaskFailure(String),
}

/// Booked/rejected tallies from one screening's ledger.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScreeningTally {
    pub booked: usize,
    pub rejected: usize,
}

/// Per-screening accounting for one simulation run.
///
/// Every scheduled patron lands in exactly one bucket.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScreeningReport {
    pub booked: usize,
    pub rejected: usize,
    pub canceled: usize,
}

impl ScreeningReport {
    pub fn attempts(&self) -> usize {
        self.booked + self.rejected + self.canceled
    }
}

/// Aggregated outcome of `run_simulation`.
#[derive(Debug, Clone, Default)]
pub struct SimulationReport {
    pub screenings: BTreeMap<String, ScreeningReport>,
    pub elapsed: Duration,
}

impl SimulationReport {
    pub fn total_attempts(&self) -> usize {
        self.screenings.values().map(|r| r.attempts()).sum()
    }

    pub fn total_booked(&self) -> usize {
        self.screenings.values().map(|r| r.booked).sum()
    }

    pub fn total_rejected(&self) -> usize {
        self.screenings.values().map(|r| r.rejected).sum()
    }

    pub fn total_canceled(&self) -> usize {
        self.screenings.values().map(|r| r.canceled).sum()
    }
}

/// Point-in-time orchestrator state.
#[derive(Debug, Clone)]
pub struct OrchestratorStatus {
    pub gate: GateStats,
    /// Seats still unassigned, by screening.
    pub seats_remaining: BTreeMap<String, usize>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_totals_sum_over_screenings() {
        let mut report = SimulationReport::default();
        report.screenings.insert(
            "Inception".to_string(),
            ScreeningReport {
                booked: 150,
                rejected: 60,
                canceled: 0,
            },
        );
        report.screenings.insert(
            "Tenet".to_string(),
            ScreeningReport {
                booked: 20,
                rejected: 70,
                canceled: 10,
            },
        );

        assert_eq!(report.total_booked(), 170);
        assert_eq!(report.total_rejected(), 130);
        assert_eq!(report.total_canceled(), 10);
        assert_eq!(report.total_attempts(), 310);
    }
}
