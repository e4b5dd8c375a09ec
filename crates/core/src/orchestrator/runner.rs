//! Booking orchestrator implementation.
//!
//! Drives the whole simulation: one booking service per screening, one
//! global admission gate, one shared cancellation token. Each (screening,
//! patron) pair becomes an independent task whose flow is always
//! delay -> gate -> screening lock.

use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Instant;

use futures::future::join_all;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::admission::AdmissionGate;
use crate::booking::{BookingOutcome, BookingService, Patron, Screening};
use crate::config::Config;
use crate::latency::{LatencySimulator, NoLatency, UniformLatency};
use crate::metrics;

use super::types::{
    OrchestratorError, OrchestratorStatus, ScreeningReport, ScreeningTally, SimulationReport,
};

/// The booking orchestrator - owns the services, the gate, and the shared
/// cancellation token.
pub struct BookingOrchestrator {
    services: BTreeMap<String, Arc<BookingService>>,
    gate: AdmissionGate,
    cancel: CancellationToken,
}

impl BookingOrchestrator {
    /// Create an orchestrator for the given screenings.
    ///
    /// Precondition violations (empty screening list, duplicate names,
    /// zero capacities or concurrency) are construction-time errors, not
    /// runtime outcomes.
    pub fn new(
        screenings: Vec<Screening>,
        max_concurrency: usize,
        latency: Arc<dyn LatencySimulator>,
    ) -> Result<Self, OrchestratorError> {
        if screenings.is_empty() {
            return Err(OrchestratorError::NoScreenings);
        }
        if max_concurrency == 0 {
            return Err(OrchestratorError::ZeroConcurrency);
        }

        let mut services = BTreeMap::new();
        for screening in screenings {
            if screening.capacity == 0 {
                return Err(OrchestratorError::ZeroCapacity(screening.name));
            }
            let name = screening.name.clone();
            let service = Arc::new(BookingService::new(screening, Arc::clone(&latency)));
            if services.insert(name.clone(), service).is_some() {
                return Err(OrchestratorError::DuplicateScreening(name));
            }
        }

        Ok(Self {
            services,
            gate: AdmissionGate::new(max_concurrency),
            cancel: CancellationToken::new(),
        })
    }

    /// Build an orchestrator from a loaded configuration.
    pub fn from_config(config: &Config) -> Result<Self, OrchestratorError> {
        let screenings = config
            .screenings
            .iter()
            .map(|s| Screening::new(s.name.clone(), s.capacity))
            .collect();

        let sim = &config.simulation;
        let latency: Arc<dyn LatencySimulator> = if sim.latency_max_ms == 0 {
            Arc::new(NoLatency)
        } else {
            Arc::new(UniformLatency::new(sim.latency_min_ms, sim.latency_max_ms))
        };

        Self::new(screenings, sim.max_concurrency, latency)
    }

    /// The booking service for one screening, if it exists.
    pub fn service(&self, name: &str) -> Option<&Arc<BookingService>> {
        self.services.get(name)
    }

    /// The shared admission gate.
    pub fn gate(&self) -> &AdmissionGate {
        &self.gate
    }

    /// Run `users_per_screening` concurrent booking attempts against every
    /// screening and wait for all of them to finish.
    ///
    /// Rejected and canceled attempts are ordinary results; the run only
    /// fails on misuse or a panicked task. The returned report accounts
    /// for every scheduled patron exactly once.
    pub async fn run_simulation(
        &self,
        users_per_screening: u32,
    ) -> Result<SimulationReport, OrchestratorError> {
        if users_per_screening == 0 {
            return Err(OrchestratorError::ZeroUsers);
        }

        let started = Instant::now();
        info!(
            "starting simulation: {} screenings x {} patrons, {} admission slots",
            self.services.len(),
            users_per_screening,
            self.gate.max_concurrency()
        );

        let mut handles = Vec::with_capacity(self.services.len() * users_per_screening as usize);
        for service in self.services.values() {
            for i in 1..=users_per_screening {
                let service = Arc::clone(service);
                let gate = self.gate.clone();
                let cancel = self.cancel.clone();
                let patron = Patron::new(u64::from(i), format!("{}_patron_{}", service.name(), i));

                handles.push(tokio::spawn(async move {
                    let outcome = match gate.acquire(&cancel).await {
                        Ok(_permit) => service.attempt_booking(&patron, &cancel).await,
                        Err(_) => BookingOutcome::Canceled,
                    };
                    if outcome == BookingOutcome::Canceled {
                        metrics::BOOKINGS_CANCELED.inc();
                        debug!(
                            "[patron {}] booking canceled for {}",
                            patron.id,
                            service.name()
                        );
                    }
                    (service.name().to_string(), outcome)
                }));
            }
        }

        let mut report = SimulationReport::default();
        for name in self.services.keys() {
            report
                .screenings
                .insert(name.clone(), ScreeningReport::default());
        }

        let mut first_failure = None;
        for joined in join_all(handles).await {
            match joined {
                Ok((name, outcome)) => {
                    let entry = report.screenings.entry(name).or_default();
                    match outcome {
                        BookingOutcome::Booked(_) => entry.booked += 1,
                        BookingOutcome::Rejected => entry.rejected += 1,
                        BookingOutcome::Canceled => entry.canceled += 1,
                    }
                }
                Err(e) => {
                    warn!("booking task failed: {}", e);
                    if first_failure.is_none() {
                        first_failure = Some(e.to_string());
                    }
                }
            }
        }

        if let Some(failure) = first_failure {
            return Err(OrchestratorError::TaskFailure(failure));
        }

        report.elapsed = started.elapsed();
        info!(
            "simulation finished in {:?}: {} booked, {} rejected, {} canceled",
            report.elapsed,
            report.total_booked(),
            report.total_rejected(),
            report.total_canceled()
        );
        Ok(report)
    }

    /// Signal every outstanding and future attempt to stop.
    ///
    /// Idempotent; committed bookings are never rolled back.
    pub fn request_stop(&self) {
        if !self.cancel.is_cancelled() {
            info!("stop requested, cancelling outstanding booking attempts");
        }
        self.cancel.cancel();
    }

    /// Tally each screening's ledger.
    ///
    /// Reflects a point-in-time snapshot; calling it during a run is safe
    /// but not guaranteed final.
    pub async fn summarize(&self) -> BTreeMap<String, ScreeningTally> {
        let mut tallies = BTreeMap::new();
        for (name, service) in &self.services {
            let snapshot = service.ledger_snapshot().await;
            let booked = snapshot.iter().filter(|r| r.is_booked()).count();
            tallies.insert(
                name.clone(),
                ScreeningTally {
                    booked,
                    rejected: snapshot.len() - booked,
                },
            );
        }
        tallies
    }

    /// Current gate occupancy and per-screening availability.
    pub async fn status(&self) -> OrchestratorStatus {
        let mut seats_remaining = BTreeMap::new();
        for (name, service) in &self.services {
            seats_remaining.insert(name.clone(), service.seats_remaining().await);
        }
        OrchestratorStatus {
            gate: self.gate.stats(),
            seats_remaining,
        }
    }
}
