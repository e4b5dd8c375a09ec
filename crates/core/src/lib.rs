pub mod admission;
pub mod booking;
pub mod config;
pub mod latency;
pub mod metrics;
pub mod orchestrator;
pub mod testing;

pub use admission::{AdmissionError, AdmissionGate, AdmissionPermit, GateStats};
pub use booking::{
    book_pair, BookingLedger, BookingOutcome, BookingRecord, BookingService, CrossBookingError,
    CrossBookingOutcome, Patron, Screening, SeatNumber, SeatPool,
};
pub use config::{
    load_config, load_config_from_str, validate_config, Config, ConfigError, ScreeningConfig,
    SimulationConfig,
};
pub use latency::{LatencySimulator, NoLatency, UniformLatency};
pub use orchestrator::{
    BookingOrchestrator, OrchestratorError, OrchestratorStatus, ScreeningReport, ScreeningTally,
    SimulationReport,
};
