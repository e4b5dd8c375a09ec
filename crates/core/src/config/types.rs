use serde::{Deserialize, Serialize};

/// Root configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    pub screenings: Vec<ScreeningConfig>,
    #[serde(default)]
    pub simulation: SimulationConfig,
}

/// One screening entry
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ScreeningConfig {
    pub name: String,
    pub capacity: u32,
}

/// Simulation tuning
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SimulationConfig {
    #[serde(default = "default_users_per_screening")]
    pub users_per_screening: u32,
    #[serde(default = "default_max_concurrency")]
    pub max_concurrency: usize,
    /// Simulated external latency range, in milliseconds. A max of 0
    /// disables the delay entirely.
    #[serde(default = "default_latency_min_ms")]
    pub latency_min_ms: u64,
    #[serde(default = "default_latency_max_ms")]
    pub latency_max_ms: u64,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            users_per_screening: default_users_per_screening(),
            max_concurrency: default_max_concurrency(),
            latency_min_ms: default_latency_min_ms(),
            latency_max_ms: default_latency_max_ms(),
        }
    }
}

fn default_users_per_screening() -> u32 {
    210
}

fn default_max_concurrency() -> usize {
    100
}

fn default_latency_min_ms() -> u64 {
    100
}

fn default_latency_max_ms() -> u64 {
    500
}

impl Default for Config {
    /// The built-in scenario used when no config file is present.
    fn default() -> Self {
        Self {
            screenings: vec![
                ScreeningConfig {
                    name: "Oppenheimer".to_string(),
                    capacity: 200,
                },
                ScreeningConfig {
                    name: "Inception".to_string(),
                    capacity: 150,
                },
                ScreeningConfig {
                    name: "Interstellar".to_string(),
                    capacity: 180,
                },
            ],
            simulation: SimulationConfig::default(),
        }
    }
}
