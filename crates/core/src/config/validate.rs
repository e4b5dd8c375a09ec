use std::collections::BTreeSet;

use super::{types::Config, ConfigError};

/// Validate configuration
/// Currently validates:
/// - At least one screening, each with a unique, non-empty name
/// - Every capacity is positive
/// - users_per_screening and max_concurrency are positive
/// - The latency range is well-formed
pub fn validate_config(config: &Config) -> Result<(), ConfigError> {
    if config.screenings.is_empty() {
        return Err(ConfigError::ValidationError(
            "at least one screening must be configured".to_string(),
        ));
    }

    let mut seen = BTreeSet::new();
    for screening in &config.screenings {
        if screening.name.trim().is_empty() {
            return Err(ConfigError::ValidationError(
                "screening name cannot be empty".to_string(),
            ));
        }
        if !seen.insert(screening.name.as_str()) {
            return Err(ConfigError::ValidationError(format!(
                "duplicate screening name: {}",
                screening.name
            )));
        }
        if screening.capacity == 0 {
            return Err(ConfigError::ValidationError(format!(
                "screening '{}' must have a positive capacity",
                screening.name
            )));
        }
    }

    if config.simulation.users_per_screening == 0 {
        return Err(ConfigError::ValidationError(
            "simulation.users_per_screening cannot be 0".to_string(),
        ));
    }
    if config.simulation.max_concurrency == 0 {
        return Err(ConfigError::ValidationError(
            "simulation.max_concurrency cannot be 0".to_string(),
        ));
    }
    if config.simulation.latency_min_ms > config.simulation.latency_max_ms {
        return Err(ConfigError::ValidationError(
            "simulation.latency_min_ms cannot exceed latency_max_ms".to_string(),
        ));
    }

    Ok(())
}
