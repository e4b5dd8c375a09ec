mod report;

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;

use anyhow::{Context, Result};
use prometheus::{Registry, TextEncoder};
use tracing::{debug, error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use boxoffice_core::{load_config, metrics, validate_config, BookingOrchestrator, Config};

/// Application version
const VERSION: &str = env!("CARGO_PKG_VERSION");

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        error!("Fatal error: {}", e);
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("boxoffice {}", VERSION);

    // Determine config path
    let config_path = std::env::var("BOXOFFICE_CONFIG")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("config.toml"));

    // Load configuration, falling back to the built-in scenario
    let config = if config_path.exists() {
        info!("Loading configuration from {:?}", config_path);
        load_config(&config_path)
            .with_context(|| format!("Failed to load config from {:?}", config_path))?
    } else {
        warn!(
            "No config file at {:?}, using the built-in scenario",
            config_path
        );
        Config::default()
    };

    validate_config(&config).context("Configuration validation failed")?;

    info!(
        "Simulating {} screenings, {} patrons each, {} admission slots",
        config.screenings.len(),
        config.simulation.users_per_screening,
        config.simulation.max_concurrency
    );

    // Register metrics
    let registry = Registry::new();
    for metric in metrics::all_metrics() {
        registry
            .register(metric)
            .context("Failed to register metric")?;
    }

    let orchestrator = Arc::new(
        BookingOrchestrator::from_config(&config).context("Failed to build orchestrator")?,
    );

    // Ctrl+C cancels outstanding attempts; committed bookings stay.
    let stopper = Arc::clone(&orchestrator);
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("Interrupt received, stopping simulation");
            stopper.request_stop();
        }
    });

    info!("Starting booking simulation...");
    let started = Instant::now();
    let simulation = orchestrator
        .run_simulation(config.simulation.users_per_screening)
        .await
        .context("Simulation failed")?;

    let summary = orchestrator.summarize().await;
    for line in report::render_summary(&summary, &simulation) {
        info!("{}", line);
    }
    info!(
        "Total booking time: {:.0} ms",
        started.elapsed().as_secs_f64() * 1000.0
    );

    let encoded = TextEncoder::new()
        .encode_to_string(&registry.gather())
        .context("Failed to encode metrics")?;
    debug!("Final metrics:\n{}", encoded);

    Ok(())
}
