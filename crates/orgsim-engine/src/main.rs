//! Command-line runner for the knowledge diffusion simulation.
//!
//! Loads configuration, builds the simulation, exports the initial network
//! snapshots, runs the configured number of steps, and saves the metrics.
//!
//! # Startup Sequence
//!
//! 1. Load configuration from `orgsim-config.yaml` (defaults if absent)
//! 2. Initialize structured logging (tracing)
//! 3. Build the simulation (networks, employees, AI)
//! 4. Write `networks.json` when `output.export_networks` is set
//! 5. Run the simulation loop
//! 6. Write `results.csv` and `results.json`

mod error;
mod output;

use std::path::Path;

use chrono::Utc;
use orgsim_core::config::LoggingConfig;
use orgsim_core::{
    NoOpCallback, Simulation, SimulationConfig, log_simulation_end, run_simulation,
};
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::error::EngineError;
use crate::output::{OutputDirectory, RunReport};

/// Configuration file looked up in the working directory.
const CONFIG_FILE: &str = "orgsim-config.yaml";

/// Application entry point.
///
/// # Errors
///
/// Returns an error if configuration, setup, or writing results fails.
fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 1. Load configuration.
    let (config, from_file) = load_config()?;

    // 2. Initialize structured logging.
    init_logging(&config.logging);
    info!("orgsim-engine starting");
    if from_file {
        info!(path = CONFIG_FILE, "Configuration loaded");
    } else {
        info!("Config file not found, using defaults");
    }

    // 3. Build the simulation.
    let started_at = Utc::now();
    let steps = config.run.steps;
    let output_dir = config.output.directory.clone();
    let export_networks = config.output.export_networks;
    let mut simulation = Simulation::new(config).map_err(EngineError::from)?;

    // 4. Export the initial networks.
    let output = OutputDirectory::create(output_dir)?;
    if export_networks {
        output.write_networks(&simulation.snapshot())?;
    }

    // 5. Run.
    let result = run_simulation(&mut simulation, steps, &mut NoOpCallback);
    log_simulation_end(&result);

    // 6. Save results.
    let report = RunReport {
        seed: result.seed,
        steps: result.total_steps,
        started_at,
        finished_at: Utc::now(),
    };
    output.write_results(&report, &result.series)?;

    info!(
        seed = report.seed,
        output = %output.path().display(),
        "Simulation completed"
    );
    Ok(())
}

/// Install the global tracing subscriber.
///
/// `RUST_LOG` takes precedence over the configured level.
fn init_logging(logging: &LoggingConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&logging.level));
    if logging.json {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .with_target(true)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(true)
            .init();
    }
}

/// Load configuration from `orgsim-config.yaml` if present.
///
/// Returns the configuration and whether it came from the file. Without a
/// file, defaults are used and environment overrides still apply.
fn load_config() -> Result<(SimulationConfig, bool), EngineError> {
    let config_path = Path::new(CONFIG_FILE);
    if config_path.exists() {
        let config = SimulationConfig::from_file(config_path)?;
        Ok((config, true))
    } else {
        let mut config = SimulationConfig::default();
        config.apply_env_overrides()?;
        config.validate()?;
        Ok((config, false))
    }
}
