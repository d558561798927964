//! Error types for the engine binary.
//!
//! [`EngineError`] wraps every failure mode of startup, the run, and
//! writing results, so `main` can propagate with `?`.

use std::path::PathBuf;

/// Top-level error for the engine binary.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// Configuration loading failed.
    #[error("config error: {source}")]
    Config {
        /// The underlying config error.
        #[from]
        source: orgsim_core::ConfigError,
    },

    /// Simulation setup failed.
    #[error("simulation error: {source}")]
    Simulation {
        /// The underlying simulation error.
        #[from]
        source: orgsim_core::SimulationError,
    },

    /// Writing an output file failed.
    #[error("failed to write {}: {source}", path.display())]
    Output {
        /// The file or directory being written.
        path: PathBuf,
        /// The underlying I/O error.
        source: std::io::Error,
    },

    /// Writing the CSV export failed.
    #[error("csv error: {source}")]
    Csv {
        /// The underlying CSV error.
        #[from]
        source: csv::Error,
    },

    /// Serializing results failed.
    #[error("serialization error: {source}")]
    Serialize {
        /// The underlying JSON error.
        #[from]
        source: serde_json::Error,
    },
}
