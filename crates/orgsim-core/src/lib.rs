//! Configuration, step protocol, and run loop for the knowledge diffusion
//! simulation.
//!
//! This crate owns the [`Simulation`] object and the per-step protocol that
//! drives it: employee interactions, AI evolution, social network rewiring,
//! and metrics collection.
//!
//! # Modules
//!
//! - [`config`] -- Configuration loading from `orgsim-config.yaml` into
//!   strongly-typed structs.
//! - [`runner`] -- Bounded run loop with a per-step callback.
//! - [`simulation`] -- The [`Simulation`] object and its construction.
//! - [`step`] -- The four-phase step protocol.

pub mod config;
pub mod runner;
pub mod simulation;
pub mod step;

// Re-export primary types at crate root for convenience.
pub use config::{ConfigError, SimulationConfig};
pub use runner::{NoOpCallback, SimulationResult, StepCallback, log_simulation_end, run_simulation};
pub use simulation::{Simulation, SimulationError};
pub use step::{StepSummary, run_step};
