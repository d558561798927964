//! Shared type definitions for the organizational knowledge diffusion
//! simulation.
//!
//! This crate is the single source of truth for the vocabulary shared by the
//! network, agent, and simulation crates, and for the data handed to
//! reporting collaborators (metrics rows and graph snapshots).
//!
//! # Modules
//!
//! - [`ids`] -- Integer agent identifiers shared by both graphs
//! - [`enums`] -- Closed enumerations (roles, attitudes, topology kinds, step outcomes)
//! - [`structs`] -- Metrics rows, metrics series, and graph snapshots

pub mod enums;
pub mod ids;
pub mod structs;

// Re-export all public types at crate root for convenience.
pub use enums::{
    Attitude, EvolutionOutcome, NetworkMutation, OrgTopology, ParseTopologyError, Role,
    SocialTopology,
};
pub use ids::AgentId;
pub use structs::{AttitudeCounts, GraphSnapshot, MetricsSeries, NetworkSnapshot, StepMetrics};
