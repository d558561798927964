//! Participants of the knowledge diffusion simulation.
//!
//! This crate holds the per-agent rules: how employees exchange knowledge
//! with each other and with the AI, how their attitude toward the AI moves,
//! and how the AI adapts its contribution to usage. Nothing here touches a
//! graph; the simulation in `orgsim-core` decides who meets whom.
//!
//! # Modules
//!
//! - [`ai`] -- The AI participant ([`AiAgent`]) and its evolution rule.
//! - [`employee`] -- Employee state ([`Employee`]), interactions, and random
//!   initialization.
//! - [`participant`] -- Resolving a graph node id to an employee or the AI
//!   ([`Participant`]).

pub mod ai;
pub mod employee;
pub mod participant;

// Re-export primary types at crate root for convenience.
pub use ai::{AiAgent, MIN_CONTRIBUTION};
pub use employee::{Employee, absorption_fraction, behavior_modifier};
pub use participant::Participant;
