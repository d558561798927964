//! Network topologies for the knowledge diffusion simulation.
//!
//! Two graphs share the participant id space:
//!
//! - the organizational network, a directed tree of reporting lines
//!   (manager -> direct report), optionally with lateral "onion" links;
//! - the social network, an undirected small-world or scale-free graph over
//!   every participant including the AI.
//!
//! # Modules
//!
//! - [`error`] -- Error types for generator parameters ([`NetworkError`]).
//! - [`organization`] -- [`OrgNetwork`] with the hierarchy and onion builders.
//! - [`social`] -- [`SocialNetwork`] with the small-world and scale-free builders.
//! - [`rewire`] -- Random edge addition and removal on any graph map.
//! - [`snapshot`] -- Read-only snapshots and degree centrality.
//!
//! All builders take the caller's random source so a seeded run draws in a
//! fixed order.

pub mod error;
pub mod organization;
pub mod rewire;
pub mod snapshot;
pub mod social;

// Re-export primary types at crate root.
pub use error::NetworkError;
pub use organization::{OrgNetwork, build_hierarchy, build_onion, hierarchy_size};
pub use rewire::{add_random_edges, remove_random_edges};
pub use snapshot::{average_degree_centrality, snapshot_of};
pub use social::{SocialNetwork, build_scale_free, build_small_world};
