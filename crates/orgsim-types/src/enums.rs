//! Enumeration types for the simulation.
//!
//! Roles and attitudes are closed sets so that every transition table over
//! them is an exhaustive `match`. Topology kinds are closed too; string
//! input (YAML, environment overrides) is parsed through [`core::str::FromStr`]
//! and anything unrecognised is rejected.

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Role
// ---------------------------------------------------------------------------

/// Position of an employee in the organization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Root of the hierarchy. Exactly one per organization.
    Ceo,
    /// People manager.
    Manager,
    /// Individual contributor with deep expertise.
    Specialist,
    /// General staff.
    Staff,
}

impl core::fmt::Display for Role {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Ceo => write!(f, "CEO"),
            Self::Manager => write!(f, "Manager"),
            Self::Specialist => write!(f, "Specialist"),
            Self::Staff => write!(f, "Staff"),
        }
    }
}

// ---------------------------------------------------------------------------
// Attitude
// ---------------------------------------------------------------------------

/// An employee's stance toward using the generative-AI service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Attitude {
    /// Absorbs the full AI contribution.
    Positive,
    /// Absorbs half of the AI contribution.
    Neutral,
    /// Absorbs a fifth of the AI contribution.
    Negative,
}

impl core::fmt::Display for Attitude {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Positive => write!(f, "positive"),
            Self::Neutral => write!(f, "neutral"),
            Self::Negative => write!(f, "negative"),
        }
    }
}

// ---------------------------------------------------------------------------
// Topology kinds
// ---------------------------------------------------------------------------

/// Error returned when a topology kind string is not recognised.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unsupported {kind} topology: {value:?}")]
pub struct ParseTopologyError {
    /// Which network the value was meant for (`organizational` or `social`).
    pub kind: &'static str,
    /// The rejected input.
    pub value: String,
}

/// Construction used for the organizational (reporting) network.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrgTopology {
    /// Plain tree: every manager points to `branching` direct reports.
    Hierarchical,
    /// Tree plus probabilistic lateral links back into the previous level.
    Onion,
}

impl core::fmt::Display for OrgTopology {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Hierarchical => f.write_str("hierarchical"),
            Self::Onion => f.write_str("onion"),
        }
    }
}

impl core::str::FromStr for OrgTopology {
    type Err = ParseTopologyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "hierarchical" => Ok(Self::Hierarchical),
            "onion" => Ok(Self::Onion),
            _ => Err(ParseTopologyError {
                kind: "organizational",
                value: s.to_owned(),
            }),
        }
    }
}

/// Construction used for the informal social network.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SocialTopology {
    /// Watts-Strogatz ring lattice with random rewiring.
    SmallWorld,
    /// Barabasi-Albert preferential attachment.
    ScaleFree,
}

impl core::fmt::Display for SocialTopology {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::SmallWorld => f.write_str("small_world"),
            Self::ScaleFree => f.write_str("scale_free"),
        }
    }
}

impl core::str::FromStr for SocialTopology {
    type Err = ParseTopologyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "small_world" => Ok(Self::SmallWorld),
            "scale_free" => Ok(Self::ScaleFree),
            _ => Err(ParseTopologyError {
                kind: "social",
                value: s.to_owned(),
            }),
        }
    }
}

// ---------------------------------------------------------------------------
// Step outcomes
// ---------------------------------------------------------------------------

/// What the AI's end-of-step evolution check did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EvolutionOutcome {
    /// Usage exceeded the evolution threshold; contribution went up.
    Evolved,
    /// Usage fell below the decrement threshold; contribution went down
    /// (possibly clamped at the floor).
    Diminished,
    /// Usage was between the thresholds.
    Unchanged,
}

/// A social-network rewiring applied at the end of a step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NetworkMutation {
    /// Random absent edges were added; holds how many.
    Added(usize),
    /// Random existing edges were removed; holds how many.
    Removed(usize),
}
