//! Metrics rows and graph snapshots handed to reporting collaborators.
//!
//! These types are the only data channel out of the engine: persistence and
//! visualization code consume them and never reach into agent or graph
//! state directly.

use serde::{Deserialize, Serialize};

use crate::enums::Attitude;
use crate::ids::AgentId;

// ---------------------------------------------------------------------------
// Attitude counts
// ---------------------------------------------------------------------------

/// Number of employees holding each AI attitude.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttitudeCounts {
    /// Employees with a positive attitude.
    pub positive: u32,
    /// Employees with a neutral attitude.
    pub neutral: u32,
    /// Employees with a negative attitude.
    pub negative: u32,
}

impl AttitudeCounts {
    /// Tally attitudes from an iterator.
    pub fn tally(attitudes: impl IntoIterator<Item = Attitude>) -> Self {
        let mut counts = Self::default();
        for attitude in attitudes {
            let slot = match attitude {
                Attitude::Positive => &mut counts.positive,
                Attitude::Neutral => &mut counts.neutral,
                Attitude::Negative => &mut counts.negative,
            };
            *slot = slot.saturating_add(1);
        }
        counts
    }

    /// Total number of employees counted.
    pub const fn total(&self) -> u32 {
        self.positive
            .saturating_add(self.neutral)
            .saturating_add(self.negative)
    }
}

// ---------------------------------------------------------------------------
// Step metrics
// ---------------------------------------------------------------------------

/// Aggregate observations recorded at the end of one simulation step.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StepMetrics {
    /// 1-based step index.
    pub step: u64,
    /// Mean knowledge over all employees (the AI is excluded).
    pub average_knowledge: f64,
    /// Employees per AI-attitude category.
    pub attitudes: AttitudeCounts,
    /// The AI's knowledge contribution after this step's evolution check.
    pub ai_contribution: f64,
    /// Mean degree centrality of the social network.
    pub network_centrality: f64,
}

// ---------------------------------------------------------------------------
// Metrics series
// ---------------------------------------------------------------------------

/// Ordered sequence of [`StepMetrics`], one per completed step.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MetricsSeries {
    rows: Vec<StepMetrics>,
}

impl MetricsSeries {
    /// Create an empty series.
    pub const fn new() -> Self {
        Self { rows: Vec::new() }
    }

    /// Append the metrics of a completed step.
    pub fn push(&mut self, metrics: StepMetrics) {
        self.rows.push(metrics);
    }

    /// Number of recorded steps.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether no step has been recorded yet.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// All recorded rows in step order.
    pub fn rows(&self) -> &[StepMetrics] {
        &self.rows
    }
}

impl FromIterator<StepMetrics> for MetricsSeries {
    fn from_iter<I: IntoIterator<Item = StepMetrics>>(iter: I) -> Self {
        Self {
            rows: iter.into_iter().collect(),
        }
    }
}

// ---------------------------------------------------------------------------
// Graph snapshots
// ---------------------------------------------------------------------------

/// Read-only copy of one network's structure.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphSnapshot {
    /// Whether `edges` are ordered `(source, target)` pairs.
    pub directed: bool,
    /// All node ids in insertion order.
    pub nodes: Vec<AgentId>,
    /// All edges in insertion order.
    pub edges: Vec<(AgentId, AgentId)>,
}

impl GraphSnapshot {
    /// Number of nodes.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Number of edges.
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }
}

/// Snapshot of both networks, taken together.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetworkSnapshot {
    /// The directed reporting hierarchy.
    pub organization: GraphSnapshot,
    /// The undirected informal network, including the AI node.
    pub social: GraphSnapshot,
}
