//! Organizational network: the reporting hierarchy.
//!
//! The hierarchy is grown level by level. Level 0 holds the single root;
//! every node on level `L - 1` gets `branching` children on level `L`. Ids
//! are assigned in breadth-first creation order starting at 0, so a
//! hierarchy of depth `d` holds `1 + b + b^2 + ... + b^(d-1)` nodes.
//!
//! The onion variant adds, after each level is complete, a lateral edge
//! from each new node back to a random node of the previous level with
//! probability [`LATERAL_LINK_PROBABILITY`].

use petgraph::Direction;
use petgraph::graphmap::DiGraphMap;
use rand::Rng;
use rand::seq::IndexedRandom;
use tracing::debug;

use orgsim_types::{AgentId, GraphSnapshot};

use crate::error::NetworkError;
use crate::snapshot::snapshot_of;

/// Chance that a freshly created onion node links back to the previous level.
pub const LATERAL_LINK_PROBABILITY: f64 = 0.3;

// ---------------------------------------------------------------------------
// OrgNetwork
// ---------------------------------------------------------------------------

/// Directed reporting graph with per-node hierarchy levels.
///
/// Edges point from manager to direct report. Onion lateral edges point
/// from a node to a node one level shallower.
#[derive(Debug, Clone)]
pub struct OrgNetwork {
    /// The directed graph.
    graph: DiGraphMap<AgentId, ()>,
    /// Node ids grouped by level; `levels[0]` is the root.
    levels: Vec<Vec<AgentId>>,
}

impl OrgNetwork {
    /// Whether the id is a node of the hierarchy.
    pub fn contains(&self, id: AgentId) -> bool {
        self.graph.contains_node(id)
    }

    /// Outgoing neighbors of a node (direct reports plus any lateral link).
    ///
    /// Returns an empty list for ids that are not in the hierarchy.
    pub fn neighbors(&self, id: AgentId) -> Vec<AgentId> {
        if !self.graph.contains_node(id) {
            return Vec::new();
        }
        self.graph.neighbors_directed(id, Direction::Outgoing).collect()
    }

    /// Incoming neighbors of a node (its manager plus any lateral sources).
    pub fn predecessors(&self, id: AgentId) -> Vec<AgentId> {
        if !self.graph.contains_node(id) {
            return Vec::new();
        }
        self.graph.neighbors_directed(id, Direction::Incoming).collect()
    }

    /// Hierarchy level of a node (0 for the root), if present.
    pub fn level_of(&self, id: AgentId) -> Option<usize> {
        self.levels
            .iter()
            .position(|level| level.binary_search(&id).is_ok())
    }

    /// Node ids grouped by level.
    pub fn levels(&self) -> &[Vec<AgentId>] {
        &self.levels
    }

    /// The root node, if the hierarchy is non-empty.
    pub fn root(&self) -> Option<AgentId> {
        self.levels.first().and_then(|level| level.first()).copied()
    }

    /// Number of nodes.
    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    /// Number of edges (tree edges plus lateral links).
    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Whether the directed edge `from -> to` exists.
    pub fn contains_edge(&self, from: AgentId, to: AgentId) -> bool {
        self.graph.contains_edge(from, to)
    }

    /// Read access to the underlying graph.
    pub const fn graph(&self) -> &DiGraphMap<AgentId, ()> {
        &self.graph
    }

    /// Copy the structure out for a visualization collaborator.
    pub fn snapshot(&self) -> GraphSnapshot {
        snapshot_of(&self.graph)
    }
}

// ---------------------------------------------------------------------------
// Builders
// ---------------------------------------------------------------------------

/// Number of nodes in a hierarchy of the given depth and branching factor.
///
/// Returns `None` on overflow.
pub fn hierarchy_size(depth: u32, branching: u32) -> Option<usize> {
    let branching = usize::try_from(branching).ok()?;
    let mut total: usize = 0;
    let mut level_width: usize = 1;
    for level in 0..depth {
        if level > 0 {
            level_width = level_width.checked_mul(branching)?;
        }
        total = total.checked_add(level_width)?;
    }
    Some(total)
}

/// Build a plain reporting tree.
///
/// # Errors
///
/// Returns [`NetworkError::InvalidParameter`] if `depth` is zero, or
/// [`NetworkError::TooManyNodes`] if the tree does not fit the id range.
pub fn build_hierarchy(depth: u32, branching: u32) -> Result<OrgNetwork, NetworkError> {
    grow(depth, branching, |_, _, _| {})
}

/// Build a reporting tree with probabilistic lateral links.
///
/// After each level is created, every new node independently (with
/// probability [`LATERAL_LINK_PROBABILITY`]) gains one directed edge to a
/// uniformly chosen node of the previous level.
///
/// # Errors
///
/// Same as [`build_hierarchy`].
pub fn build_onion<R: Rng>(
    depth: u32,
    branching: u32,
    rng: &mut R,
) -> Result<OrgNetwork, NetworkError> {
    let network = grow(depth, branching, |graph, previous, current| {
        for &node in current {
            if rng.random::<f64>() < LATERAL_LINK_PROBABILITY {
                if let Some(&lateral) = previous.choose(&mut *rng) {
                    if lateral != node {
                        graph.add_edge(node, lateral, ());
                    }
                }
            }
        }
    })?;
    debug!(
        nodes = network.node_count(),
        edges = network.edge_count(),
        "Onion hierarchy built"
    );
    Ok(network)
}

/// Shared level-by-level growth. `after_level` runs once per completed
/// level with the previous and the new level's ids.
fn grow<F>(depth: u32, branching: u32, mut after_level: F) -> Result<OrgNetwork, NetworkError>
where
    F: FnMut(&mut DiGraphMap<AgentId, ()>, &[AgentId], &[AgentId]),
{
    if depth == 0 {
        return Err(NetworkError::InvalidParameter {
            parameter: "depth",
            reason: "hierarchy needs at least one level".to_owned(),
        });
    }
    let total = hierarchy_size(depth, branching)
        .ok_or(NetworkError::TooManyNodes { requested: usize::MAX })?;
    if AgentId::from_index(total).is_none() {
        return Err(NetworkError::TooManyNodes { requested: total });
    }

    let mut graph = DiGraphMap::with_capacity(total, total.saturating_sub(1));
    let mut next_id: u32 = 0;
    let root = AgentId::new(next_id);
    graph.add_node(root);
    next_id = next_id.saturating_add(1);

    let mut levels = vec![vec![root]];
    for _ in 1..depth {
        let previous = levels.last().cloned().unwrap_or_default();
        let mut current = Vec::new();
        for &manager in &previous {
            for _ in 0..branching {
                let report = AgentId::new(next_id);
                next_id = next_id.saturating_add(1);
                graph.add_node(report);
                graph.add_edge(manager, report, ());
                current.push(report);
            }
        }
        after_level(&mut graph, &previous, &current);
        levels.push(current);
    }

    Ok(OrgNetwork { graph, levels })
}
