//! Social network: the informal, undirected interaction graph.
//!
//! Nodes are every participant id `0..n`, the AI included. Two generators
//! are provided:
//!
//! - [`build_small_world`] -- Watts-Strogatz: a ring lattice where each node
//!   links to its `k / 2` nearest neighbors on either side, then each
//!   lattice edge `(u, v)` is rewired to `(u, w)` with probability `p`.
//! - [`build_scale_free`] -- Barabasi-Albert: a clique of `m + 1` seed
//!   nodes, then each new node attaches to `m` distinct existing nodes
//!   drawn with probability proportional to their degree.
//!
//! The graph stays mutable after generation; see [`crate::rewire`].

use petgraph::graphmap::UnGraphMap;
use petgraph::visit::Bfs;
use rand::Rng;
use rand::seq::IndexedRandom;
use tracing::debug;

use orgsim_types::{AgentId, GraphSnapshot};

use crate::error::NetworkError;
use crate::rewire;
use crate::snapshot::{average_degree_centrality, snapshot_of};

// ---------------------------------------------------------------------------
// SocialNetwork
// ---------------------------------------------------------------------------

/// Undirected social graph over all participant ids.
#[derive(Debug, Clone, Default)]
pub struct SocialNetwork {
    graph: UnGraphMap<AgentId, ()>,
}

impl SocialNetwork {
    /// Create a network with `n` isolated nodes `0..n`.
    ///
    /// # Errors
    ///
    /// Returns [`NetworkError::TooManyNodes`] if `n` exceeds the id range.
    pub fn with_nodes(n: usize) -> Result<Self, NetworkError> {
        let mut graph = UnGraphMap::with_capacity(n, 0);
        for index in 0..n {
            let id = AgentId::from_index(index)
                .ok_or(NetworkError::TooManyNodes { requested: n })?;
            graph.add_node(id);
        }
        Ok(Self { graph })
    }

    /// Whether the id is a node of the network.
    pub fn contains(&self, id: AgentId) -> bool {
        self.graph.contains_node(id)
    }

    /// All neighbors of a node, in adjacency order.
    ///
    /// Returns an empty list for unknown ids.
    pub fn neighbors(&self, id: AgentId) -> Vec<AgentId> {
        if !self.graph.contains_node(id) {
            return Vec::new();
        }
        self.graph.neighbors(id).collect()
    }

    /// Degree of a node (0 for unknown ids).
    pub fn degree(&self, id: AgentId) -> usize {
        if !self.graph.contains_node(id) {
            return 0;
        }
        self.graph.neighbors(id).count()
    }

    /// Whether the undirected edge `{a, b}` exists.
    pub fn contains_edge(&self, a: AgentId, b: AgentId) -> bool {
        self.graph.contains_edge(a, b)
    }

    /// Number of nodes.
    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    /// Number of edges.
    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Whether every node is reachable from every other node.
    pub fn is_connected(&self) -> bool {
        let Some(start) = self.graph.nodes().next() else {
            return true;
        };
        let mut bfs = Bfs::new(&self.graph, start);
        let mut reached: usize = 0;
        while bfs.next(&self.graph).is_some() {
            reached = reached.saturating_add(1);
        }
        reached == self.graph.node_count()
    }

    /// Mean degree centrality of all nodes.
    pub fn average_degree_centrality(&self) -> f64 {
        average_degree_centrality(&self.graph)
    }

    /// Add up to `count` random absent edges. Returns how many were added.
    pub fn add_random_edges<R: Rng>(&mut self, count: usize, rng: &mut R) -> usize {
        rewire::add_random_edges(&mut self.graph, count, rng)
    }

    /// Remove up to `count` random existing edges. Returns how many were removed.
    pub fn remove_random_edges<R: Rng>(&mut self, count: usize, rng: &mut R) -> usize {
        rewire::remove_random_edges(&mut self.graph, count, rng)
    }

    /// Read access to the underlying graph.
    pub const fn graph(&self) -> &UnGraphMap<AgentId, ()> {
        &self.graph
    }

    /// Copy the structure out for a visualization collaborator.
    pub fn snapshot(&self) -> GraphSnapshot {
        snapshot_of(&self.graph)
    }

    /// Insert an edge between two existing ids.
    fn link(&mut self, a: AgentId, b: AgentId) {
        self.graph.add_edge(a, b, ());
    }

    /// Remove an edge if present.
    fn unlink(&mut self, a: AgentId, b: AgentId) {
        self.graph.remove_edge(a, b);
    }
}

// ---------------------------------------------------------------------------
// Small world
// ---------------------------------------------------------------------------

/// Build a Watts-Strogatz small-world network on `n` nodes.
///
/// Each node is joined to its `k / 2` nearest ring neighbors on each side
/// (odd `k` rounds down). Then, for each lattice offset `j` in `1..=k/2`
/// and each node `u` in order, the edge `(u, u + j)` is replaced with
/// probability `p` by `(u, w)` for a uniformly drawn `w` that is neither
/// `u` nor already adjacent to `u`. If `u` is already adjacent to every
/// other node the edge is left in place. `k == n` yields the complete graph.
///
/// # Errors
///
/// Returns [`NetworkError::InvalidParameter`] if `k > n` or `p` is not a
/// probability, or [`NetworkError::TooManyNodes`] if `n` exceeds the id range.
pub fn build_small_world<R: Rng>(
    n: usize,
    k: usize,
    p: f64,
    rng: &mut R,
) -> Result<SocialNetwork, NetworkError> {
    if k > n {
        return Err(NetworkError::InvalidParameter {
            parameter: "k",
            reason: format!("k ({k}) must not exceed the node count ({n})"),
        });
    }
    if !(0.0..=1.0).contains(&p) {
        return Err(NetworkError::InvalidParameter {
            parameter: "p",
            reason: format!("rewiring probability {p} is outside [0, 1]"),
        });
    }

    let mut network = SocialNetwork::with_nodes(n)?;
    let nodes: Vec<AgentId> = network.graph.nodes().collect();

    if k == n {
        for (i, &a) in nodes.iter().enumerate() {
            for &b in nodes.iter().skip(i.saturating_add(1)) {
                network.link(a, b);
            }
        }
        return Ok(network);
    }

    let half = k / 2;
    let ring_pairs = |offset: usize| {
        nodes
            .iter()
            .zip(nodes.iter().cycle().skip(offset))
            .map(|(&u, &v)| (u, v))
            .collect::<Vec<_>>()
    };

    for offset in 1..=half {
        for (u, v) in ring_pairs(offset) {
            network.link(u, v);
        }
    }

    let max_degree = n.saturating_sub(1);
    for offset in 1..=half {
        for (u, v) in ring_pairs(offset) {
            if rng.random::<f64>() >= p {
                continue;
            }
            let Some(mut w) = nodes.choose(&mut *rng).copied() else {
                continue;
            };
            let mut saturated = false;
            while w == u || network.contains_edge(u, w) {
                if let Some(&next) = nodes.choose(&mut *rng) {
                    w = next;
                }
                if network.degree(u) >= max_degree {
                    saturated = true;
                    break;
                }
            }
            if !saturated {
                network.unlink(u, v);
                network.link(u, w);
            }
        }
    }

    debug!(
        nodes = network.node_count(),
        edges = network.edge_count(),
        k,
        p,
        "Small-world network built"
    );
    Ok(network)
}

// ---------------------------------------------------------------------------
// Scale free
// ---------------------------------------------------------------------------

/// Build a Barabasi-Albert scale-free network on `n` nodes.
///
/// Starts from a clique on nodes `0..=m`. Each later node `s` draws `m`
/// distinct targets from a pool in which every existing node appears once
/// per incident edge end, links to all of them, and then enters the pool
/// itself `m` times.
///
/// # Errors
///
/// Returns [`NetworkError::InvalidParameter`] unless `1 <= m < n`, or
/// [`NetworkError::TooManyNodes`] if `n` exceeds the id range.
pub fn build_scale_free<R: Rng>(
    n: usize,
    m: usize,
    rng: &mut R,
) -> Result<SocialNetwork, NetworkError> {
    if m < 1 || m >= n {
        return Err(NetworkError::InvalidParameter {
            parameter: "m",
            reason: format!("m ({m}) must satisfy 1 <= m < n ({n})"),
        });
    }

    let mut network = SocialNetwork::with_nodes(n)?;
    let nodes: Vec<AgentId> = network.graph.nodes().collect();
    let (seed, growth) = nodes.split_at(m.saturating_add(1).min(nodes.len()));

    // Degree-weighted pool: each seed node has degree m in the clique.
    let mut pool: Vec<AgentId> = Vec::with_capacity(n.saturating_mul(m).saturating_mul(2));
    for (i, &a) in seed.iter().enumerate() {
        for &b in seed.iter().skip(i.saturating_add(1)) {
            network.link(a, b);
        }
        pool.extend(std::iter::repeat_n(a, m));
    }

    for &source in growth {
        let mut targets: Vec<AgentId> = Vec::with_capacity(m);
        while targets.len() < m {
            match pool.choose(&mut *rng) {
                Some(&candidate) if !targets.contains(&candidate) => targets.push(candidate),
                Some(_) => {}
                None => break,
            }
        }
        for &target in &targets {
            network.link(source, target);
        }
        pool.extend_from_slice(&targets);
        pool.extend(std::iter::repeat_n(source, m));
    }

    debug!(
        nodes = network.node_count(),
        edges = network.edge_count(),
        m,
        "Scale-free network built"
    );
    Ok(network)
}
