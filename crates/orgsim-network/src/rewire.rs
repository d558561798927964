//! Random edge addition and removal.
//!
//! Both operations work on any `GraphMap` keyed by [`AgentId`], directed or
//! not. Candidate edges are listed in node insertion order and shuffled
//! with the caller's random source, so a seeded run rewires identically.

use petgraph::EdgeType;
use petgraph::graphmap::GraphMap;
use rand::Rng;
use rand::seq::SliceRandom;

use orgsim_types::AgentId;

/// Add up to `count` edges that are currently absent.
///
/// Candidates are all node pairs without an edge, excluding self-loops. For
/// undirected graphs each unordered pair is listed once; for directed graphs
/// each ordered pair is a separate candidate. If fewer than `count`
/// candidates exist, all of them are added.
///
/// Returns the number of edges added.
pub fn add_random_edges<Ty: EdgeType, R: Rng>(
    graph: &mut GraphMap<AgentId, (), Ty>,
    count: usize,
    rng: &mut R,
) -> usize {
    let nodes: Vec<AgentId> = graph.nodes().collect();
    let mut candidates: Vec<(AgentId, AgentId)> = Vec::new();
    for (i, &u) in nodes.iter().enumerate() {
        for (j, &v) in nodes.iter().enumerate() {
            let listed = if Ty::is_directed() { i != j } else { i < j };
            if listed && !graph.contains_edge(u, v) {
                candidates.push((u, v));
            }
        }
    }

    candidates.shuffle(rng);
    let take = count.min(candidates.len());
    for &(u, v) in candidates.iter().take(take) {
        graph.add_edge(u, v, ());
    }
    take
}

/// Remove up to `count` existing edges, chosen uniformly at random.
///
/// Returns the number of edges removed.
pub fn remove_random_edges<Ty: EdgeType, R: Rng>(
    graph: &mut GraphMap<AgentId, (), Ty>,
    count: usize,
    rng: &mut R,
) -> usize {
    let mut edges: Vec<(AgentId, AgentId)> = graph.all_edges().map(|(a, b, ())| (a, b)).collect();

    edges.shuffle(rng);
    let take = count.min(edges.len());
    for &(a, b) in edges.iter().take(take) {
        graph.remove_edge(a, b);
    }
    take
}
