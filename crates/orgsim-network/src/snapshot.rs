//! Read-only graph snapshots and degree centrality.

use petgraph::EdgeType;
use petgraph::graphmap::GraphMap;

use orgsim_types::{AgentId, GraphSnapshot};

/// Copy nodes and edges of a graph map, in insertion order.
pub fn snapshot_of<Ty: EdgeType>(graph: &GraphMap<AgentId, (), Ty>) -> GraphSnapshot {
    GraphSnapshot {
        directed: Ty::is_directed(),
        nodes: graph.nodes().collect(),
        edges: graph.all_edges().map(|(a, b, ())| (a, b)).collect(),
    }
}

/// Mean degree centrality over all nodes.
///
/// A node's degree centrality is its degree divided by `n - 1`. By
/// convention a single-node graph has centrality 1.0 and an empty graph
/// has 0.0.
pub fn average_degree_centrality<Ty: EdgeType>(graph: &GraphMap<AgentId, (), Ty>) -> f64 {
    let n = graph.node_count();
    match n {
        0 => 0.0,
        1 => 1.0,
        _ => {
            // Every edge contributes to the degree of both endpoints.
            let degree_sum = graph.edge_count().saturating_mul(2);
            #[allow(clippy::cast_precision_loss)]
            let (degree_sum, n) = (degree_sum as f64, n as f64);
            degree_sum / (n - 1.0) / n
        }
    }
}
