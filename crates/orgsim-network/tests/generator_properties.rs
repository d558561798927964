//! Property-based tests for the topology generators and edge rewiring.

#![allow(clippy::unwrap_used, clippy::arithmetic_side_effects)]

use orgsim_network::{
    OrgNetwork, SocialNetwork, build_hierarchy, build_onion, build_scale_free, build_small_world,
    hierarchy_size,
};
use orgsim_types::AgentId;
use proptest::prelude::*;
use rand::SeedableRng;
use rand::rngs::SmallRng;

fn geometric_sum(depth: u32, branching: u32) -> usize {
    let branching = usize::try_from(branching).unwrap();
    (0..depth).map(|i| branching.pow(i)).sum()
}

fn assert_single_manager(org: &OrgNetwork) {
    let root = org.root().unwrap();
    assert!(org.predecessors(root).is_empty());
    for level in org.levels().iter().skip(1) {
        for &node in level {
            assert_eq!(org.predecessors(node).len(), 1);
        }
    }
}

fn assert_simple(net: &SocialNetwork) {
    let mut seen = std::collections::BTreeSet::new();
    for (a, b, ()) in net.graph().all_edges() {
        assert_ne!(a, b, "self-loop on {a}");
        let key = if a < b { (a, b) } else { (b, a) };
        assert!(seen.insert(key), "duplicate edge {a}-{b}");
    }
}

proptest! {
    #[test]
    fn hierarchy_size_is_geometric(depth in 1_u32..6, branching in 0_u32..5) {
        let org = build_hierarchy(depth, branching).unwrap();
        prop_assert_eq!(org.node_count(), geometric_sum(depth, branching));
        prop_assert_eq!(hierarchy_size(depth, branching), Some(org.node_count()));
        prop_assert_eq!(org.edge_count(), org.node_count().saturating_sub(1));
        assert_single_manager(&org);
    }

    #[test]
    fn onion_extends_the_plain_tree(depth in 1_u32..6, branching in 1_u32..5, seed in any::<u64>()) {
        let mut rng = SmallRng::seed_from_u64(seed);
        let onion = build_onion(depth, branching, &mut rng).unwrap();
        let tree = build_hierarchy(depth, branching).unwrap();
        prop_assert_eq!(onion.node_count(), tree.node_count());
        for (from, to, ()) in tree.graph().all_edges() {
            prop_assert!(onion.contains_edge(from, to));
        }
        for (from, to, ()) in onion.graph().all_edges() {
            if !tree.contains_edge(from, to) {
                let from_level = onion.level_of(from).unwrap();
                let to_level = onion.level_of(to).unwrap();
                prop_assert_eq!(to_level + 1, from_level);
            }
        }
    }

    #[test]
    fn small_world_node_and_edge_counts(n in 5_usize..80, half_k in 1_usize..3, p in 0.0_f64..=1.0, seed in any::<u64>()) {
        let k = half_k * 2;
        prop_assume!(k < n);
        let mut rng = SmallRng::seed_from_u64(seed);
        let net = build_small_world(n, k, p, &mut rng).unwrap();
        prop_assert_eq!(net.node_count(), n);
        prop_assert_eq!(net.edge_count(), n * half_k);
        assert_simple(&net);
    }

    #[test]
    fn scale_free_is_connected(n in 3_usize..120, m in 1_usize..4, seed in any::<u64>()) {
        prop_assume!(m < n);
        let mut rng = SmallRng::seed_from_u64(seed);
        let net = build_scale_free(n, m, &mut rng).unwrap();
        prop_assert_eq!(net.node_count(), n);
        prop_assert!(net.is_connected());
        assert_simple(&net);
    }

    #[test]
    fn rewiring_never_overshoots(count in 0_usize..400, seed in any::<u64>()) {
        let mut rng = SmallRng::seed_from_u64(seed);
        let mut net = build_small_world(20, 4, 0.2, &mut rng).unwrap();
        let before = net.edge_count();
        let max_edges = 20 * 19 / 2;

        let added = net.add_random_edges(count, &mut rng);
        prop_assert_eq!(added, count.min(max_edges - before));
        prop_assert_eq!(net.edge_count(), before + added);
        assert_simple(&net);

        let existing = net.edge_count();
        let removed = net.remove_random_edges(count, &mut rng);
        prop_assert_eq!(removed, count.min(existing));
        prop_assert_eq!(net.edge_count(), existing - removed);
        prop_assert_eq!(net.node_count(), 20);
    }
}

#[test]
fn ai_node_is_part_of_the_social_graph() {
    let employees = 100_usize;
    let mut rng = SmallRng::seed_from_u64(42);
    let net = build_small_world(employees + 1, 4, 0.1, &mut rng).unwrap();
    assert!(net.contains(AgentId::from_index(employees).unwrap()));
}
