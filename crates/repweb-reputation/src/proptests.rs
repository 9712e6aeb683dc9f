//! Property-based tests for the trust graph.
//!
//! These tests verify graph invariants over random edge sets:
//!
//! - Edge symmetry between truster and trustee sets
//! - Duplicate additions leave every score unchanged
//! - Cached scores always agree with a fresh recomputation
//! - Larger decay factors never lower a score
//! - Top trusters are sorted and correctly sized

use proptest::prelude::*;

use crate::{GraphParams, TrustGraph};

const MAX_NODE: u8 = 12;

fn edge() -> impl Strategy<Value = (u8, u8)> {
    (0..MAX_NODE, 0..MAX_NODE)
}

fn build(params: GraphParams, edges: &[(u8, u8)]) -> TrustGraph<u8> {
    let mut graph = TrustGraph::new(params);
    for (from, to) in edges {
        graph.add_trust(from, to);
    }
    graph
}

/// Score every identity once, then rebuild from scratch and compare.
fn assert_scores_fresh(graph: &mut TrustGraph<u8>, params: GraphParams) -> Result<(), TestCaseError> {
    let edges: Vec<(u8, u8)> = graph.edges().map(|(a, b)| (*a, *b)).collect();
    let mut fresh = build(params, &edges);
    for id in 0..MAX_NODE {
        let cached = graph.get_reputation(&id);
        let expected = fresh.get_reputation(&id);
        prop_assert!((cached - expected).abs() < 1e-9, "node {} cached {} expected {}", id, cached, expected);
    }
    Ok(())
}

// ==================== Structural Property Tests ====================

proptest! {
    /// trust_exists(a, b) holds exactly when b is a trustee of a and a a truster of b.
    #[test]
    fn edges_are_symmetric(edges in prop::collection::vec(edge(), 0..40)) {
        let graph = build(GraphParams::default(), &edges);
        for a in 0..MAX_NODE {
            for b in 0..MAX_NODE {
                let exists = graph.trust_exists(&a, &b);
                prop_assert_eq!(exists, graph.get_trustees(&a).contains(&b));
                prop_assert_eq!(exists, graph.get_trusters(&b).contains(&a));
            }
        }
    }

    /// Adding the same edge twice is indistinguishable from adding it once.
    #[test]
    fn duplicate_add_is_idempotent(
        edges in prop::collection::vec(edge(), 1..30),
        pick in any::<prop::sample::Index>(),
    ) {
        let params = GraphParams::default();
        let mut once = build(params, &edges);
        let mut twice = build(params, &edges);
        let (from, to) = edges[pick.index(edges.len())];
        prop_assert!(!twice.add_trust(&from, &to));
        prop_assert_eq!(once.edge_count(), twice.edge_count());
        for id in 0..MAX_NODE {
            prop_assert_eq!(once.get_reputation(&id), twice.get_reputation(&id));
        }
    }
}

// ==================== Cache Property Tests ====================

proptest! {
    /// Interleaving reads with additions and removals never leaves a stale score visible.
    #[test]
    fn cached_scores_match_recomputation(
        ops in prop::collection::vec((any::<bool>(), edge()), 1..60),
        flow in 0.05f64..0.95,
        horizon in 1u32..5,
    ) {
        let params = GraphParams::new(flow, horizon).unwrap();
        let mut graph = TrustGraph::new(params);
        for (i, (add, (from, to))) in ops.iter().enumerate() {
            if *add {
                graph.add_trust(from, to);
            } else {
                graph.remove_trust(from, to);
            }
            if i % 3 == 0 {
                for id in 0..MAX_NODE {
                    graph.get_reputation(&id);
                }
            }
        }
        assert_scores_fresh(&mut graph, params)?;
    }

    /// Scores are finite and bounded by the number of other nodes.
    #[test]
    fn scores_are_finite_and_bounded(
        edges in prop::collection::vec(edge(), 0..60),
        horizon in 1u32..8,
    ) {
        let mut graph = build(GraphParams::new(0.9, horizon).unwrap(), &edges);
        let nodes = graph.node_count() as f64;
        for id in 0..MAX_NODE {
            let score = graph.get_reputation(&id);
            prop_assert!(score.is_finite());
            prop_assert!(score >= 0.0);
            prop_assert!(score <= nodes);
        }
    }

    /// A larger decay factor never lowers any node's score.
    #[test]
    fn decay_is_monotone(
        edges in prop::collection::vec(edge(), 0..40),
        low in 0.05f64..0.5,
        delta in 0.0f64..0.45,
        horizon in 1u32..5,
    ) {
        let mut lower = build(GraphParams::new(low, horizon).unwrap(), &edges);
        let mut higher = build(GraphParams::new(low + delta, horizon).unwrap(), &edges);
        for id in 0..MAX_NODE {
            prop_assert!(higher.get_reputation(&id) + 1e-12 >= lower.get_reputation(&id));
        }
    }
}

// ==================== Query Property Tests ====================

proptest! {
    /// Top trusters are trusters, sorted by descending score, and min(k, count) long.
    #[test]
    fn top_trusters_sorted_and_sized(
        edges in prop::collection::vec(edge(), 0..50),
        target in 0..MAX_NODE,
        k in 0usize..8,
    ) {
        let mut graph = build(GraphParams::default(), &edges);
        let scored = graph.get_top_trusters_scored(&target, k);
        prop_assert_eq!(scored.len(), k.min(graph.trusters_count(&target)));
        for pair in scored.windows(2) {
            prop_assert!(pair[0].1 >= pair[1].1);
        }
        for (truster, score) in &scored {
            prop_assert!(graph.trust_exists(truster, &target));
            prop_assert_eq!(*score, graph.get_reputation(truster));
        }
    }

    /// Every returned reference is a chain of existing edges ending at the target.
    #[test]
    fn references_follow_edges(
        edges in prop::collection::vec(edge(), 0..40),
        from in 0..MAX_NODE,
        to in 0..MAX_NODE,
    ) {
        let graph = build(GraphParams::default(), &edges);
        if let Some(path) = graph.get_reference(&from, &to) {
            if from == to {
                prop_assert!(path.is_empty());
            } else {
                prop_assert_eq!(path.last().copied(), Some(to));
                let mut previous = from;
                for hop in &path {
                    prop_assert!(graph.trust_exists(&previous, hop));
                    previous = *hop;
                }
            }
        } else {
            prop_assert!(from != to || !graph.contains(&from));
        }
    }
}
