// crates/repweb-reputation/src/score.rs
//
// Lazy, dirty-flag-gated reputation scores.
//
// A node's reputation is a discounted breadth count: every distinct truster at
// degree d (d + 1 hops away) contributes `flow_multiplier^d`. Trusters' own
// scores play no part. Each node is counted at most once, at its shortest
// distance, so cycles cannot inflate a score and a node never counts itself
// through a cycle.

use std::collections::HashSet;

use crate::node::{Node, NodeId};
use crate::params::GraphParams;

/// Last computed score of a node plus its validity flag.
///
/// `valid == false` is a conservative superset of "actually stale": a stale
/// cache is always recomputed before it is read, and recomputation is idempotent.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoreCache {
    value: f64,
    valid: bool,
}

impl ScoreCache {
    /// A zero score that must be computed before first use.
    pub fn new() -> Self {
        Self {
            value: 0.0,
            valid: false,
        }
    }

    /// The cached score, or `None` if it must be recomputed.
    pub fn get(&self) -> Option<f64> {
        if self.valid {
            Some(self.value)
        } else {
            None
        }
    }

    pub fn is_valid(&self) -> bool {
        self.valid
    }

    /// Store a freshly computed score and mark it valid.
    pub fn store(&mut self, value: f64) {
        self.value = value;
        self.valid = true;
    }

    /// Mark the score stale. The old value is kept but never read.
    pub fn invalidate(&mut self) {
        self.valid = false;
    }
}

impl Default for ScoreCache {
    fn default() -> Self {
        Self::new()
    }
}

/// Compute the decayed trust count of `target` by walking backward through trusters.
///
/// Layer `degree` (0-based) holds the trusters first reached at `degree + 1`
/// hops. Walks at most `max_chain_length` layers and stops early once a layer
/// brings in no new nodes.
pub fn decayed_trust_count<K>(nodes: &[Node<K>], target: NodeId, params: &GraphParams) -> f64 {
    let mut score = 0.0;
    let mut seen: HashSet<NodeId> = HashSet::new();
    seen.insert(target);
    let mut frontier: HashSet<NodeId> = nodes[target.index()].trusters.clone();

    for degree in 0..params.max_chain_length {
        score += params.flow_multiplier.powi(degree as i32) * frontier.len() as f64;
        if degree + 1 == params.max_chain_length {
            break;
        }

        seen.extend(frontier.iter().copied());
        let next: HashSet<NodeId> = frontier
            .iter()
            .flat_map(|id| nodes[id.index()].trusters.iter().copied())
            .filter(|id| !seen.contains(id))
            .collect();
        if next.is_empty() {
            break;
        }
        frontier = next;
    }

    score
}
