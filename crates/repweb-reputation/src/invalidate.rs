// crates/repweb-reputation/src/invalidate.rs
//
// Bounded forward invalidation after an edge mutation.
//
// Changing the trusters of node T can only change the score of a node Y that
// T reaches in fewer than `max_chain_length` forward hops, since beyond that
// the changed edge lies outside Y's scoring horizon. The walk marks exactly
// that neighbourhood stale and never recomputes anything.

use std::collections::HashSet;

use tracing::trace;

use crate::node::{Node, NodeId};

/// Mark `origin` and every node within `max_chain_length - 1` trustee hops as stale.
///
/// Returns the number of distinct nodes marked.
pub fn invalidate_forward<K>(nodes: &mut [Node<K>], origin: NodeId, max_chain_length: u32) -> usize {
    let mut todo: HashSet<NodeId> = HashSet::new();
    todo.insert(origin);
    let mut done: HashSet<NodeId> = HashSet::new();

    for step in 1..=max_chain_length {
        let is_last = step == max_chain_length;
        for id in &todo {
            nodes[id.index()].cache.invalidate();
            done.insert(*id);
        }
        if is_last {
            break;
        }

        let next: HashSet<NodeId> = todo
            .iter()
            .flat_map(|id| nodes[id.index()].trustees.iter().copied())
            .filter(|id| !done.contains(id))
            .collect();
        if next.is_empty() {
            break;
        }
        todo = next;
    }

    trace!(origin = origin.index(), marked = done.len(), "invalidated scores");
    done.len()
}
