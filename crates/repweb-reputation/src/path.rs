// crates/repweb-reputation/src/path.rs
//
// Shortest trust path between two nodes.
//
// Plain breadth-first search along trustee edges. Only the hop count is
// minimised; among equally short paths any one may be returned.

use std::collections::{HashMap, VecDeque};

use crate::node::{Node, NodeId};

/// Find a shortest chain of trust from `start` to `end`.
///
/// The returned path excludes `start` and ends with `end`: its first element is
/// trusted directly by `start`, and each later element is trusted by the one
/// before it. `start == end` yields an empty path; `None` means `end` is not
/// reachable.
pub fn shortest_trust_path<K>(nodes: &[Node<K>], start: NodeId, end: NodeId) -> Option<Vec<NodeId>> {
    if start == end {
        return Some(Vec::new());
    }

    // First writer wins: a node's predecessor is whoever discovered it first.
    let mut predecessor: HashMap<NodeId, NodeId> = HashMap::new();
    let mut queue: VecDeque<NodeId> = VecDeque::new();
    queue.push_back(start);

    while let Some(current) = queue.pop_front() {
        if current == end {
            break;
        }
        for &next in &nodes[current.index()].trustees {
            if next == start || predecessor.contains_key(&next) {
                continue;
            }
            predecessor.insert(next, current);
            queue.push_back(next);
        }
    }

    if !predecessor.contains_key(&end) {
        return None;
    }

    let mut path = vec![end];
    let mut cursor = end;
    while let Some(&previous) = predecessor.get(&cursor) {
        if previous == start {
            break;
        }
        path.push(previous);
        cursor = previous;
    }
    path.reverse();
    Some(path)
}
