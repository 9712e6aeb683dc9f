// crates/repweb-reputation/src/node.rs
//
// Arena node: one identity's trust edges and cached score.
//
// Nodes refer to each other by `NodeId` (an index into the graph's arena),
// never by reference, so the cyclic truster/trustee relation needs no shared
// ownership.

use std::collections::HashSet;

use crate::score::ScoreCache;

/// Stable index of a node in the graph arena.
///
/// Assigned in creation order and never reused; nodes are never removed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl NodeId {
    pub(crate) fn new(index: usize) -> Self {
        Self(index)
    }

    /// Position of this node in the arena.
    pub fn index(self) -> usize {
        self.0
    }
}

/// One identity in the trust graph.
#[derive(Debug, Clone)]
pub struct Node<K> {
    key: K,
    /// Nodes that trust this node (inbound edges).
    pub(crate) trusters: HashSet<NodeId>,
    /// Nodes this node trusts (outbound edges).
    pub(crate) trustees: HashSet<NodeId>,
    pub(crate) cache: ScoreCache,
}

impl<K> Node<K> {
    /// Create an edgeless node with a stale, zero score.
    pub(crate) fn new(key: K) -> Self {
        Self {
            key,
            trusters: HashSet::new(),
            trustees: HashSet::new(),
            cache: ScoreCache::new(),
        }
    }

    /// The identity this node represents.
    pub fn key(&self) -> &K {
        &self.key
    }

    pub fn trusters(&self) -> &HashSet<NodeId> {
        &self.trusters
    }

    pub fn trustees(&self) -> &HashSet<NodeId> {
        &self.trustees
    }

    /// Whether this node trusts `other`.
    pub fn trusts(&self, other: NodeId) -> bool {
        self.trustees.contains(&other)
    }

    pub fn cache(&self) -> &ScoreCache {
        &self.cache
    }
}
