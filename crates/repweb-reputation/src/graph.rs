// crates/repweb-reputation/src/graph.rs
//
// TrustGraph: owns every node and exposes the mutation and query API.
//
// Mutations update both endpoints' edge sets and then invalidate forward from
// the trustee. Reads recompute stale scores on demand. Nothing here performs
// I/O; persistence and identity resolution belong to the caller.

use std::collections::HashMap;
use std::hash::Hash;

use tracing::{debug, trace};

use repweb_core::RepwebError;

use crate::invalidate::invalidate_forward;
use crate::node::{Node, NodeId};
use crate::params::GraphParams;
use crate::path::shortest_trust_path;
use crate::score::decayed_trust_count;
use crate::top_k::{select_top_k, Candidate};

/// A directed trust network with cached, lazily recomputed reputation scores.
///
/// Nodes are created on first mention by `add_trust` and are never removed.
/// Any query about an identity without a node returns the empty result
/// (0 score, no edges, no path).
///
/// Not synchronized: callers sharing a graph across tasks must hold one
/// exclusive lock for the duration of each call, since reads update caches.
#[derive(Debug, Clone)]
pub struct TrustGraph<K> {
    params: GraphParams,
    index: HashMap<K, NodeId>,
    nodes: Vec<Node<K>>,
}

impl<K> TrustGraph<K>
where
    K: Clone + Eq + Hash,
{
    /// Create an empty graph with validated parameters.
    pub fn new(params: GraphParams) -> Self {
        Self {
            params,
            index: HashMap::new(),
            nodes: Vec::new(),
        }
    }

    /// Validate the parameters and create an empty graph.
    pub fn with_params(flow_multiplier: f64, max_chain_length: u32) -> Result<Self, RepwebError> {
        Ok(Self::new(GraphParams::new(flow_multiplier, max_chain_length)?))
    }

    pub fn params(&self) -> &GraphParams {
        &self.params
    }

    /// Whether the identity has ever taken part in a mutation.
    pub fn contains(&self, key: &K) -> bool {
        self.index.contains_key(key)
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.nodes.iter().map(|n| n.trustees.len()).sum()
    }

    /// Every (truster, trustee) pair in the graph, in unspecified order.
    pub fn edges(&self) -> impl Iterator<Item = (&K, &K)> + '_ {
        self.nodes.iter().flat_map(move |node| {
            node.trustees
                .iter()
                .map(move |id| (node.key(), self.nodes[id.index()].key()))
        })
    }

    // -----------------------------------------------------------------
    // Mutation
    // -----------------------------------------------------------------

    /// Record that `truster` trusts `trustee`, creating either node if absent.
    ///
    /// Returns `false` without invalidating anything if the edge already
    /// existed. Self-trust is accepted; rejecting it is the caller's policy.
    pub fn add_trust(&mut self, truster: &K, trustee: &K) -> bool {
        let from = self.ensure_node(truster);
        let to = self.ensure_node(trustee);

        if !self.nodes[from.index()].trustees.insert(to) {
            return false;
        }
        self.nodes[to.index()].trusters.insert(from);

        let marked = invalidate_forward(&mut self.nodes, to, self.params.max_chain_length);
        debug!(
            truster = from.index(),
            trustee = to.index(),
            invalidated = marked,
            "trust edge added"
        );
        true
    }

    /// Remove the edge `truster -> trustee` if it exists.
    ///
    /// Returns `false` (a no-op) if either identity is absent or the edge does
    /// not exist. Never creates nodes.
    pub fn remove_trust(&mut self, truster: &K, trustee: &K) -> bool {
        let (Some(from), Some(to)) = (self.node_id(truster), self.node_id(trustee)) else {
            return false;
        };

        if !self.nodes[from.index()].trustees.remove(&to) {
            return false;
        }
        self.nodes[to.index()].trusters.remove(&from);

        let marked = invalidate_forward(&mut self.nodes, to, self.params.max_chain_length);
        debug!(
            truster = from.index(),
            trustee = to.index(),
            invalidated = marked,
            "trust edge removed"
        );
        true
    }

    /// Mark the forward neighbourhood of `key` stale without recomputing.
    ///
    /// Mutations already do this; exposed for diagnostics and tests. Returns
    /// the number of nodes marked, 0 for an absent identity.
    pub fn invalidate_from(&mut self, key: &K) -> usize {
        match self.node_id(key) {
            Some(id) => invalidate_forward(&mut self.nodes, id, self.params.max_chain_length),
            None => 0,
        }
    }

    // -----------------------------------------------------------------
    // Queries
    // -----------------------------------------------------------------

    pub fn trust_exists(&self, truster: &K, trustee: &K) -> bool {
        match (self.node_id(truster), self.node_id(trustee)) {
            (Some(from), Some(to)) => self.nodes[from.index()].trusts(to),
            _ => false,
        }
    }

    /// Current reputation of `key`, recomputing it if stale. 0 if absent.
    pub fn get_reputation(&mut self, key: &K) -> f64 {
        match self.node_id(key) {
            Some(id) => self.score(id),
            None => 0.0,
        }
    }

    /// Whether the cached score of `key` can be read without recomputation.
    pub fn is_score_valid(&self, key: &K) -> bool {
        self.node_id(key)
            .map(|id| self.nodes[id.index()].cache.is_valid())
            .unwrap_or(false)
    }

    pub fn trusters_count(&self, key: &K) -> usize {
        self.node(key).map(|n| n.trusters.len()).unwrap_or(0)
    }

    pub fn trustees_count(&self, key: &K) -> usize {
        self.node(key).map(|n| n.trustees.len()).unwrap_or(0)
    }

    /// Snapshot of the identities that trust `key`.
    pub fn get_trusters(&self, key: &K) -> Vec<K> {
        self.node(key)
            .map(|n| self.keys_of(n.trusters.iter().copied()))
            .unwrap_or_default()
    }

    /// Snapshot of the identities `key` trusts.
    pub fn get_trustees(&self, key: &K) -> Vec<K> {
        self.node(key)
            .map(|n| self.keys_of(n.trustees.iter().copied()))
            .unwrap_or_default()
    }

    /// Up to `k` trusters of `key` with the highest reputation, descending.
    pub fn get_top_trusters(&mut self, key: &K, k: usize) -> Vec<K> {
        self.top_trusters(key, k)
            .into_iter()
            .map(|c| self.nodes[c.id.index()].key().clone())
            .collect()
    }

    /// Like [`get_top_trusters`](Self::get_top_trusters), paired with each truster's score.
    pub fn get_top_trusters_scored(&mut self, key: &K, k: usize) -> Vec<(K, f64)> {
        self.top_trusters(key, k)
            .into_iter()
            .map(|c| (self.nodes[c.id.index()].key().clone(), c.score))
            .collect()
    }

    /// A shortest chain of trust from `from` to `to`.
    ///
    /// The path excludes `from` and ends with `to`. `Some(vec![])` when
    /// `from == to`; `None` when either is absent or `to` is unreachable.
    pub fn get_reference(&self, from: &K, to: &K) -> Option<Vec<K>> {
        let start = self.node_id(from)?;
        let end = self.node_id(to)?;
        let path = shortest_trust_path(&self.nodes, start, end)?;
        Some(self.keys_of(path))
    }

    // -----------------------------------------------------------------
    // Internals
    // -----------------------------------------------------------------

    fn node_id(&self, key: &K) -> Option<NodeId> {
        self.index.get(key).copied()
    }

    fn node(&self, key: &K) -> Option<&Node<K>> {
        self.node_id(key).map(|id| &self.nodes[id.index()])
    }

    fn ensure_node(&mut self, key: &K) -> NodeId {
        if let Some(id) = self.node_id(key) {
            return id;
        }
        let id = NodeId::new(self.nodes.len());
        self.nodes.push(Node::new(key.clone()));
        self.index.insert(key.clone(), id);
        id
    }

    fn keys_of<I>(&self, ids: I) -> Vec<K>
    where
        I: IntoIterator<Item = NodeId>,
    {
        ids.into_iter()
            .map(|id| self.nodes[id.index()].key().clone())
            .collect()
    }

    /// Read a node's score, recomputing it first if the cache is stale.
    fn score(&mut self, id: NodeId) -> f64 {
        if let Some(value) = self.nodes[id.index()].cache.get() {
            return value;
        }
        let value = decayed_trust_count(&self.nodes, id, &self.params);
        self.nodes[id.index()].cache.store(value);
        trace!(node = id.index(), score = value, "recomputed reputation");
        value
    }

    fn top_trusters(&mut self, key: &K, k: usize) -> Vec<Candidate> {
        let Some(id) = self.node_id(key) else {
            return Vec::new();
        };
        let trusters: Vec<NodeId> = self.nodes[id.index()].trusters.iter().copied().collect();
        let candidates: Vec<Candidate> = trusters
            .into_iter()
            .map(|truster| Candidate {
                id: truster,
                score: self.score(truster),
            })
            .collect();
        select_top_k(candidates, k)
    }
}
