// crates/repweb-reputation/src/lib.rs
//
// repweb-reputation: Trust graph and reputation engine for repweb.
//
// Identities extend directed trust to one another. A node's reputation is the
// number of distinct trusters within `max_chain_length` hops, each distance
// layer discounted by `flow_multiplier^degree`. Scores are cached per node and
// recomputed lazily; mutations only mark the bounded neighbourhood whose score
// could have changed as stale.

pub mod graph;
pub mod invalidate;
pub mod node;
pub mod params;
pub mod path;
pub mod replay;
pub mod score;
pub mod top_k;

#[cfg(test)]
mod proptests;

pub use graph::TrustGraph;
pub use node::{Node, NodeId};
pub use params::GraphParams;
pub use replay::replay_into;
pub use score::ScoreCache;
