// crates/repweb-reputation/src/replay.rs
//
// Startup reconstruction of a trust graph from durable edges.

use tracing::info;

use repweb_core::{PlayerId, RepwebError, TrustStore};

use crate::graph::TrustGraph;

/// Replay every stored edge into `graph` through `add_trust`.
///
/// Returns the number of edges that changed the graph; edges already present
/// are no-ops.
pub async fn replay_into<S>(store: &S, graph: &mut TrustGraph<PlayerId>) -> Result<usize, RepwebError>
where
    S: TrustStore + ?Sized,
{
    let edges = store.list_trusts().await?;
    let mut added = 0;
    for (truster, trustee) in &edges {
        if graph.add_trust(truster, trustee) {
            added += 1;
        }
    }
    info!(stored = edges.len(), added, "replayed trust edges");
    Ok(added)
}
