// crates/repweb-cli/src/shared.rs
//
// SharedReputation: the trust graph and its backing store, shared by every
// command handler.
//
// The graph sits behind a single exclusive lock. Handlers hold it for the
// whole of each graph operation so no reader ever sees a half-applied
// mutation. It is a Mutex rather than an RwLock because reading a score can
// recompute and store it.

use std::sync::Arc;

use tokio::sync::Mutex;
use tracing::info;

use repweb_core::{PlayerDirectory, PlayerId, PlayerRecord, PolicyViolation, RepwebError};
use repweb_reputation::{replay_into, GraphParams, TrustGraph};
use repweb_store::RocksStore;

/// Shared trust graph plus durable storage.
#[derive(Clone)]
pub struct SharedReputation {
    /// The in-memory trust graph, rebuilt from storage at startup.
    pub graph: Arc<Mutex<TrustGraph<PlayerId>>>,
    /// Edge persistence and player directory.
    pub store: Arc<RocksStore>,
}

impl SharedReputation {
    /// Open the store under `data_dir` and replay its edges into a new graph.
    pub async fn open(data_dir: &str, params: GraphParams) -> Result<Self, RepwebError> {
        std::fs::create_dir_all(data_dir)
            .map_err(|e| RepwebError::Storage(format!("Failed to create {}: {}", data_dir, e)))?;
        let store = RocksStore::open(data_dir)?;

        let mut graph = TrustGraph::new(params);
        replay_into(&store, &mut graph).await?;
        info!(
            nodes = graph.node_count(),
            edges = graph.edge_count(),
            flow_multiplier = params.flow_multiplier,
            max_chain_length = params.max_chain_length,
            "trust graph ready"
        );

        Ok(Self {
            graph: Arc::new(Mutex::new(graph)),
            store: Arc::new(store),
        })
    }

    /// Resolve a player name, refusing names that were never registered.
    pub async fn resolve(&self, name: &str) -> Result<PlayerRecord, RepwebError> {
        self.store
            .resolve_player(name)
            .await?
            .ok_or_else(|| PolicyViolation::UnknownPlayer(name.trim().to_string()).into())
    }

    /// Registered name of an identity, or the raw identity if unregistered.
    pub async fn display_name(&self, id: &PlayerId) -> Result<String, RepwebError> {
        Ok(self
            .store
            .player_by_id(id)
            .await?
            .map(|p| p.name)
            .unwrap_or_else(|| id.to_string()))
    }

    /// Display names for a sequence of identities, preserving order.
    pub async fn display_names(&self, ids: &[PlayerId]) -> Result<Vec<String>, RepwebError> {
        let mut names = Vec::with_capacity(ids.len());
        for id in ids {
            names.push(self.display_name(id).await?);
        }
        Ok(names)
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;

    use uuid::Uuid;

    /// Create a temporary directory path using UUID to avoid conflicts.
    pub fn temp_db_path(label: &str) -> String {
        let dir = std::env::temp_dir();
        let path = dir.join(format!("repweb_cli_test_{}_{}", label, Uuid::now_v7()));
        path.to_string_lossy().to_string()
    }

    /// Fresh shared state with default parameters and the given players registered.
    pub async fn state_with_players(label: &str, names: &[&str]) -> SharedReputation {
        let state = SharedReputation::open(&temp_db_path(label), GraphParams::default())
            .await
            .unwrap();
        for name in names {
            state.store.register_player(name).await.unwrap();
        }
        state
    }
}
