// crates/repweb-core/src/traits.rs

use async_trait::async_trait;

use crate::error::RepwebError;
use crate::identity::{PlayerId, PlayerRecord};

/// Durable record of trust edges.
///
/// The trust graph does not persist itself: the command layer writes each
/// successful mutation here, and the stored edges are replayed into a fresh
/// graph at startup. Implemented by repweb-store (RocksDB backend).
#[async_trait]
pub trait TrustStore: Send + Sync {
    /// Record that `truster` trusts `trustee`. Idempotent.
    async fn save_trust(&self, truster: &PlayerId, trustee: &PlayerId) -> Result<(), RepwebError>;

    /// Erase the edge `truster -> trustee`. Succeeds if it was absent.
    async fn delete_trust(&self, truster: &PlayerId, trustee: &PlayerId) -> Result<(), RepwebError>;

    /// All stored edges as (truster, trustee) pairs, in unspecified order.
    async fn list_trusts(&self) -> Result<Vec<(PlayerId, PlayerId)>, RepwebError>;
}

/// Resolution of human-readable player names to stable identities.
///
/// Implemented by repweb-store. Lookups are case-insensitive.
#[async_trait]
pub trait PlayerDirectory: Send + Sync {
    /// Register a new player under `name`.
    ///
    /// Fails with `PolicyViolation::PlayerExists` if the name is taken.
    async fn register_player(&self, name: &str) -> Result<PlayerRecord, RepwebError>;

    /// Look up a player by name. Returns `None` if the name was never registered.
    async fn resolve_player(&self, name: &str) -> Result<Option<PlayerRecord>, RepwebError>;

    /// Look up a player by identity.
    async fn player_by_id(&self, id: &PlayerId) -> Result<Option<PlayerRecord>, RepwebError>;

    /// All registered players, in unspecified order.
    async fn list_players(&self) -> Result<Vec<PlayerRecord>, RepwebError>;
}
