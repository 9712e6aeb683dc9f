// crates/repweb-store/src/rocks.rs
//
// RocksDB-backed persistent storage for trust edges and players.
//
// Key format:
//   - Edge:      `trust:{truster_uuid}:{trustee_uuid}` -> empty value
//   - Player:    `player:{normalized name}`            -> JSON-serialized PlayerRecord
//   - Reverse:   `player_id:{uuid}`                     -> normalized name
//
// Edge existence is the whole signal, so edge values are empty.

use std::sync::Mutex;

use async_trait::async_trait;
use rocksdb::{DBWithThreadMode, MultiThreaded, Options, WriteBatch};
use tracing::debug;
use uuid::Uuid;

use repweb_core::error::{PolicyViolation, RepwebError};
use repweb_core::identity::{normalize_name, PlayerId, PlayerRecord};
use repweb_core::traits::{PlayerDirectory, TrustStore};

const TRUST_PREFIX: &str = "trust:";
const PLAYER_PREFIX: &str = "player:";
const PLAYER_ID_PREFIX: &str = "player_id:";

/// RocksDB wrapper implementing `TrustStore` and `PlayerDirectory`.
#[derive(Debug)]
pub struct RocksStore {
    db: DBWithThreadMode<MultiThreaded>,
    /// Serializes the name check and write of `register_player_sync`.
    registration: Mutex<()>,
}

impl RocksStore {
    /// Open a RocksDB database at the given filesystem path.
    ///
    /// Creates the database directory if it does not exist.
    pub fn open(path: &str) -> Result<Self, RepwebError> {
        let mut opts = Options::default();
        opts.create_if_missing(true);

        let db = DBWithThreadMode::<MultiThreaded>::open(&opts, path)
            .map_err(|e| RepwebError::Storage(format!("Failed to open RocksDB at {}: {}", path, e)))?;

        Ok(Self {
            db,
            registration: Mutex::new(()),
        })
    }

    /// Build the edge key: `trust:{truster}:{trustee}`.
    fn trust_key(truster: &PlayerId, trustee: &PlayerId) -> Vec<u8> {
        format!("{}{}:{}", TRUST_PREFIX, truster, trustee).into_bytes()
    }

    /// Build the player key from an already normalized name.
    fn player_key(normalized: &str) -> Vec<u8> {
        format!("{}{}", PLAYER_PREFIX, normalized).into_bytes()
    }

    /// Build the reverse index key: `player_id:{uuid}`.
    fn player_id_key(id: &PlayerId) -> Vec<u8> {
        format!("{}{}", PLAYER_ID_PREFIX, id).into_bytes()
    }

    fn put_raw(&self, key: &[u8], value: &[u8]) -> Result<(), RepwebError> {
        self.db
            .put(key, value)
            .map_err(|e| RepwebError::Storage(format!("RocksDB put failed: {}", e)))
    }

    fn get_raw(&self, key: &[u8]) -> Result<Option<Vec<u8>>, RepwebError> {
        self.db
            .get(key)
            .map_err(|e| RepwebError::Storage(format!("RocksDB get failed: {}", e)))
    }

    fn delete_raw(&self, key: &[u8]) -> Result<(), RepwebError> {
        self.db
            .delete(key)
            .map_err(|e| RepwebError::Storage(format!("RocksDB delete failed: {}", e)))
    }

    /// Collect every (key, value) pair whose key starts with `prefix`.
    fn scan_prefix(&self, prefix: &str) -> Result<Vec<(Box<[u8]>, Box<[u8]>)>, RepwebError> {
        let prefix = prefix.as_bytes();
        let mut entries = Vec::new();
        for item in self.db.prefix_iterator(prefix) {
            let (key, value) = item
                .map_err(|e| RepwebError::Storage(format!("RocksDB iteration error: {}", e)))?;
            // Without a prefix extractor the iterator runs past the prefix.
            if !key.starts_with(prefix) {
                break;
            }
            entries.push((key, value));
        }
        Ok(entries)
    }

    /// Synchronously record a trust edge.
    pub fn save_trust_sync(&self, truster: &PlayerId, trustee: &PlayerId) -> Result<(), RepwebError> {
        self.put_raw(&Self::trust_key(truster, trustee), &[])
    }

    /// Synchronously erase a trust edge.
    pub fn delete_trust_sync(&self, truster: &PlayerId, trustee: &PlayerId) -> Result<(), RepwebError> {
        self.delete_raw(&Self::trust_key(truster, trustee))
    }

    /// Whether the edge is stored.
    pub fn trust_stored(&self, truster: &PlayerId, trustee: &PlayerId) -> Result<bool, RepwebError> {
        Ok(self.get_raw(&Self::trust_key(truster, trustee))?.is_some())
    }

    /// Synchronously list every stored edge.
    ///
    /// Keys that do not parse as two UUIDs are skipped.
    pub fn list_trusts_sync(&self) -> Result<Vec<(PlayerId, PlayerId)>, RepwebError> {
        let mut edges = Vec::new();
        for (key, _value) in self.scan_prefix(TRUST_PREFIX)? {
            let suffix = std::str::from_utf8(&key[TRUST_PREFIX.len()..]).unwrap_or("");
            if let Some(edge) = parse_edge(suffix) {
                edges.push(edge);
            } else {
                debug!(key = suffix, "skipping malformed trust key");
            }
        }
        Ok(edges)
    }

    /// Synchronously register a player under a fresh identity.
    ///
    /// Registrations within one store are serialized, so two racing joins of
    /// the same name cannot both pass the existence check.
    pub fn register_player_sync(&self, name: &str) -> Result<PlayerRecord, RepwebError> {
        let normalized = normalize_name(name);
        if normalized.is_empty() {
            return Err(PolicyViolation::UnknownPlayer(name.to_string()).into());
        }

        let _guard = self
            .registration
            .lock()
            .map_err(|_| RepwebError::Storage("registration lock poisoned".to_string()))?;
        if self.get_raw(&Self::player_key(&normalized))?.is_some() {
            return Err(PolicyViolation::PlayerExists(name.trim().to_string()).into());
        }

        let record = PlayerRecord::new(name);
        let json = serde_json::to_vec(&record)?;
        let mut batch = WriteBatch::default();
        batch.put(Self::player_key(&normalized), json);
        batch.put(Self::player_id_key(&record.id), normalized.as_bytes());
        self.db
            .write(batch)
            .map_err(|e| RepwebError::Storage(format!("RocksDB write failed: {}", e)))?;

        Ok(record)
    }

    /// Synchronously resolve a player by (case-insensitive) name.
    pub fn resolve_player_sync(&self, name: &str) -> Result<Option<PlayerRecord>, RepwebError> {
        match self.get_raw(&Self::player_key(&normalize_name(name)))? {
            Some(bytes) => Ok(Some(serde_json::from_slice(&bytes)?)),
            None => Ok(None),
        }
    }

    /// Synchronously resolve a player by identity.
    ///
    /// A reverse entry whose name now belongs to another identity is stale
    /// and resolves to `None`.
    pub fn player_by_id_sync(&self, id: &PlayerId) -> Result<Option<PlayerRecord>, RepwebError> {
        let Some(name) = self.get_raw(&Self::player_id_key(id))? else {
            return Ok(None);
        };
        let name = String::from_utf8(name).map_err(|e| RepwebError::Serialization(e.to_string()))?;
        Ok(self
            .resolve_player_sync(&name)?
            .filter(|record| record.id == *id))
    }

    /// Synchronously list every registered player.
    pub fn list_players_sync(&self) -> Result<Vec<PlayerRecord>, RepwebError> {
        let mut players = Vec::new();
        for (_key, value) in self.scan_prefix(PLAYER_PREFIX)? {
            players.push(serde_json::from_slice(&value)?);
        }
        Ok(players)
    }
}

#[async_trait]
impl TrustStore for RocksStore {
    async fn save_trust(&self, truster: &PlayerId, trustee: &PlayerId) -> Result<(), RepwebError> {
        self.save_trust_sync(truster, trustee)
    }

    async fn delete_trust(&self, truster: &PlayerId, trustee: &PlayerId) -> Result<(), RepwebError> {
        self.delete_trust_sync(truster, trustee)
    }

    async fn list_trusts(&self) -> Result<Vec<(PlayerId, PlayerId)>, RepwebError> {
        self.list_trusts_sync()
    }
}

#[async_trait]
impl PlayerDirectory for RocksStore {
    async fn register_player(&self, name: &str) -> Result<PlayerRecord, RepwebError> {
        self.register_player_sync(name)
    }

    async fn resolve_player(&self, name: &str) -> Result<Option<PlayerRecord>, RepwebError> {
        self.resolve_player_sync(name)
    }

    async fn player_by_id(&self, id: &PlayerId) -> Result<Option<PlayerRecord>, RepwebError> {
        self.player_by_id_sync(id)
    }

    async fn list_players(&self) -> Result<Vec<PlayerRecord>, RepwebError> {
        self.list_players_sync()
    }
}

/// Parse the `{truster}:{trustee}` suffix of an edge key.
fn parse_edge(suffix: &str) -> Option<(PlayerId, PlayerId)> {
    let (truster, trustee) = suffix.split_once(':')?;
    let truster = Uuid::parse_str(truster).ok()?;
    let trustee = Uuid::parse_str(trustee).ok()?;
    Some((PlayerId(truster), PlayerId(trustee)))
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::sync::Arc;

    fn temp_store(label: &str) -> RocksStore {
        let path = std::env::temp_dir().join(format!("repweb_rocks_{}_{}", label, Uuid::now_v7()));
        RocksStore::open(&path.to_string_lossy()).unwrap()
    }

    #[test]
    fn stale_reverse_entry_does_not_resolve() {
        let store = temp_store("stale");
        let current = store.register_player_sync("alice").unwrap();
        // A reverse entry pointing at a name now owned by another identity.
        let orphan = PlayerId::generate();
        store
            .put_raw(&RocksStore::player_id_key(&orphan), b"alice")
            .unwrap();

        assert!(store.player_by_id_sync(&orphan).unwrap().is_none());
        assert_eq!(store.player_by_id_sync(&current.id).unwrap().unwrap().id, current.id);
    }

    #[test]
    fn concurrent_registrations_of_one_name_admit_one() {
        let store = Arc::new(temp_store("race"));
        let handles: Vec<_> = (0..8)
            .map(|i| {
                let store = Arc::clone(&store);
                let name = if i % 2 == 0 { "Racer" } else { "racer" };
                std::thread::spawn(move || store.register_player_sync(name))
            })
            .collect();
        let winners: Vec<PlayerRecord> = handles
            .into_iter()
            .filter_map(|h| h.join().unwrap().ok())
            .collect();

        assert_eq!(winners.len(), 1);
        let resolved = store.player_by_id_sync(&winners[0].id).unwrap().unwrap();
        assert_eq!(resolved.id, winners[0].id);
        assert_eq!(store.list_players_sync().unwrap().len(), 1);
    }

    #[test]
    fn trust_key_round_trips_through_parse() {
        let a = PlayerId::generate();
        let b = PlayerId::generate();
        let key = String::from_utf8(RocksStore::trust_key(&a, &b)).unwrap();
        assert!(key.starts_with(TRUST_PREFIX));
        assert_eq!(parse_edge(&key[TRUST_PREFIX.len()..]), Some((a, b)));
    }

    #[test]
    fn malformed_edges_do_not_parse() {
        assert_eq!(parse_edge("not-a-uuid:also-not"), None);
        assert_eq!(parse_edge("no separator"), None);
    }

    #[test]
    fn player_prefixes_do_not_overlap() {
        // `player_id:` keys must never be picked up by a `player:` scan.
        assert!(!PLAYER_ID_PREFIX.starts_with(PLAYER_PREFIX));
    }
}
