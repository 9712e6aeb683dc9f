// crates/repweb-core/src/identity.rs

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stable, opaque identity of a player in the trust network.
///
/// The trust engine only ever compares and hashes these; the mapping from
/// human-readable names lives in the [`PlayerDirectory`](crate::PlayerDirectory).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlayerId(pub Uuid);

impl PlayerId {
    /// Generate a fresh, time-ordered identity (UUID v7).
    pub fn generate() -> Self {
        Self(Uuid::now_v7())
    }
}

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.hyphenated())
    }
}

impl FromStr for PlayerId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s).map(PlayerId)
    }
}

/// A registered player: the stable identity plus the name it was registered under.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerRecord {
    /// Stable identity used as the trust graph key.
    pub id: PlayerId,
    /// Display name, with the spelling used at registration.
    pub name: String,
    /// When the player was first registered.
    pub first_seen: DateTime<Utc>,
}

impl PlayerRecord {
    /// Create a record for a newly registered player.
    pub fn new(name: &str) -> Self {
        Self {
            id: PlayerId::generate(),
            name: name.trim().to_string(),
            first_seen: Utc::now(),
        }
    }
}

/// Canonical lookup form of a player name: trimmed and lowercased.
pub fn normalize_name(name: &str) -> String {
    name.trim().to_lowercase()
}
