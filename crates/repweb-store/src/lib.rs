// crates/repweb-store/src/lib.rs
//
// repweb-store: Storage layer for repweb.
//
// Provides RocksDB-backed persistence of trust edges (replayed into the trust
// graph at startup) and the player directory that resolves names to stable
// identities.

pub mod rocks;

// Re-export key types for ergonomic access from downstream crates.
pub use rocks::RocksStore;
