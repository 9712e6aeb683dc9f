// crates/repweb-core/src/lib.rs
//
// repweb-core: Core types and traits for the repweb reputation network.
//
// This is the leaf crate that all other crates in the workspace depend on.
// It defines the stable player identity key, the workspace error type, and
// the trait interfaces through which the trust engine's collaborators
// (edge persistence, name resolution) are consumed.

pub mod error;
pub mod identity;
pub mod traits;

// Re-export key types for ergonomic access from downstream crates.
// Usage: `use repweb_core::PlayerId;`

// Identity types
pub use identity::{normalize_name, PlayerId, PlayerRecord};

// Error types
pub use error::{PolicyViolation, RepwebError};

// Traits
pub use traits::{PlayerDirectory, TrustStore};
