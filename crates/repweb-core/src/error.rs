use thiserror::Error;

/// Workspace-wide error type for repweb.
#[derive(Debug, Error)]
pub enum RepwebError {
    /// Storage layer error (RocksDB).
    #[error("Storage error: {0}")]
    Storage(String),

    /// Serialization/deserialization error.
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Rejected configuration (graph parameters, config file contents).
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// A command was refused by the trust policy layer.
    #[error(transparent)]
    Policy(#[from] PolicyViolation),
}

/// Refusals issued by the command layer before the trust graph is touched.
///
/// These are expected outcomes of user input, not faults; the engine itself
/// never produces them.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PolicyViolation {
    /// A player attempted to trust themselves.
    #[error("You can only trust other players.")]
    CannotTrustSelf,

    /// The trust edge already exists.
    #[error("{truster} already trusts {trustee}")]
    AlreadyTrusts { truster: String, trustee: String },

    /// The trust edge to remove does not exist.
    #[error("{truster} does not trust {trustee}, so cannot untrust")]
    DoesNotTrust { truster: String, trustee: String },

    /// The name has never been registered.
    #[error("The specified player has not joined or does not exist: {0}")]
    UnknownPlayer(String),

    /// The name is already registered to another identity.
    #[error("A player with that name already exists: {0}")]
    PlayerExists(String),
}

impl From<serde_json::Error> for RepwebError {
    fn from(e: serde_json::Error) -> Self {
        RepwebError::Serialization(e.to_string())
    }
}
