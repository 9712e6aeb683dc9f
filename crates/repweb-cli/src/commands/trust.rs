// crates/repweb-cli/src/commands/trust.rs
//
// `repweb trust` / `repweb untrust` — add or withdraw trust.
//
// Policy lives here, not in the graph: self-trust, duplicate trust and
// untrusting a stranger are refused before anything is written. Accepted
// changes are persisted first, then applied to the graph, all under the
// graph lock.

use clap::Args;
use serde::Serialize;

use repweb_core::{PolicyViolation, RepwebError, TrustStore};

use crate::output::{format_json, format_reputation, OutputFormat};
use crate::shared::SharedReputation;

/// Arguments shared by `trust` and `untrust`.
#[derive(Debug, Args)]
pub struct TrustArgs {
    /// The player extending (or withdrawing) trust.
    #[arg(long = "as", value_name = "PLAYER")]
    pub as_player: String,

    /// The player being trusted (or untrusted).
    pub target: String,
}

/// Result of an accepted trust change.
#[derive(Debug, Serialize)]
pub struct TrustOutcome {
    pub truster: String,
    pub trustee: String,
    /// `true` for trust, `false` for untrust.
    pub trusted: bool,
    /// The trustee's reputation after the change.
    pub trustee_reputation: f64,
}

/// Make `truster` trust `target`.
pub async fn execute_trust(
    state: &SharedReputation,
    truster: &str,
    target: &str,
) -> Result<TrustOutcome, RepwebError> {
    let truster = state.resolve(truster).await?;
    let trustee = state.resolve(target).await?;
    if truster.id == trustee.id {
        return Err(PolicyViolation::CannotTrustSelf.into());
    }

    let mut graph = state.graph.lock().await;
    if graph.trust_exists(&truster.id, &trustee.id) {
        return Err(PolicyViolation::AlreadyTrusts {
            truster: truster.name,
            trustee: trustee.name,
        }
        .into());
    }

    state.store.save_trust(&truster.id, &trustee.id).await?;
    graph.add_trust(&truster.id, &trustee.id);
    let trustee_reputation = graph.get_reputation(&trustee.id);
    tracing::debug!(truster = %truster.name, trustee = %trustee.name, "trust recorded");

    Ok(TrustOutcome {
        truster: truster.name,
        trustee: trustee.name,
        trusted: true,
        trustee_reputation,
    })
}

/// Make `truster` stop trusting `target`.
pub async fn execute_untrust(
    state: &SharedReputation,
    truster: &str,
    target: &str,
) -> Result<TrustOutcome, RepwebError> {
    let truster = state.resolve(truster).await?;
    let trustee = state.resolve(target).await?;

    let mut graph = state.graph.lock().await;
    if !graph.trust_exists(&truster.id, &trustee.id) {
        return Err(PolicyViolation::DoesNotTrust {
            truster: truster.name,
            trustee: trustee.name,
        }
        .into());
    }

    state.store.delete_trust(&truster.id, &trustee.id).await?;
    graph.remove_trust(&truster.id, &trustee.id);
    let trustee_reputation = graph.get_reputation(&trustee.id);
    tracing::debug!(truster = %truster.name, trustee = %trustee.name, "trust withdrawn");

    Ok(TrustOutcome {
        truster: truster.name,
        trustee: trustee.name,
        trusted: false,
        trustee_reputation,
    })
}

/// Run the trust command.
pub async fn run_trust(
    state: &SharedReputation,
    args: &TrustArgs,
    format: OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    let outcome = execute_trust(state, &args.as_player, &args.target).await?;
    print_outcome(&outcome, format);
    Ok(())
}

/// Run the untrust command.
pub async fn run_untrust(
    state: &SharedReputation,
    args: &TrustArgs,
    format: OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    let outcome = execute_untrust(state, &args.as_player, &args.target).await?;
    print_outcome(&outcome, format);
    Ok(())
}

fn print_outcome(outcome: &TrustOutcome, format: OutputFormat) {
    match format {
        OutputFormat::Table => {
            if outcome.trusted {
                println!("Success. {} now trusts {}.", outcome.truster, outcome.trustee);
            } else {
                println!("Success. {} no longer trusts {}.", outcome.truster, outcome.trustee);
            }
            println!(
                "{}'s reputation is now {}.",
                outcome.trustee,
                format_reputation(outcome.trustee_reputation)
            );
        }
        OutputFormat::Json => println!("{}", format_json(outcome)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::test_support::state_with_players;

    fn policy(err: RepwebError) -> PolicyViolation {
        match err {
            RepwebError::Policy(violation) => violation,
            other => panic!("expected policy violation, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn trust_persists_and_updates_graph() {
        let state = state_with_players("trust", &["alice", "bob"]).await;
        let outcome = execute_trust(&state, "alice", "Bob").await.unwrap();
        assert!(outcome.trusted);
        assert_eq!(outcome.trustee, "bob");
        assert!((outcome.trustee_reputation - 1.0).abs() < 1e-9);

        let alice = state.resolve("alice").await.unwrap();
        let bob = state.resolve("bob").await.unwrap();
        assert!(state.store.trust_stored(&alice.id, &bob.id).unwrap());
        assert!(state.graph.lock().await.trust_exists(&alice.id, &bob.id));
    }

    #[tokio::test]
    async fn self_trust_is_refused() {
        let state = state_with_players("self", &["alice"]).await;
        let err = execute_trust(&state, "alice", "ALICE").await.unwrap_err();
        assert_eq!(policy(err), PolicyViolation::CannotTrustSelf);
        assert_eq!(state.graph.lock().await.node_count(), 0);
    }

    #[tokio::test]
    async fn duplicate_trust_is_refused() {
        let state = state_with_players("dup", &["alice", "bob"]).await;
        execute_trust(&state, "alice", "bob").await.unwrap();
        let err = execute_trust(&state, "alice", "bob").await.unwrap_err();
        assert!(matches!(policy(err), PolicyViolation::AlreadyTrusts { .. }));
    }

    #[tokio::test]
    async fn unknown_players_are_refused() {
        let state = state_with_players("unknown", &["alice"]).await;
        let err = execute_trust(&state, "alice", "ghost").await.unwrap_err();
        assert_eq!(policy(err), PolicyViolation::UnknownPlayer("ghost".to_string()));
        let err = execute_untrust(&state, "ghost", "alice").await.unwrap_err();
        assert_eq!(policy(err), PolicyViolation::UnknownPlayer("ghost".to_string()));
    }

    #[tokio::test]
    async fn untrust_removes_edge_everywhere() {
        let state = state_with_players("untrust", &["alice", "bob"]).await;
        execute_trust(&state, "alice", "bob").await.unwrap();
        let outcome = execute_untrust(&state, "alice", "bob").await.unwrap();
        assert!(!outcome.trusted);
        assert_eq!(outcome.trustee_reputation, 0.0);

        let alice = state.resolve("alice").await.unwrap();
        let bob = state.resolve("bob").await.unwrap();
        assert!(!state.store.trust_stored(&alice.id, &bob.id).unwrap());
        assert!(!state.graph.lock().await.trust_exists(&alice.id, &bob.id));
    }

    #[tokio::test]
    async fn untrust_without_edge_is_refused() {
        let state = state_with_players("untrust_none", &["alice", "bob"]).await;
        let err = execute_untrust(&state, "alice", "bob").await.unwrap_err();
        assert!(matches!(policy(err), PolicyViolation::DoesNotTrust { .. }));
    }
}
