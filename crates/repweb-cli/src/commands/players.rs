// crates/repweb-cli/src/commands/players.rs
//
// `repweb players` — list every registered player with their reputation.

use serde::Serialize;
use tabled::Tabled;

use repweb_core::{PlayerDirectory, RepwebError};

use crate::output::{format_json, format_reputation, format_table, OutputFormat};
use crate::shared::SharedReputation;

/// A row in the players table.
#[derive(Debug, Serialize, Tabled)]
pub struct PlayerRow {
    #[tabled(rename = "Player")]
    pub name: String,
    #[tabled(rename = "Reputation", display_with = "display_reputation")]
    pub reputation: f64,
    #[tabled(rename = "Trusted by")]
    pub trusted_by: usize,
    #[tabled(rename = "Trusts")]
    pub trusts: usize,
}

fn display_reputation(value: &f64) -> String {
    format_reputation(*value)
}

/// All registered players, most reputable first, ties by name.
pub async fn execute(state: &SharedReputation) -> Result<Vec<PlayerRow>, RepwebError> {
    let players = state.store.list_players().await?;

    let mut graph = state.graph.lock().await;
    let mut rows: Vec<PlayerRow> = players
        .into_iter()
        .map(|player| PlayerRow {
            reputation: graph.get_reputation(&player.id),
            trusted_by: graph.trusters_count(&player.id),
            trusts: graph.trustees_count(&player.id),
            name: player.name,
        })
        .collect();
    drop(graph);

    rows.sort_by(|a, b| {
        b.reputation
            .total_cmp(&a.reputation)
            .then_with(|| a.name.to_lowercase().cmp(&b.name.to_lowercase()))
    });
    Ok(rows)
}

/// Run the players command.
pub async fn run(state: &SharedReputation, format: OutputFormat) -> Result<(), Box<dyn std::error::Error>> {
    let rows = execute(state).await?;
    match format {
        OutputFormat::Table => {
            if rows.is_empty() {
                println!("No players have joined yet.");
            } else {
                println!("{}", format_table(&rows));
            }
        }
        OutputFormat::Json => println!("{}", format_json(&rows)),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::trust::execute_trust;
    use crate::shared::test_support::state_with_players;

    #[tokio::test]
    async fn rows_sorted_by_reputation_then_name() {
        let state = state_with_players("players", &["carol", "Bob", "alice", "dave"]).await;
        execute_trust(&state, "alice", "carol").await.unwrap();
        execute_trust(&state, "bob", "carol").await.unwrap();
        execute_trust(&state, "carol", "dave").await.unwrap();

        let rows = execute(&state).await.unwrap();
        let names: Vec<&str> = rows.iter().map(|r| r.name.as_str()).collect();
        // carol and dave tie at 2.0: dave gets carol at degree 0 plus
        // alice and bob at degree 1.
        assert_eq!(names, vec!["carol", "dave", "alice", "Bob"]);
        assert!((rows[0].reputation - 2.0).abs() < 1e-9);
        assert!((rows[1].reputation - 2.0).abs() < 1e-9);
        assert_eq!(rows[0].trusted_by, 2);
        assert_eq!(rows[0].trusts, 1);
        assert_eq!(rows[3].reputation, 0.0);
    }
}
