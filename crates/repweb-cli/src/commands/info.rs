// crates/repweb-cli/src/commands/info.rs
//
// `repweb info <name>` — reputation summary for one player.

use serde::Serialize;
use tabled::Tabled;

use repweb_core::RepwebError;

use crate::output::{count_players, format_json, format_reputation, format_table, OutputFormat};
use crate::shared::SharedReputation;

/// One of the player's most reputable trusters.
#[derive(Debug, Serialize, Tabled)]
pub struct TrusterEntry {
    #[tabled(rename = "Truster")]
    pub name: String,
    #[tabled(rename = "Reputation", display_with = "display_reputation")]
    pub reputation: f64,
}

fn display_reputation(value: &f64) -> String {
    format_reputation(*value)
}

/// Reputation information about a player.
#[derive(Debug, Serialize)]
pub struct InfoReport {
    pub player: String,
    pub reputation: f64,
    pub trusted_by: usize,
    pub trusts: usize,
    /// Most reputable trusters, highest first.
    pub top_trusters: Vec<TrusterEntry>,
}

/// Gather the report for `name`, listing at most `top` trusters.
pub async fn execute(state: &SharedReputation, name: &str, top: usize) -> Result<InfoReport, RepwebError> {
    let player = state.resolve(name).await?;

    let (reputation, trusted_by, trusts, scored) = {
        let mut graph = state.graph.lock().await;
        (
            graph.get_reputation(&player.id),
            graph.trusters_count(&player.id),
            graph.trustees_count(&player.id),
            graph.get_top_trusters_scored(&player.id, top),
        )
    };

    let mut top_trusters = Vec::with_capacity(scored.len());
    for (id, score) in scored {
        top_trusters.push(TrusterEntry {
            name: state.display_name(&id).await?,
            reputation: score,
        });
    }

    Ok(InfoReport {
        player: player.name,
        reputation,
        trusted_by,
        trusts,
        top_trusters,
    })
}

/// Run the info command.
pub async fn run(
    state: &SharedReputation,
    name: &str,
    top: usize,
    format: OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    let report = execute(state, name, top).await?;
    match format {
        OutputFormat::Table => {
            println!("==== Reputation Information ====");
            println!("Player: {}", report.player);
            println!("Reputation: {}", format_reputation(report.reputation));
            println!(
                "Trusted by {}. Trusts {}.",
                count_players(report.trusted_by),
                count_players(report.trusts)
            );
            if !report.top_trusters.is_empty() {
                println!("Most reputable players who trust {}:", report.player);
                println!("{}", format_table(&report.top_trusters));
            }
        }
        OutputFormat::Json => println!("{}", format_json(&report)),
    }
    Ok(())
}
