// crates/repweb-cli/src/commands/join.rs
//
// `repweb join <name>` — register a player so others can trust them.

use repweb_core::{PlayerDirectory, PlayerRecord, RepwebError};

use crate::output::{format_json, OutputFormat};
use crate::shared::SharedReputation;

/// Register `name` under a fresh identity.
pub async fn execute(state: &SharedReputation, name: &str) -> Result<PlayerRecord, RepwebError> {
    let record = state.store.register_player(name).await?;
    tracing::info!(player = %record.name, id = %record.id, "player registered");
    Ok(record)
}

/// Run the join command.
pub async fn run(
    state: &SharedReputation,
    name: &str,
    format: OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    let record = execute(state, name).await?;
    match format {
        OutputFormat::Table => {
            println!("Welcome, {}.", record.name);
            println!("  Identity: {}", record.id);
        }
        OutputFormat::Json => println!("{}", format_json(&record)),
    }
    Ok(())
}
