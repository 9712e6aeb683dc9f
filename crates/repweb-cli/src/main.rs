// crates/repweb-cli/src/main.rs
//
// CLI entrypoint for repweb, a player trust graph and reputation engine.
//
// Players join, declare trust in one another, and query the decayed
// reputation and chains of trust that result. Every command opens the
// RocksDB store, replays stored edges into the in-memory graph, and exits.

mod commands;
mod config;
mod output;
mod shared;

use clap::{Parser, Subcommand};
use commands::trust::TrustArgs;
use config::RepwebConfig;
use output::OutputFormat;
use shared::SharedReputation;

/// repweb — trust graph and reputation engine for game communities.
#[derive(Parser, Debug)]
#[command(
    name = "repweb",
    version = "0.1.0",
    about = "Track who trusts whom and derive decayed reputation scores"
)]
struct Cli {
    /// Path to the TOML configuration file.
    #[arg(long, global = true, default_value = "~/.repweb/config.toml")]
    config: String,

    /// Override the configured data directory.
    #[arg(long, global = true)]
    data_dir: Option<String>,

    /// Output format.
    #[arg(long, global = true, value_enum, default_value = "table")]
    format: OutputFormat,

    #[command(subcommand)]
    command: Commands,
}

/// Top-level subcommands.
#[derive(Debug, Subcommand)]
enum Commands {
    /// Register a new player.
    Join {
        /// Player name, unique ignoring case.
        name: String,
    },

    /// Declare that one player trusts another.
    Trust(TrustArgs),

    /// Withdraw a previously declared trust.
    Untrust(TrustArgs),

    /// Show a player's reputation and most reputable trusters.
    Info {
        /// Player name.
        name: String,
    },

    /// Show a shortest chain of trust between two players.
    Connection {
        /// Player the chain starts from.
        from: String,
        /// Player the chain ends at.
        to: String,
    },

    /// List every registered player with their reputation.
    Players,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    if let Err(e) = run(cli).await {
        eprintln!("{}", e);
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let loaded = RepwebConfig::load(&cli.config)?;
    let found = loaded.is_some();
    let mut config = loaded.unwrap_or_default();

    // --data-dir overrides the config file value.
    if let Some(dir) = &cli.data_dir {
        config.data_dir = dir.clone();
    }

    // RUST_LOG wins over the configured level. Logs go to stderr so JSON
    // output on stdout stays parseable.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.log_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    if found {
        tracing::info!("Loaded configuration from {}", cli.config);
    } else {
        tracing::warn!("No configuration at {}. Using defaults.", cli.config);
    }

    let params = config.parameters.graph_params()?;
    let data_dir = config.resolved_data_dir();
    tracing::debug!("Data directory: {}", data_dir);
    let state = SharedReputation::open(&data_dir, params).await?;

    match &cli.command {
        Commands::Join { name } => commands::join::run(&state, name, cli.format).await?,
        Commands::Trust(args) => commands::trust::run_trust(&state, args, cli.format).await?,
        Commands::Untrust(args) => commands::trust::run_untrust(&state, args, cli.format).await?,
        Commands::Info { name } => {
            commands::info::run(&state, name, config.top_trusters, cli.format).await?
        }
        Commands::Connection { from, to } => {
            commands::connection::run(&state, from, to, cli.format).await?
        }
        Commands::Players => commands::players::run(&state, cli.format).await?,
    }

    Ok(())
}
