// crates/repweb-cli/src/config.rs
//
// Runtime configuration for the repweb CLI.
// Loaded from a TOML file or populated with sensible defaults.

use serde::Deserialize;
use std::fs;
use std::path::Path;

use repweb_core::RepwebError;
use repweb_reputation::GraphParams;

/// Runtime configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct RepwebConfig {
    /// Directory for the RocksDB database.
    #[serde(default = "default_data_dir")]
    pub data_dir: String,

    /// Log level: "trace", "debug", "info", "warn", "error".
    /// Overridden by `RUST_LOG` when set.
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// How many top trusters `info` shows.
    #[serde(default = "default_top_trusters")]
    pub top_trusters: usize,

    /// Reputation tuning, fixed for the lifetime of the process.
    #[serde(default)]
    pub parameters: ParametersConfig,
}

/// The `[parameters]` table.
#[derive(Debug, Clone, Deserialize)]
pub struct ParametersConfig {
    /// Per-degree decay factor, in (0, 1).
    #[serde(default = "default_flow_factor")]
    pub flow_factor: f64,

    /// Maximum number of trust hops that influence a reputation.
    #[serde(default = "default_max_chain_length")]
    pub max_chain_length: u32,
}

fn default_data_dir() -> String {
    "~/.repweb/data".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_top_trusters() -> usize {
    5
}

fn default_flow_factor() -> f64 {
    0.5
}

fn default_max_chain_length() -> u32 {
    3
}

impl Default for ParametersConfig {
    fn default() -> Self {
        Self {
            flow_factor: default_flow_factor(),
            max_chain_length: default_max_chain_length(),
        }
    }
}

impl ParametersConfig {
    /// Validate into graph parameters. Misconfiguration is fatal.
    pub fn graph_params(&self) -> Result<GraphParams, RepwebError> {
        GraphParams::new(self.flow_factor, self.max_chain_length)
    }
}

impl Default for RepwebConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            log_level: default_log_level(),
            top_trusters: default_top_trusters(),
            parameters: ParametersConfig::default(),
        }
    }
}

impl RepwebConfig {
    /// Parse configuration from TOML text.
    pub fn from_toml(contents: &str) -> Result<Self, RepwebError> {
        toml::from_str(contents).map_err(|e| RepwebError::InvalidConfig(e.to_string()))
    }

    /// Load configuration from a TOML file at the given path.
    ///
    /// Returns `Ok(None)` if the file does not exist, and an error if it
    /// exists but cannot be read or parsed.
    pub fn load(path: &str) -> Result<Option<Self>, RepwebError> {
        let path = expand_tilde(path);
        if !Path::new(&path).exists() {
            return Ok(None);
        }
        let contents = fs::read_to_string(&path)
            .map_err(|e| RepwebError::InvalidConfig(format!("Failed to read {}: {}", path, e)))?;
        Self::from_toml(&contents).map(Some)
    }

    /// The data directory with a leading `~/` expanded.
    pub fn resolved_data_dir(&self) -> String {
        expand_tilde(&self.data_dir)
    }
}

/// Expand a leading `~/` to the user's home directory.
pub fn expand_tilde(path: &str) -> String {
    if let Some(rest) = path.strip_prefix("~/") {
        if let Some(home) = dirs::home_dir() {
            return format!("{}/{}", home.display(), rest);
        }
    }
    path.to_string()
}
