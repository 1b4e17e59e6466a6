use clap::{Parser, Subcommand};
use serde::{Deserialize, Serialize};

use crate::backend::http::DEFAULT_DUMP_PORT;

// ============================================================================
// CLI Argument Parsing (clap derive)
// ============================================================================

#[derive(Parser, Debug)]
#[command(
    name = "ui-inspector",
    version,
    about = "Reconstruct and inspect the UI element hierarchy of a mobile app under test"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Path to config file (default: ui-inspector.yaml in current dir)
    #[arg(long, global = true)]
    pub config: Option<String>,

    /// Append JSONL trace events to this file
    #[arg(long, global = true)]
    pub trace: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print the current screen from the test server's hierarchy dump
    Dump {
        /// Test server host
        #[arg(long)]
        host: Option<String>,

        /// Test server port
        #[arg(long)]
        port: Option<u16>,

        /// Output format: text or json
        #[arg(long, default_value = "text")]
        format: String,
    },

    /// Rebuild the hierarchy through selector queries
    Tree {
        /// Base selector whose matches are placed in the tree
        #[arg(long, default_value = "*")]
        selector: String,

        /// Selector of the element to root the tree at (first match is used)
        #[arg(long)]
        root: Option<String>,

        /// Output format: text or json
        #[arg(long, default_value = "text")]
        format: String,
    },

    /// Run a single selector query
    Query {
        /// Selector to query
        #[arg(long)]
        selector: String,

        /// Print this property of the first match instead of the matches
        #[arg(long)]
        property: Option<String>,
    },
}

// ============================================================================
// Config File Model (optional YAML)
// ============================================================================

/// Optional YAML config file: `ui-inspector.yaml`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub bridge: BridgeConfig,
    #[serde(default)]
    pub dump: DumpConfig,
    #[serde(default)]
    pub trace: TraceConfig,
}

/// Backend process speaking the NDJSON query protocol.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BridgeConfig {
    #[serde(default = "default_bridge_command")]
    pub command: String,

    #[serde(default)]
    pub args: Vec<String>,
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            command: default_bridge_command(),
            args: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DumpConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for DumpConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: DEFAULT_DUMP_PORT,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct TraceConfig {
    pub path: Option<String>,
}

// Serde default helpers
fn default_bridge_command() -> String { "ruby".to_string() }
fn default_host() -> String { "localhost".to_string() }
fn default_port() -> u16 { DEFAULT_DUMP_PORT }

// ============================================================================
// Config File Loading
// ============================================================================

/// Load config from a YAML file. Returns defaults if file is missing or malformed.
pub fn load_config(path: Option<&str>) -> AppConfig {
    let config_path = path.unwrap_or("ui-inspector.yaml");
    match std::fs::read_to_string(config_path) {
        Ok(content) => serde_yaml::from_str(&content).unwrap_or_default(),
        Err(_) => AppConfig::default(),
    }
}

/// Resolve the dump endpoint: CLI > config.
pub fn resolve_dump_endpoint(
    host: Option<&str>,
    port: Option<u16>,
    config: &DumpConfig,
) -> (String, u16) {
    (
        host.unwrap_or(&config.host).to_string(),
        port.unwrap_or(config.port),
    )
}
