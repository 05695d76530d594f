//! CLI command definitions for the `chatrelay` binary.
//!
//! `serve` runs the relay; the remaining commands inspect and reset stored
//! sessions directly through the conversation store.

pub mod session;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use clap_complete::Shell;

/// Relay browser chat sessions to a hosted language model.
#[derive(Parser)]
#[command(name = "chatrelay", version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output machine-readable JSON instead of styled text.
    #[arg(long, global = true)]
    pub json: bool,

    /// Suppress all output except errors.
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Detailed output (-v for verbose, -vv for debug/trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Directory holding config.toml and chatrelay.db (default: ~/.chatrelay).
    #[arg(long, global = true, env = "CHATRELAY_DATA_DIR")]
    pub data_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the HTTP relay server.
    Serve {
        /// Port to listen on (overrides config.toml).
        #[arg(short, long, env = "CHATRELAY_PORT")]
        port: Option<u16>,

        /// Host to bind to (overrides config.toml).
        #[arg(long, env = "CHATRELAY_HOST")]
        host: Option<String>,

        /// Keep history in memory instead of SQLite.
        #[arg(long)]
        memory: bool,

        /// Export trace spans via OpenTelemetry (stdout exporter).
        #[arg(long)]
        otel: bool,
    },

    /// Print the messages of a session.
    History {
        /// Session identifier.
        session_id: String,
    },

    /// Delete all messages of a session.
    Reset {
        /// Session identifier.
        session_id: String,
    },

    /// List stored sessions.
    Sessions,

    /// Generate shell completions.
    Completions {
        /// Shell to generate completions for.
        shell: Shell,
    },
}
