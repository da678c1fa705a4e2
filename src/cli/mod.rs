//! CLI interface for Genie

pub mod commands;
mod output;

pub use output::*;

use clap::{Parser, Subcommand, ValueEnum};

use crate::logging::LogLevel;

#[derive(Parser)]
#[command(name = "genie")]
#[command(version = "1.0.0")]
#[command(about = "Gateway and client for the Genie AI assistant", long_about = None)]
pub struct Cli {
    /// Minimum log severity (DEBUG, INFO, WARNING, ERROR, CRITICAL)
    #[arg(long, global = true)]
    pub log_level: Option<LogLevel>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Write a default genie.toml in the current directory
    Init,

    /// Start the HTTP gateway
    Serve {
        /// Host to bind to (defaults to server.host)
        #[arg(long)]
        host: Option<String>,

        /// Port to listen on (defaults to server.port)
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Log in and store the session token
    Login {
        #[arg(short, long)]
        username: String,

        /// Prompted for when omitted
        #[arg(long, env = "GENIE_PASSWORD", hide_env_values = true)]
        password: Option<String>,
    },

    /// Create an account, then log in with it
    Register {
        #[arg(short, long)]
        username: String,

        #[arg(short, long)]
        email: String,

        /// Prompted for when omitted
        #[arg(long, env = "GENIE_PASSWORD", hide_env_values = true)]
        password: Option<String>,
    },

    /// Forget the stored session token
    Logout,

    /// Show the user the stored token belongs to
    Whoami {
        #[arg(short, long, default_value = "table")]
        format: OutputFormat,
    },

    /// Send a question to the assistant
    Ask {
        message: String,
    },

    /// List backend users (admin only)
    Users {
        #[arg(short, long, default_value = "table")]
        format: OutputFormat,
    },

    /// List the gateway's agents
    Agents {
        /// Show activity and system status instead
        #[arg(long)]
        status: bool,

        #[arg(short, long, default_value = "table")]
        format: OutputFormat,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum OutputFormat {
    Table,
    Json,
    Yaml,
}
