//! Command definitions for the `reskit` CLI.

use clap::{Args, Subcommand};

/// Arguments for the `status` command.
#[derive(Debug, Args)]
pub struct StatusCommand {
    /// Output status as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `search` command.
#[derive(Debug, Args)]
pub struct SearchCommand {
    /// The query to score against the catalog
    pub query: String,

    /// Maximum number of results to show (overrides config)
    #[arg(short, long)]
    pub limit: Option<usize>,
}

/// Arguments for the `logout` command.
#[derive(Debug, Args)]
pub struct LogoutCommand {
    /// Skip the confirmation prompt
    #[arg(short = 'y', long)]
    pub yes: bool,
}

/// Configuration subcommands.
#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Show the effective configuration
    Show,
    /// Print the configuration file path
    Path,
}
