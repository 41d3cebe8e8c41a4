//! Command-line interface for rescuekit.
//!
//! This module provides the CLI structure and command handlers for the
//! `reskit` binary.

mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

pub use commands::{ConfigCommand, LogoutCommand, SearchCommand, StatusCommand};

/// reskit - Rescuer onboarding and search toolkit
///
/// Inspect and drive the local onboarding session for the disaster-rescue
/// coordination service, and search its navigation catalog.
#[derive(Debug, Parser)]
#[command(name = "reskit")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to custom configuration file
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Increase verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// The command to execute
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Show the onboarding status of the stored session
    Status(StatusCommand),

    /// Show the next required onboarding step
    Next,

    /// Search the navigation catalog
    Search(SearchCommand),

    /// Clear the stored session (identity, artifacts, tokens)
    Logout(LogoutCommand),

    /// View configuration
    #[command(subcommand)]
    Config(ConfigCommand),
}

impl Cli {
    /// Get the verbosity level based on flags.
    #[must_use]
    pub fn verbosity(&self) -> crate::logging::Verbosity {
        if self.quiet {
            crate::logging::Verbosity::Quiet
        } else {
            match self.verbose {
                0 => crate::logging::Verbosity::Normal,
                1 => crate::logging::Verbosity::Verbose,
                _ => crate::logging::Verbosity::Trace,
            }
        }
    }
}
