//! CLI argument definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Top-level CLI parser for `pubcheck`.
#[derive(Debug, Parser)]
#[command(name = "pubcheck", version, about = "Grade and validate MQTT publisher assignments")]
pub struct Cli {
    /// The command to execute.
    #[command(subcommand)]
    pub command: Command,
}

/// Supported top-level subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Run the hosted static checks against the committed script.
    Grade {
        /// Root of the repository holding the graded script.
        #[arg(long, default_value = ".")]
        repo: PathBuf,
        /// Emit the full report as JSON instead of console text.
        #[arg(long)]
        json: bool,
        /// Disable colored output.
        #[arg(long)]
        no_color: bool,
    },
    /// Run the on-device validation stages and write marker files.
    Validate {
        /// Root of the repository holding the graded script.
        #[arg(long, default_value = ".")]
        repo: PathBuf,
        /// Disable colored output.
        #[arg(long)]
        no_color: bool,
    },
    /// List the marker files written by previous validation runs.
    Markers {
        /// Root of the repository holding the marker directory.
        #[arg(long, default_value = ".")]
        repo: PathBuf,
    },
}

impl Command {
    /// Returns `true` if colored output was disabled for this command.
    #[must_use]
    pub fn no_color(&self) -> bool {
        match self {
            Self::Grade { no_color, .. } | Self::Validate { no_color, .. } => *no_color,
            Self::Markers { .. } => false,
        }
    }
}
