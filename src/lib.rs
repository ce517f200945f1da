//! Core library for the `pubcheck` CLI.
//!
//! Two roles compose over a filesystem contract: `grade` re-derives
//! static checks from the committed script text (hosted side, no
//! hardware), and `validate` runs the on-device stages and writes
//! timestamped marker files for the commit (student side).

pub mod adapters;
pub mod checks;
pub mod cli;
pub mod commands;
pub mod connect;
pub mod context;
pub mod markers;
pub mod ports;
pub mod report;

use clap::Parser;

/// Run the CLI with the provided arguments.
///
/// Returns `Ok(true)` when the selected command's checks all passed.
///
/// # Errors
///
/// Returns an error string when argument parsing fails or command
/// execution fails.
pub fn run<I, T>(args: I) -> Result<bool, String>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    let cli = cli::Cli::try_parse_from(args).map_err(|err| err.to_string())?;
    commands::dispatch(&cli.command)
}
