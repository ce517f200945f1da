//! Command dispatch and handlers.

pub mod grade;
pub mod markers;
pub mod validate;

use std::io::Write;

use crate::cli::Command;
use crate::context::ServiceContext;
use crate::report::Reporter;

/// Dispatch a parsed command to its handler with live adapters.
///
/// Returns `Ok(true)` when the command's checks all passed, which the
/// caller maps onto the process exit code.
///
/// # Errors
///
/// Returns an error string if the selected command handler fails.
pub fn dispatch(command: &Command) -> Result<bool, String> {
    // Credentials may live in a .env file next to the student's script;
    // absence is fine.
    let _ = dotenvy::dotenv();

    let ctx = ServiceContext::live()?;
    let color = !command.no_color();
    let mut reporter = Reporter::stdout(color);
    dispatch_with_context(command, &ctx, &mut reporter)
}

/// Dispatch a command with the given service context and reporter.
pub fn dispatch_with_context<W: Write>(
    command: &Command,
    ctx: &ServiceContext,
    reporter: &mut Reporter<W>,
) -> Result<bool, String> {
    match command {
        Command::Grade { repo, json, .. } => grade::run_with_context(ctx, reporter, repo, *json),
        Command::Validate { repo, .. } => validate::run_with_context(ctx, reporter, repo),
        Command::Markers { repo } => markers::run_with_context(ctx, reporter, repo),
    }
}
