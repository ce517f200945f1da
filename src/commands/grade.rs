//! `pubcheck grade` — the hosted static check suite.
//!
//! Inspects the committed script purely as text and reports pass/fail
//! per milestone with remediation text. Never executes the script and
//! needs no network or hardware, so it runs unmodified in CI.

use std::io::Write;
use std::path::Path;

use crate::checks::{self, CheckStatus, GradeReport};
use crate::context::ServiceContext;
use crate::report::Reporter;

/// Executes the `grade` command against the repository at `repo`.
///
/// Returns `Ok(true)` when every check passed.
///
/// # Errors
///
/// Returns an error string if the script exists but cannot be read, or
/// if JSON serialization fails.
pub fn run_with_context<W: Write>(
    ctx: &ServiceContext,
    reporter: &mut Reporter<W>,
    repo: &Path,
    json: bool,
) -> Result<bool, String> {
    let script_path = repo.join(checks::SCRIPT_FILE);
    let script = if ctx.fs.exists(&script_path) {
        Some(
            ctx.fs
                .read_to_string(&script_path)
                .map_err(|e| format!("Failed to read {}: {e}", script_path.display()))?,
        )
    } else {
        None
    };

    let report = checks::grade(script.as_deref());

    if json {
        let rendered = serde_json::to_string_pretty(&report)
            .map_err(|e| format!("Failed to serialize report: {e}"))?;
        reporter.line(&rendered);
    } else {
        render(reporter, &report);
    }

    Ok(report.passed())
}

fn render<W: Write>(reporter: &mut Reporter<W>, report: &GradeReport) {
    for milestone in &report.milestones {
        reporter.header(&format!(
            "{} ({}/{} pts)",
            milestone.name.to_uppercase(),
            milestone.points_earned,
            milestone.points_possible,
        ));
        for check in &milestone.checks {
            match check.status {
                CheckStatus::Passed => reporter.success(&format!("{}: {}", check.name, check.detail)),
                CheckStatus::Skipped => reporter.skip(&format!("{}: {}", check.name, check.detail)),
                CheckStatus::Failed => {
                    reporter.fail(&format!("{}: {}", check.name, check.detail));
                    if !check.expected.is_empty() {
                        reporter.line(&format!("  expected: {}", check.expected));
                        reporter.line(&format!("  actual:   {}", check.actual));
                    }
                    if !check.suggestion.is_empty() {
                        reporter.line("  suggestion:");
                        for line in check.suggestion.lines() {
                            reporter.line(&format!("    {line}"));
                        }
                    }
                }
            }
        }
    }

    reporter.header("FINAL RESULTS");
    let verdict = if report.passed() { "PASSED" } else { "FAILED" };
    reporter.line(&format!(
        "Score: {}/{} — {verdict}",
        report.points_earned(),
        report.points_possible(),
    ));
    reporter.blank();
}
