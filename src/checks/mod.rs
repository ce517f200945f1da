//! Static checks over the graded script.
//!
//! Every rule is a pure predicate over the script text: no execution,
//! no network, no filesystem. The rules live in `rules`, the structural
//! source scanner in `syntax`, and the milestone grouping (with point
//! totals) in `milestones`.

pub mod milestones;
pub mod rules;
pub mod syntax;

use serde::Serialize;

pub use milestones::{grade, GradeReport, MilestoneResult};
pub use rules::{RuleDef, RuleVerdict};

/// Filename of the graded script, at the target repository root.
pub const SCRIPT_FILE: &str = "mqtt_publisher.py";

/// Outcome kind of a single check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CheckStatus {
    /// The required idiom was found.
    Passed,
    /// The required idiom was missing (or a forbidden one was present).
    Failed,
    /// The check could not run, usually because the script is absent.
    /// Distinct from `Failed`: absence of the artifact is not a failed
    /// attempt.
    Skipped,
}

/// Result of a single check, ready for console or JSON rendering.
#[derive(Debug, Clone, Serialize)]
pub struct CheckResult {
    /// Stable check identifier (e.g. `feed-key-format`).
    pub name: String,
    /// Points this check is worth within its milestone.
    pub points: u32,
    /// Outcome kind.
    pub status: CheckStatus,
    /// One-line account of what was observed.
    pub detail: String,
    /// What the rule expected to find.
    pub expected: String,
    /// What was actually found.
    pub actual: String,
    /// Remediation text shown on failure.
    pub suggestion: String,
}

impl CheckResult {
    /// Returns `true` if the check passed.
    #[must_use]
    pub fn passed(&self) -> bool {
        self.status == CheckStatus::Passed
    }
}
