//! Milestone grouping and the grade entry point.
//!
//! A milestone is a named group of checks worth a fixed point total.
//! The groups and point values mirror the course rubric: environment
//! setup, publishing, and robust connection handling.

use serde::Serialize;

use crate::checks::rules::{self, RuleDef};
use crate::checks::{CheckResult, CheckStatus};

/// A milestone definition: a name and its rules.
pub struct Milestone {
    /// Display name.
    pub name: &'static str,
    /// Rules graded under this milestone.
    pub rules: &'static [RuleDef],
}

/// Milestone 1 — is the environment set up safely?
pub const ENVIRONMENT_SETUP: Milestone = Milestone {
    name: "Environment Setup",
    rules: &[
        RuleDef { name: "syntax-valid", points: 5, check: rules::syntax_valid },
        RuleDef { name: "client-library-import", points: 5, check: rules::client_library_import },
        RuleDef { name: "credential-variables", points: 5, check: rules::credential_variables },
        RuleDef { name: "no-hardcoded-secret", points: 5, check: rules::no_hardcoded_secret },
    ],
};

/// Milestone 2 — does the script publish correctly?
pub const MQTT_PUBLISHING: Milestone = Milestone {
    name: "MQTT Publishing",
    rules: &[
        RuleDef { name: "client-creation", points: 10, check: rules::client_creation },
        RuleDef { name: "publish-call", points: 10, check: rules::publish_call },
        RuleDef { name: "multiple-feeds", points: 8, check: rules::multiple_feeds },
        RuleDef { name: "feed-key-format", points: 7, check: rules::feed_key_format },
    ],
};

/// Milestone 3 — does the script survive connection loss?
pub const ROBUST_CONNECTION: Milestone = Milestone {
    name: "Robust Connection",
    rules: &[
        RuleDef { name: "reconnection-pattern", points: 15, check: rules::reconnection_pattern },
        RuleDef { name: "delay-constants", points: 10, check: rules::delay_constants },
        RuleDef { name: "buffer-pattern", points: 7, check: rules::buffer_pattern },
        RuleDef { name: "non-blocking-loop", points: 8, check: rules::non_blocking_loop },
    ],
};

/// Points the script-existence check is worth (part of milestone 1).
const SCRIPT_EXISTS_POINTS: u32 = 5;

/// All milestones in rubric order.
pub const ALL: &[&Milestone] = &[&ENVIRONMENT_SETUP, &MQTT_PUBLISHING, &ROBUST_CONNECTION];

/// Per-milestone grading outcome.
#[derive(Debug, Clone, Serialize)]
pub struct MilestoneResult {
    /// Milestone display name.
    pub name: String,
    /// Maximum points available.
    pub points_possible: u32,
    /// Points earned by passing checks.
    pub points_earned: u32,
    /// Individual check results.
    pub checks: Vec<CheckResult>,
}

/// The full grading report across all milestones.
#[derive(Debug, Clone, Serialize)]
pub struct GradeReport {
    /// Per-milestone results, in rubric order.
    pub milestones: Vec<MilestoneResult>,
}

impl GradeReport {
    /// Returns `true` if no check in any milestone failed.
    ///
    /// A skipped check earns no points but does not block a green run;
    /// a missing script still fails overall because the existence
    /// check itself fails.
    #[must_use]
    pub fn passed(&self) -> bool {
        self.milestones
            .iter()
            .flat_map(|m| &m.checks)
            .all(|c| c.status != CheckStatus::Failed)
    }

    /// Total points earned across milestones.
    #[must_use]
    pub fn points_earned(&self) -> u32 {
        self.milestones.iter().map(|m| m.points_earned).sum()
    }

    /// Total points possible across milestones.
    #[must_use]
    pub fn points_possible(&self) -> u32 {
        self.milestones.iter().map(|m| m.points_possible).sum()
    }
}

fn existence_check(script: Option<&str>) -> CheckResult {
    match script {
        Some(_) => CheckResult {
            name: "script-exists".to_string(),
            points: SCRIPT_EXISTS_POINTS,
            status: CheckStatus::Passed,
            detail: "mqtt_publisher.py is present".to_string(),
            expected: String::new(),
            actual: String::new(),
            suggestion: String::new(),
        },
        None => CheckResult {
            name: "script-exists".to_string(),
            points: SCRIPT_EXISTS_POINTS,
            status: CheckStatus::Failed,
            detail: "mqtt_publisher.py not found".to_string(),
            expected: "mqtt_publisher.py at the repository root".to_string(),
            actual: "file not found".to_string(),
            suggestion: "Create mqtt_publisher.py with your MQTT publishing code.".to_string(),
        },
    }
}

fn run_rule(rule: &RuleDef, script: Option<&str>) -> CheckResult {
    let verdict = match script {
        Some(text) => (rule.check)(text),
        // The artifact is absent, which is not the same as a failed
        // attempt at this rule.
        None => rules::RuleVerdict {
            status: CheckStatus::Skipped,
            detail: "skipped: mqtt_publisher.py not found".to_string(),
            expected: String::new(),
            actual: String::new(),
            suggestion: String::new(),
        },
    };
    CheckResult {
        name: rule.name.to_string(),
        points: rule.points,
        status: verdict.status,
        detail: verdict.detail,
        expected: verdict.expected,
        actual: verdict.actual,
        suggestion: verdict.suggestion,
    }
}

/// Grades the script text against every milestone.
///
/// `script` is `None` when the file is absent; in that case the
/// existence check fails and every other check reports skipped.
#[must_use]
pub fn grade(script: Option<&str>) -> GradeReport {
    let mut milestones = Vec::with_capacity(ALL.len());

    for (index, milestone) in ALL.iter().enumerate() {
        let mut checks = Vec::new();
        // The existence check opens the first milestone; everything else
        // depends on the script's content.
        if index == 0 {
            checks.push(existence_check(script));
        }
        checks.extend(milestone.rules.iter().map(|rule| run_rule(rule, script)));

        let points_possible = checks.iter().map(|c| c.points).sum();
        let points_earned = checks.iter().filter(|c| c.passed()).map(|c| c.points).sum();
        milestones.push(MilestoneResult {
            name: milestone.name.to_string(),
            points_possible,
            points_earned,
            checks,
        });
    }

    GradeReport { milestones }
}
