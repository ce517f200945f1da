//! Named rule predicates over the graded script text.
//!
//! Each rule inspects the script as a string and returns a structured
//! verdict. Rules are independent and order-insensitive; none of them
//! executes the script or touches the network. The pattern matching is
//! deliberately coarse — these are teaching heuristics, not a parser.

use std::sync::OnceLock;

use regex::Regex;

use crate::checks::syntax;
use crate::checks::CheckStatus;

/// Structured verdict produced by a single rule.
#[derive(Debug, Clone)]
pub struct RuleVerdict {
    /// Outcome kind.
    pub status: CheckStatus,
    /// One-line account of what was observed.
    pub detail: String,
    /// What the rule expected to find (empty on pass/skip).
    pub expected: String,
    /// What was actually found (empty on pass/skip).
    pub actual: String,
    /// Remediation text (empty on pass/skip).
    pub suggestion: String,
}

impl RuleVerdict {
    fn pass(detail: impl Into<String>) -> Self {
        Self {
            status: CheckStatus::Passed,
            detail: detail.into(),
            expected: String::new(),
            actual: String::new(),
            suggestion: String::new(),
        }
    }

    fn fail(
        detail: impl Into<String>,
        expected: impl Into<String>,
        actual: impl Into<String>,
        suggestion: impl Into<String>,
    ) -> Self {
        Self {
            status: CheckStatus::Failed,
            detail: detail.into(),
            expected: expected.into(),
            actual: actual.into(),
            suggestion: suggestion.into(),
        }
    }

    fn skip(detail: impl Into<String>) -> Self {
        Self {
            status: CheckStatus::Skipped,
            detail: detail.into(),
            expected: String::new(),
            actual: String::new(),
            suggestion: String::new(),
        }
    }
}

/// A named rule with its milestone point value.
pub struct RuleDef {
    /// Stable identifier used in reports.
    pub name: &'static str,
    /// Points the rule is worth.
    pub points: u32,
    /// The predicate itself.
    pub check: fn(&str) -> RuleVerdict,
}

fn secret_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r#"["']aio_[a-zA-Z0-9]{20,}["']"#).expect("secret pattern is valid")
    })
}

fn feed_literal_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r#"\.publish\s*\(\s*['"]([^'"]+)['"]"#).expect("feed pattern is valid")
    })
}

fn delay_constant_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(MIN_DELAY|MAX_DELAY|INITIAL_DELAY|DELAY)\s*=\s*\d+")
            .expect("delay pattern is valid")
    })
}

/// Structural validity of the source (delimiters, string literals).
pub fn syntax_valid(script: &str) -> RuleVerdict {
    match syntax::scan(script) {
        Ok(()) => RuleVerdict::pass("source is structurally valid"),
        Err(e) => RuleVerdict::fail(
            format!("structural error on line {}: {}", e.line, e.message),
            "structurally valid source",
            format!("line {}: {}", e.line, e.message),
            format!("Check line {} for the reported error.", e.line),
        ),
    }
}

/// Presence of the client-library import.
pub fn client_library_import(script: &str) -> RuleVerdict {
    let found = ["Adafruit_IO", "adafruit_io", "MQTTClient"]
        .iter()
        .find(|needle| script.contains(*needle));
    match found {
        Some(needle) => RuleVerdict::pass(format!("found `{needle}`")),
        None => RuleVerdict::fail(
            "no client-library import found",
            "Adafruit IO import",
            "no import of the MQTT client library",
            "Add the import at the top of your script:\n  from Adafruit_IO import MQTTClient",
        ),
    }
}

/// Presence of credential variable names for both username and key.
pub fn credential_variables(script: &str) -> RuleVerdict {
    let lower = script.to_lowercase();
    let mentions_platform = lower.contains("adafruit") || lower.contains("aio");

    let has_username = script.contains("ADAFRUIT_IO_USERNAME")
        || script.contains("AIO_USERNAME")
        || (lower.contains("username") && mentions_platform);
    let has_key = script.contains("ADAFRUIT_IO_KEY")
        || script.contains("AIO_KEY")
        || (lower.contains("key") && mentions_platform);

    if has_username && has_key {
        RuleVerdict::pass("username and key variables are present")
    } else {
        RuleVerdict::fail(
            format!("missing credential variables (username={has_username}, key={has_key})"),
            "credential variables for both username and key",
            format!("username found: {has_username}, key found: {has_key}"),
            "Define credential variables from the environment:\n  \
             ADAFRUIT_IO_USERNAME = os.environ.get('ADAFRUIT_IO_USERNAME')\n  \
             ADAFRUIT_IO_KEY = os.environ.get('ADAFRUIT_IO_KEY')",
        )
    }
}

/// Absence of a hardcoded API key. A match always fails, regardless of
/// every other rule's outcome.
pub fn no_hardcoded_secret(script: &str) -> RuleVerdict {
    if secret_pattern().is_match(script) {
        RuleVerdict::fail(
            "SECURITY: hardcoded API key detected",
            "no API keys in source code",
            "a string literal matching the platform key shape",
            "Never commit API keys. Read them from the environment instead:\n  \
             ADAFRUIT_IO_KEY = os.environ.get('ADAFRUIT_IO_KEY')\n\
             and set it before running:\n  \
             export ADAFRUIT_IO_KEY='your_key_here'",
        )
    } else {
        RuleVerdict::pass("no hardcoded API keys found")
    }
}

/// Presence of an MQTT client construction.
pub fn client_creation(script: &str) -> RuleVerdict {
    let lower = script.to_lowercase();
    let created = script.contains("MQTTClient(")
        || lower.contains("mqtt_client")
        || (lower.contains("client = ") && lower.contains("mqtt"));
    if created {
        RuleVerdict::pass("client construction found")
    } else {
        RuleVerdict::fail(
            "no MQTT client construction found",
            "an MQTTClient instantiation",
            "no client construction",
            "Create the client from your credentials:\n  \
             client = MQTTClient(ADAFRUIT_IO_USERNAME, ADAFRUIT_IO_KEY)",
        )
    }
}

/// Presence of a publish call or a publish-named function.
pub fn publish_call(script: &str) -> RuleVerdict {
    if script.contains(".publish(") || script.to_lowercase().contains("def publish") {
        RuleVerdict::pass("publish call found")
    } else {
        RuleVerdict::fail(
            "no publish call or publish function found",
            "a client.publish() call or a publish function",
            "no publishing code",
            "Publish each sensor value to its feed:\n  \
             client.publish('temperature', temp)\n  \
             client.publish('humidity', humidity)",
        )
    }
}

/// Keyword groups counted by the multi-feed rule. Synonyms within a
/// group count once.
const FEED_KEYWORD_GROUPS: &[&[&str]] = &[
    &["temperature"],
    &["humidity", "humidite"],
    &["pressure"],
    &["luminosity", "light"],
];

/// At least two distinct feed keywords, as a proxy for publishing
/// multiple independent data channels.
pub fn multiple_feeds(script: &str) -> RuleVerdict {
    let lower = script.to_lowercase();
    let count = FEED_KEYWORD_GROUPS
        .iter()
        .filter(|group| group.iter().any(|kw| lower.contains(kw)))
        .count();
    if count >= 2 {
        RuleVerdict::pass(format!("found {count} distinct feed keywords"))
    } else {
        RuleVerdict::fail(
            format!("found {count} distinct feed keywords, need at least 2"),
            "at least 2 distinct feed references",
            format!("{count} feed keywords"),
            "Publish each sensor value to its own feed:\n  \
             client.publish('temperature', temp)\n  \
             client.publish('humidity', humidity)",
        )
    }
}

/// Every feed literal passed to a publish call must be lowercase.
/// Uppercase feed keys 404 against the platform, whose keys are always
/// lowercase even when the display name is not.
pub fn feed_key_format(script: &str) -> RuleVerdict {
    let feeds: Vec<&str> = feed_literal_pattern()
        .captures_iter(script)
        .filter_map(|c| c.get(1))
        .map(|m| m.as_str())
        .collect();

    if feeds.is_empty() {
        return RuleVerdict::skip("no publish calls with feed literals to check");
    }

    let bad: Vec<&str> =
        feeds.iter().copied().filter(|f| f.chars().any(char::is_uppercase)).collect();
    if bad.is_empty() {
        RuleVerdict::pass(format!("all {} feed keys are lowercase", feeds.len()))
    } else {
        RuleVerdict::fail(
            format!("uppercase feed keys: {}", bad.join(", ")),
            "lowercase feed keys",
            format!("uppercase characters in: {}", bad.join(", ")),
            "Feed keys are always lowercase on the platform; uppercase keys cause 404 errors.\n  \
             client.publish('temperature', value)  # correct\n  \
             client.publish('Temperature', value)  # 404!",
        )
    }
}

/// Presence of reconnection vocabulary.
pub fn reconnection_pattern(script: &str) -> RuleVerdict {
    let lower = script.to_lowercase();
    let found = lower.contains("reconnect")
        || script.contains("on_disconnect")
        || lower.contains("backoff")
        || (lower.contains("retry") && lower.contains("connect"));
    if found {
        RuleVerdict::pass("reconnection handling found")
    } else {
        RuleVerdict::fail(
            "no reconnection pattern found",
            "reconnection handling",
            "no reconnect, on_disconnect, backoff, or retry logic",
            "Connections drop; without reconnection your program stops publishing.\n  \
             def on_disconnect(client):\n      reconnect_with_backoff(client)\n  \
             client.on_disconnect = on_disconnect",
        )
    }
}

/// Presence of numeric backoff-delay constants.
pub fn delay_constants(script: &str) -> RuleVerdict {
    let lower = script.to_lowercase();
    let found = delay_constant_pattern().is_match(script)
        || (lower.contains("backoff") && (lower.contains("delay") || lower.contains("interval")));
    if found {
        RuleVerdict::pass("backoff delay constants found")
    } else {
        RuleVerdict::fail(
            "no delay constants found",
            "delay constants for backoff",
            "no MIN_DELAY/MAX_DELAY style constants",
            "Define backoff bounds so the retry delay is configurable:\n  \
             MIN_DELAY = 1    # start with 1 second\n  \
             MAX_DELAY = 120  # cap at 2 minutes",
        )
    }
}

/// Presence of buffering vocabulary for data produced while offline.
pub fn buffer_pattern(script: &str) -> RuleVerdict {
    let lower = script.to_lowercase();
    let found = ["buffer", "queue", "pending", "cache"].iter().any(|kw| lower.contains(kw));
    if found {
        RuleVerdict::pass("buffering pattern found")
    } else {
        RuleVerdict::fail(
            "no buffer pattern found",
            "data buffering for disconnections",
            "no buffer, queue, pending, or cache vocabulary",
            "Sensor data produced while disconnected is lost without a buffer:\n  \
             data_buffer = []\n  \
             if not connected:\n      data_buffer.append((feed, value))",
        )
    }
}

/// Presence of a non-blocking processing loop. A blocking loop without
/// a non-blocking one is an explicit failure: it prevents concurrent
/// sensor I/O.
pub fn non_blocking_loop(script: &str) -> RuleVerdict {
    let lower = script.to_lowercase();
    let has_non_blocking = script.contains("loop_background")
        || script.contains("loop_start")
        || (script.contains("threading") && lower.contains("loop"));
    let has_blocking = script.contains("loop_blocking") || script.contains(".loop()");

    if has_non_blocking {
        RuleVerdict::pass("non-blocking loop found")
    } else if has_blocking {
        RuleVerdict::fail(
            "blocking loop without a non-blocking one",
            "a non-blocking MQTT loop",
            "a blocking loop call",
            "A blocking loop stops your program from reading sensors.\n  \
             client.connect()\n  \
             client.loop_background()  # runs in a background thread",
        )
    } else {
        RuleVerdict::fail(
            "no MQTT loop found",
            "an MQTT loop (preferably non-blocking)",
            "no loop call",
            "Add a non-blocking loop so callbacks fire:\n  \
             client.connect()\n  \
             client.loop_background()",
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn secret_literal_always_fails_security_rule() {
        let script = "ADAFRUIT_IO_KEY = 'aio_AbCdEfGhIjKlMnOpQrStUv'\n";
        let verdict = no_hardcoded_secret(script);
        assert_eq!(verdict.status, CheckStatus::Failed);
        assert!(verdict.detail.contains("SECURITY"));
    }

    #[test]
    fn short_aio_prefix_is_not_a_secret() {
        // Fewer than 20 trailing characters does not match the key shape.
        let verdict = no_hardcoded_secret("name = 'aio_short'\n");
        assert_eq!(verdict.status, CheckStatus::Passed);
    }

    #[test]
    fn env_read_of_key_is_not_a_secret() {
        let verdict =
            no_hardcoded_secret("ADAFRUIT_IO_KEY = os.environ.get('ADAFRUIT_IO_KEY')\n");
        assert_eq!(verdict.status, CheckStatus::Passed);
    }

    #[test]
    fn lowercase_feeds_pass_format_rule() {
        let script = "client.publish('temperature', t)\nclient.publish('humidity', h)\n";
        assert_eq!(feed_key_format(script).status, CheckStatus::Passed);
    }

    #[test]
    fn single_uppercase_character_flips_format_rule() {
        let script = "client.publish('Temperature', t)\nclient.publish('humidity', h)\n";
        let verdict = feed_key_format(script);
        assert_eq!(verdict.status, CheckStatus::Failed);
        assert!(verdict.actual.contains("Temperature"));
    }

    #[test]
    fn format_rule_skips_without_publish_literals() {
        assert_eq!(feed_key_format("x = 1\n").status, CheckStatus::Skipped);
    }

    #[test]
    fn feed_count_is_reported_and_monotone() {
        let zero = multiple_feeds("x = 1\n");
        assert_eq!(zero.status, CheckStatus::Failed);
        assert!(zero.detail.contains("found 0"));

        let one = multiple_feeds("client.publish('temperature', t)\n");
        assert_eq!(one.status, CheckStatus::Failed);
        assert!(one.detail.contains("found 1"));

        let two = multiple_feeds("publish('temperature')\npublish('humidity')\n");
        assert_eq!(two.status, CheckStatus::Passed);
        assert!(two.detail.contains("found 2"));

        let three = multiple_feeds("temperature humidity pressure\n");
        assert!(three.detail.contains("found 3"));
    }

    #[test]
    fn humidity_synonym_counts_once() {
        let verdict = multiple_feeds("humidity humidite\n");
        assert!(verdict.detail.contains("found 1"));
    }

    #[test]
    fn blocking_loop_without_background_fails_with_rationale() {
        let verdict = non_blocking_loop("client.loop()\n");
        assert_eq!(verdict.status, CheckStatus::Failed);
        assert!(verdict.suggestion.contains("blocking loop stops"));
    }

    #[test]
    fn background_loop_passes_even_next_to_blocking_one() {
        let verdict = non_blocking_loop("client.loop()\nclient.loop_background()\n");
        assert_eq!(verdict.status, CheckStatus::Passed);
    }

    #[test]
    fn missing_loop_fails_differently_from_blocking_loop() {
        let verdict = non_blocking_loop("x = 1\n");
        assert_eq!(verdict.status, CheckStatus::Failed);
        assert_eq!(verdict.detail, "no MQTT loop found");
    }

    #[test]
    fn credential_rule_accepts_canonical_names() {
        let script = "ADAFRUIT_IO_USERNAME = os.environ.get('ADAFRUIT_IO_USERNAME')\n\
                      ADAFRUIT_IO_KEY = os.environ.get('ADAFRUIT_IO_KEY')\n";
        assert_eq!(credential_variables(script).status, CheckStatus::Passed);
    }

    #[test]
    fn credential_rule_reports_which_half_is_missing() {
        let verdict = credential_variables("AIO_USERNAME = 'ada'\n");
        assert_eq!(verdict.status, CheckStatus::Failed);
        // "aio" is mentioned, so the loose key heuristic would need the
        // word "key" somewhere; it is absent here.
        assert!(verdict.actual.contains("key found: false"));
    }

    #[test]
    fn reconnection_rule_accepts_retry_plus_connect() {
        let script = "def retry():\n    connect()\n";
        assert_eq!(reconnection_pattern(script).status, CheckStatus::Passed);
    }

    #[test]
    fn delay_rule_matches_numeric_constants() {
        assert_eq!(delay_constants("MIN_DELAY = 1\nMAX_DELAY = 120\n").status, CheckStatus::Passed);
        assert_eq!(delay_constants("x = 5\n").status, CheckStatus::Failed);
    }

    #[test]
    fn syntax_rule_reports_line_numbers() {
        let verdict = syntax_valid("a = 1\nb = (2\n");
        assert_eq!(verdict.status, CheckStatus::Failed);
        assert!(verdict.actual.contains("line 2"));
    }
}
