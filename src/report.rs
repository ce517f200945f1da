//! Console reporting.
//!
//! An explicit `Reporter` value is passed to command handlers instead
//! of module-level print helpers, so tests can render into a buffer and
//! assert on the output without capturing stdout.

use std::io::Write;

use colored::Colorize;

/// Writes tagged status lines to an output sink.
pub struct Reporter<W: Write> {
    out: W,
    color: bool,
}

impl Reporter<std::io::Stdout> {
    /// Creates a reporter writing to stdout.
    #[must_use]
    pub fn stdout(color: bool) -> Self {
        Self::new(std::io::stdout(), color)
    }
}

impl<W: Write> Reporter<W> {
    /// Creates a reporter writing to the given sink.
    pub fn new(out: W, color: bool) -> Self {
        Self { out, color }
    }

    /// Consumes the reporter and returns the sink.
    pub fn into_inner(self) -> W {
        self.out
    }

    fn tagged(&mut self, tag: &str, colorize: fn(&str) -> colored::ColoredString, msg: &str) {
        // Console reporting is best-effort; a broken pipe should not
        // turn into a second error on top of whatever is being reported.
        if self.color {
            let _ = writeln!(self.out, "{} {msg}", colorize(tag));
        } else {
            let _ = writeln!(self.out, "{tag} {msg}");
        }
    }

    /// Reports a passing check or stage.
    pub fn success(&mut self, msg: &str) {
        self.tagged("[PASS]", |t| t.green(), msg);
    }

    /// Reports a failing check or stage.
    pub fn fail(&mut self, msg: &str) {
        self.tagged("[FAIL]", |t| t.red(), msg);
    }

    /// Reports a non-fatal problem (e.g. the optional probe timing out).
    pub fn warn(&mut self, msg: &str) {
        self.tagged("[WARN]", |t| t.yellow(), msg);
    }

    /// Reports neutral progress information.
    pub fn info(&mut self, msg: &str) {
        self.tagged("[INFO]", |t| t.blue(), msg);
    }

    /// Reports a skipped check.
    pub fn skip(&mut self, msg: &str) {
        self.tagged("[SKIP]", |t| t.yellow(), msg);
    }

    /// Prints a banner header for a section of output.
    pub fn header(&mut self, title: &str) {
        let rule = "=".repeat(60);
        if self.color {
            let _ = writeln!(self.out, "\n{}\n {}\n{}\n", rule.bold(), title.bold(), rule.bold());
        } else {
            let _ = writeln!(self.out, "\n{rule}\n {title}\n{rule}\n");
        }
    }

    /// Prints an untagged line (indented remediation text and the like).
    pub fn line(&mut self, msg: &str) {
        let _ = writeln!(self.out, "{msg}");
    }

    /// Prints an empty line.
    pub fn blank(&mut self) {
        let _ = writeln!(self.out);
    }
}
