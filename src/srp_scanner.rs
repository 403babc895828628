//! Single-pass scanner over `go test -v` output.
//!
//! Every line is classified into a [`LineKind`] first and then dispatched against the
//! [`ScanState`] of the current run. The only state carried between lines is the name of the
//! test currently accumulating log lines and the logs collected so far per test name.

use crate::srp_report::{Diagnostic, TestRecord, TestStatus};
use std::collections::HashMap;
use tracing::trace;

pub const RUN_MARKER: &str = "=== RUN   ";
pub const PASS_MARKER: &str = "--- PASS:";
pub const FAIL_MARKER: &str = "--- FAIL:";
/// Lines indented at least this much belong to the running test.
pub const LOG_INDENT: &str = "    ";
/// Substrings that mark a compiler-level problem.
pub const DIAGNOSTIC_MARKERS: [&str; 3] = ["error:", "undefined:", "invalid operation:"];

/// What a single output line means to the scanner, in priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind<'a> {
    /// `=== RUN   <name>`
    RunStart(&'a str),
    /// `--- PASS: <name> (<duration>)` or `--- FAIL: <name> (<duration>)`
    Verdict { name: &'a str, status: TestStatus },
    /// Anything else; may still be a log line and/or a diagnostic.
    Other(&'a str),
}

impl<'a> LineKind<'a> {
    pub fn classify(line: &'a str) -> Self {
        if let Some(rest) = line.strip_prefix(RUN_MARKER) {
            return LineKind::RunStart(rest.trim());
        }
        if let Some(rest) = line.strip_prefix(PASS_MARKER) {
            return LineKind::Verdict {
                name: verdict_name(rest),
                status: TestStatus::Pass,
            };
        }
        if let Some(rest) = line.strip_prefix(FAIL_MARKER) {
            return LineKind::Verdict {
                name: verdict_name(rest),
                status: TestStatus::Fail,
            };
        }
        LineKind::Other(line)
    }
}

/// Strips the trailing ` (0.01s)` duration off a verdict line's remainder.
fn verdict_name(rest: &str) -> &str {
    let name = rest.trim();
    match name.find(" (") {
        Some(idx) => &name[..idx],
        None => name,
    }
}

/// Diagnostics and test records collected by one scan.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ScanOutcome {
    pub diagnostics: Vec<Diagnostic>,
    pub tests: Vec<TestRecord>,
}

/// Mutable state of a single scan. Created per run and consumed by [`ScanState::finish`].
#[derive(Debug, Default)]
pub struct ScanState {
    current_test: Option<String>,
    test_logs: HashMap<String, Vec<String>>,
    outcome: ScanOutcome,
}

impl ScanState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_line(&mut self, line: &str) {
        match LineKind::classify(line) {
            LineKind::RunStart(name) => {
                trace!("run start: {}", name);
                // An empty name leaves no test active.
                self.current_test = (!name.is_empty()).then(|| name.to_string());
            }
            LineKind::Verdict { name, status } => {
                trace!("verdict {}: {}", status, name);
                let message = self
                    .test_logs
                    .get(name)
                    .map(|logs| logs.join("\n"))
                    .unwrap_or_default();
                self.outcome.tests.push(TestRecord {
                    name: name.to_string(),
                    status,
                    message,
                });
                self.current_test = None;
            }
            LineKind::Other(line) => {
                self.collect_log(line);
                self.collect_diagnostic(line);
            }
        }
    }

    fn collect_log(&mut self, line: &str) {
        let Some(current) = self.current_test.as_ref() else {
            return;
        };
        if line.starts_with(LOG_INDENT) {
            self.test_logs
                .entry(current.clone())
                .or_default()
                .push(line.trim().to_string());
        }
    }

    fn collect_diagnostic(&mut self, line: &str) {
        let Some(diagnostic) = parse_diagnostic(line) else {
            return;
        };
        let duplicate = self
            .outcome
            .diagnostics
            .iter()
            .any(|d| d.is_duplicate_of(&diagnostic.message, diagnostic.line));
        if duplicate {
            trace!("skipping duplicate diagnostic: {}", line);
        } else {
            trace!("diagnostic line: {}", line);
            self.outcome.diagnostics.push(diagnostic);
        }
    }

    pub fn finish(self) -> ScanOutcome {
        self.outcome
    }
}

/// Parses a `file:line: message` line that mentions one of the [`DIAGNOSTIC_MARKERS`].
///
/// Returns `None` for lines without a marker or with fewer than three colon-separated parts.
/// An unparsable line number becomes unknown rather than an error.
///
/// ```
/// use srp_runner::srp_scanner::parse_diagnostic;
///
/// let diag = parse_diagnostic("foo.go:10: error: undefined: x").unwrap();
/// assert_eq!(diag.file.as_deref(), Some("foo.go"));
/// assert_eq!(diag.line, Some(10));
/// assert_eq!(diag.message, "error: undefined: x");
///
/// assert!(parse_diagnostic("error: bad").is_none());
/// ```
pub fn parse_diagnostic(line: &str) -> Option<Diagnostic> {
    if !line.contains(':') || !DIAGNOSTIC_MARKERS.iter().any(|m| line.contains(m)) {
        return None;
    }
    let parts: Vec<&str> = line.split(':').collect();
    if parts.len() < 3 {
        return None;
    }
    let file = parts[0].trim();
    let line_number = parse_line_number(parts[1]);
    let message = parts[2..].join(":").trim().to_string();
    Some(Diagnostic::error(message, file, line_number))
}

/// Reads the leading decimal digits of `field`, after leading whitespace and an optional `+`.
///
/// Zero (unknown) when there are no digits, the number is negative, or it does not fit a `u32`.
fn parse_line_number(field: &str) -> u32 {
    let field = field.trim_start();
    let digits = field.strip_prefix('+').unwrap_or(field);
    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    digits[..end].parse().unwrap_or(0)
}

/// Scans the complete output of one test run.
pub fn scan_output(raw: &str) -> ScanOutcome {
    let mut state = ScanState::new();
    for line in raw.lines() {
        state.push_line(line);
    }
    state.finish()
}
