use serde::{Deserialize, Serialize};
use std::fmt;

/// Severity of a [`Diagnostic`]. The scanner only recognizes errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
        }
    }
}

/// A single problem detected in the test command's output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    pub severity: Severity,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,
    /// Line number; `None` when unknown (a parsed zero is treated as unknown).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub column: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub snippet: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<String>,
}

impl Diagnostic {
    /// Builds an error diagnostic. Empty file paths and zero line numbers are stored as unset.
    pub fn error(message: impl Into<String>, file: impl Into<String>, line: u32) -> Self {
        let file = file.into();
        Diagnostic {
            severity: Severity::Error,
            message: message.into(),
            file: (!file.is_empty()).then_some(file),
            line: (line != 0).then_some(line),
            column: None,
            snippet: None,
            suggestion: None,
        }
    }

    /// Two diagnostics are duplicates when message and line agree; the file is not compared.
    pub fn is_duplicate_of(&self, message: &str, line: Option<u32>) -> bool {
        self.message == message && self.line == line
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TestStatus {
    Pass,
    Fail,
}

impl fmt::Display for TestStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TestStatus::Pass => write!(f, "pass"),
            TestStatus::Fail => write!(f, "fail"),
        }
    }
}

/// Outcome of one named test case.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TestRecord {
    pub name: String,
    pub status: TestStatus,
    /// Captured log lines for the test, newline-joined.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub message: String,
}

/// The SRP payload: everything a consumer learns about one run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Report {
    pub success: bool,
    pub summary: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub diagnostics: Vec<Diagnostic>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tests: Vec<TestRecord>,
    pub raw: String,
}

impl Report {
    /// Assembles the report for `exercise_id` from a finished run and its scan results.
    pub fn assemble(
        exercise_id: &str,
        success: bool,
        raw: String,
        diagnostics: Vec<Diagnostic>,
        tests: Vec<TestRecord>,
    ) -> Self {
        Report {
            success,
            summary: summary_for(exercise_id, success),
            diagnostics,
            tests,
            raw,
        }
    }

    pub fn passed_count(&self) -> usize {
        self.tests
            .iter()
            .filter(|t| t.status == TestStatus::Pass)
            .count()
    }

    /// Indented (two space) JSON, as framed on stdout.
    pub fn to_pretty_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

pub fn summary_for(exercise_id: &str, success: bool) -> String {
    if success {
        format!("All tests passed for {}", exercise_id)
    } else {
        format!("Tests failed for {}", exercise_id)
    }
}
