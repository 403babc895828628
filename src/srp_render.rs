use crate::srp_report::{Report, TestStatus};
use std::fmt::Write;

/// Renders a report as the markdown summary shown to students.
pub fn render_markdown(report: &Report) -> String {
    let mut md = String::new();
    let heading = if report.success {
        "✅ Success"
    } else {
        "❌ Failed"
    };
    // Writing into a String cannot fail.
    let _ = write!(md, "## {}\n\n> {}\n\n", heading, report.summary);

    if !report.diagnostics.is_empty() {
        md.push_str("### Diagnostics\n\n");
        for d in &report.diagnostics {
            let _ = write!(
                md,
                "#### {}\n**{}**\n",
                d.severity.to_string().to_uppercase(),
                d.message
            );
            if let Some(file) = &d.file {
                let _ = write!(md, "`{}:{}`\n\n", file, d.line.unwrap_or(0));
            }
            if let Some(snippet) = &d.snippet {
                let _ = write!(md, "```\n{}\n```\n\n", snippet);
            }
            md.push_str("---\n\n");
        }
    }

    if !report.tests.is_empty() {
        let _ = write!(
            md,
            "### Tests ({}/{} passed)\n\n",
            report.passed_count(),
            report.tests.len()
        );
        for t in &report.tests {
            let mark = match t.status {
                TestStatus::Pass => "✅",
                TestStatus::Fail => "❌",
            };
            let _ = writeln!(md, "- {} **{}**", mark, t.name);
            if !t.message.is_empty() {
                let _ = write!(md, "  > {}\n\n", t.message.replace('\n', "\n  > "));
            }
        }
    }

    let raw = report.raw.trim();
    if !raw.is_empty() {
        let _ = writeln!(md, "### Output\n\n```\n{}\n```", raw);
    }
    md
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::srp_report::{Diagnostic, TestRecord};

    #[test]
    fn failed_run_lists_diagnostics_tests_and_output() {
        let report = Report::assemble(
            "hello",
            false,
            "  raw text  \n".to_string(),
            vec![Diagnostic::error("undefined: x", "foo.go", 10)],
            vec![
                TestRecord {
                    name: "TestA".to_string(),
                    status: TestStatus::Pass,
                    message: String::new(),
                },
                TestRecord {
                    name: "TestB".to_string(),
                    status: TestStatus::Fail,
                    message: "got 1\nwant 2".to_string(),
                },
            ],
        );
        let md = render_markdown(&report);
        assert!(md.starts_with("## ❌ Failed\n\n> Tests failed for hello\n\n"));
        assert!(md.contains("#### ERROR\n**undefined: x**\n`foo.go:10`\n\n---"));
        assert!(md.contains("### Tests (1/2 passed)"));
        assert!(md.contains("- ✅ **TestA**\n- ❌ **TestB**\n  > got 1\n  > want 2\n"));
        assert!(md.ends_with("### Output\n\n```\nraw text\n```\n"));
    }

    #[test]
    fn quiet_success_has_only_the_heading() {
        let report = Report::assemble("hello", true, "\n".to_string(), vec![], vec![]);
        assert_eq!(
            render_markdown(&report),
            "## ✅ Success\n\n> All tests passed for hello\n\n"
        );
    }
}
