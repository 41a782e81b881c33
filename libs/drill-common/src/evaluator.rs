//! Output Evaluator - Display Selection and Verdict
//!
//! **Core Responsibility:**
//! Turn a judge response into the text shown to the user, and compare
//! that text against a question's expected output.
//!
//! **Critical Properties:**
//! - Knows nothing about HTTP
//! - Knows nothing about the judge service beyond its response fields
//! - Pure functions: (judge response, expected output) → (display, verdict)
//!
//! **Selection Order:**
//! 1. stdout
//! 2. compile_output
//! 3. stderr
//!
//! The first field that is non-empty after trimming wins. When none is,
//! the display is empty.
//!
//! **Normalization Rules:**
//! - Trim leading and trailing whitespace: YES
//! - Case sensitivity: YES (exact match required)
//! - Internal whitespace: preserved

use crate::types::{SubmissionResult, Verdict};

/// Which judge field the displayed output came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputSource {
    Stdout,
    CompileOutput,
    Stderr,
    /// Every field was missing or blank
    Empty,
}

impl OutputSource {
    /// Output that is compiler or runtime diagnostics rather than program output
    pub fn is_diagnostic(&self) -> bool {
        matches!(self, OutputSource::CompileOutput | OutputSource::Stderr)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayOutput {
    pub text: String,
    pub source: OutputSource,
}

fn normalize_output(output: &str) -> &str {
    output.trim()
}

fn non_blank(field: &Option<String>) -> Option<&str> {
    field
        .as_deref()
        .map(normalize_output)
        .filter(|s| !s.is_empty())
}

/// Pick the text to display from a judge response
pub fn select_output(result: &SubmissionResult) -> DisplayOutput {
    let candidates = [
        (&result.stdout, OutputSource::Stdout),
        (&result.compile_output, OutputSource::CompileOutput),
        (&result.stderr, OutputSource::Stderr),
    ];

    for (field, source) in candidates {
        if let Some(text) = non_blank(field) {
            return DisplayOutput {
                text: text.to_string(),
                source,
            };
        }
    }

    DisplayOutput {
        text: String::new(),
        source: OutputSource::Empty,
    }
}

/// Exact comparison of the displayed text with the trimmed expected output.
///
/// Applies whatever the source of the display was: compiler diagnostics
/// compared against an expected answer come out as `Incorrect`.
pub fn judge(display: &DisplayOutput, expected: &str) -> Verdict {
    if normalize_output(&display.text) == normalize_output(expected) {
        Verdict::Correct
    } else {
        Verdict::Incorrect
    }
}

/// Select the display output and judge it in one step
pub fn evaluate(result: &SubmissionResult, expected: &str) -> (DisplayOutput, Verdict) {
    let display = select_output(result);
    let verdict = judge(&display, expected);
    (display, verdict)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result(stdout: Option<&str>, compile_output: Option<&str>, stderr: Option<&str>) -> SubmissionResult {
        SubmissionResult {
            stdout: stdout.map(str::to_string),
            compile_output: compile_output.map(str::to_string),
            stderr: stderr.map(str::to_string),
            ..Default::default()
        }
    }

    #[test]
    fn test_normalize_output() {
        assert_eq!(normalize_output("hello"), "hello");
        assert_eq!(normalize_output("  hello  "), "hello");
        assert_eq!(normalize_output("hello\n"), "hello");
        assert_eq!(normalize_output("\nhello\r\n"), "hello");
        assert_eq!(normalize_output("   "), "");
    }

    #[test]
    fn test_stdout_match_is_correct() {
        let (display, verdict) = evaluate(&result(Some("4\n"), None, None), "4\n");
        assert_eq!(display.text, "4");
        assert_eq!(display.source, OutputSource::Stdout);
        assert_eq!(verdict, Verdict::Correct);
    }

    #[test]
    fn test_stdout_mismatch_is_incorrect() {
        let (_, verdict) = evaluate(&result(Some("5\n"), None, None), "4\n");
        assert_eq!(verdict, Verdict::Incorrect);
    }

    #[test]
    fn test_compile_output_shown_when_stdout_blank() {
        let (display, verdict) = evaluate(
            &result(Some(""), Some("error: expected ';'\n"), Some("")),
            "4",
        );
        assert_eq!(display.text, "error: expected ';'");
        assert_eq!(display.source, OutputSource::CompileOutput);
        assert!(display.source.is_diagnostic());
        assert_eq!(verdict, Verdict::Incorrect);
    }

    #[test]
    fn test_stderr_is_last_resort() {
        let display = select_output(&result(Some("  \n"), None, Some("Traceback ...\n")));
        assert_eq!(display.text, "Traceback ...");
        assert_eq!(display.source, OutputSource::Stderr);
    }

    #[test]
    fn test_stdout_wins_over_diagnostics() {
        let display = select_output(&result(Some("ok"), Some("warning: unused"), Some("noise")));
        assert_eq!(display.text, "ok");
        assert!(!display.source.is_diagnostic());
    }

    #[test]
    fn test_nothing_selected() {
        let display = select_output(&SubmissionResult::default());
        assert_eq!(display.text, "");
        assert_eq!(display.source, OutputSource::Empty);
        // An empty expectation is matched by empty output
        assert_eq!(judge(&display, "  "), Verdict::Correct);
        assert_eq!(judge(&display, "4"), Verdict::Incorrect);
    }

    #[test]
    fn test_case_sensitivity() {
        let (_, verdict) = evaluate(&result(Some("True\n"), None, None), "true");
        assert_eq!(verdict, Verdict::Incorrect);
    }

    #[test]
    fn test_internal_whitespace_preserved() {
        let (display, verdict) = evaluate(&result(Some("line1\nline2\n"), None, None), "line1\nline2");
        assert_eq!(display.text, "line1\nline2");
        assert_eq!(verdict, Verdict::Correct);

        let (_, verdict) = evaluate(&result(Some("0  1"), None, None), "0 1");
        assert_eq!(verdict, Verdict::Incorrect);
    }
}
