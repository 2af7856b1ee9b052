//! Line-by-line issue scanning.
//!
//! Runs a fixed rule set over each line of a buffer. Rules are independent:
//! one line can produce several issues of different severities, and nothing
//! is deduplicated. The rules are whole-line substring heuristics on
//! purpose; there is no parsing and no AST.

mod types;

pub use types::{CodeIssue, Severity, SEVERITY_ORDER};

use crate::language::Language;

/// Lines longer than this get a style issue.
const MAX_LINE_LEN: usize = 100;

fn is_js_like(language: Language) -> bool {
    matches!(language, Language::JavaScript | Language::TypeScript)
}

/// Scan a buffer and return issues in scan order: ascending by line,
/// rule order within a line.
///
/// Total over all inputs; empty text yields no issues.
pub fn scan(text: &str, language: Language) -> Vec<CodeIssue> {
    let mut issues = Vec::new();
    let lines: Vec<&str> = text.split('\n').collect();

    for (idx, line) in lines.iter().enumerate() {
        let line_number = idx + 1;

        if is_js_like(language) && line.contains("console.log") {
            issues.push(CodeIssue::new(
                line_number,
                "Avoid using console.log in production code",
                Severity::Warning,
                "Use a proper logging library or remove this statement before deploying",
            ));
        }

        if line.contains("TODO") {
            issues.push(CodeIssue::new(
                line_number,
                "TODO comment found",
                Severity::Info,
                "Consider addressing this TODO before finalizing the code",
            ));
        }

        if line.chars().count() > MAX_LINE_LEN {
            issues.push(CodeIssue::new(
                line_number,
                "Line exceeds 100 characters",
                Severity::Style,
                "Consider breaking this line into multiple lines for better readability",
            ));
        }

        // Loose equality: `==` that is not part of `===` or `!==`.
        if is_js_like(language)
            && line.contains("==")
            && !line.contains("===")
            && !line.contains("!==")
        {
            issues.push(CodeIssue::new(
                line_number,
                "Using non-strict equality (==)",
                Severity::Warning,
                "Use strict equality (===) for better type safety",
            ));
        }

        // Empty catch: `catch` followed by an empty block on the next line.
        if line.contains("catch") && lines.get(idx + 1).is_some_and(|next| next.contains("{}")) {
            issues.push(CodeIssue::new(
                line_number,
                "Empty catch block",
                Severity::Error,
                "Handle errors properly instead of using empty catch blocks",
            ));
        }
    }

    issues
}
