//! One-shot analysis of a buffer.
//!
//! Pure composition of the issue scanner and the metric scorer. No I/O and
//! no side effects, so identical input always produces identical issues
//! and metrics (issue ids aside), which keeps golden-file regression tests
//! cheap.

use serde::{Deserialize, Serialize};

use crate::language::Language;
use crate::metrics::CodeMetrics;
use crate::scan::{self, CodeIssue};

/// The combined result of one analysis pass.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Analysis {
    pub issues: Vec<CodeIssue>,
    pub metrics: CodeMetrics,
}

/// Analyze a buffer: scan for issues and score the four metrics.
pub fn analyze(text: &str, language: Language) -> Analysis {
    Analysis {
        issues: scan::scan(text, language),
        metrics: CodeMetrics::measure(text),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scan::Severity;

    #[test]
    fn test_analyze_is_deterministic() {
        let code = "if (x == 1) {\nconsole.log('ok')\n}";
        let a = analyze(code, Language::JavaScript);
        let b = analyze(code, Language::JavaScript);

        assert_eq!(a.issues.len(), b.issues.len());
        assert_eq!(a.metrics, b.metrics);
        for (x, y) in a.issues.iter().zip(b.issues.iter()) {
            assert_eq!(x.line_number, y.line_number);
            assert_eq!(x.message, y.message);
            assert_eq!(x.severity, y.severity);
        }
    }

    #[test]
    fn test_empty_buffer_has_no_issues_and_neutral_metrics() {
        let a = analyze("", Language::Rust);
        assert!(a.issues.is_empty());
        assert_eq!(a.metrics.complexity, 100);
        assert_eq!(a.metrics.duplication, 100);
    }

    #[test]
    fn test_issue_order_is_scan_order() {
        let code = "// TODO: drop the v1 shim\nif (a == b) {\nconsole.log(a)\n}";
        let a = analyze(code, Language::TypeScript);

        let lines: Vec<usize> = a.issues.iter().map(|i| i.line_number).collect();
        let mut sorted = lines.clone();
        sorted.sort_unstable();
        assert_eq!(lines, sorted);
        assert_eq!(a.issues[0].severity, Severity::Info);
    }
}
