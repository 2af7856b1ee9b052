//! Narrative summary generation.
//!
//! Deterministic, template-driven prose: a tier sentence keyed on the
//! aggregate score, an issue-count clause, then one advisory per metric
//! scoring under the advisory threshold, in fixed metric order.

use crate::metrics::CodeMetrics;
use crate::scan::{CodeIssue, Severity};

/// Metrics below this score get an advisory sentence.
const ADVISORY_THRESHOLD: i32 = 60;

fn pluralize(count: usize, noun: &str) -> String {
    if count == 1 {
        format!("{} {}", count, noun)
    } else {
        format!("{} {}s", count, noun)
    }
}

/// Build the narrative paragraph for one analysis result.
pub fn summarize(issues: &[CodeIssue], metrics: &CodeMetrics) -> String {
    let mut summary = String::new();

    summary.push_str(match metrics.overall_score {
        s if s >= 90 => "This code is of excellent quality. ",
        s if s >= 75 => "This code is of good quality with some minor issues. ",
        s if s >= 50 => "This code has several issues that should be addressed. ",
        _ => "This code has significant quality issues that require attention. ",
    });

    if issues.is_empty() {
        summary.push_str("No issues were found during the analysis.");
    } else {
        let count_for = |severity: Severity| issues.iter().filter(|i| i.severity == severity).count();
        let errors = count_for(Severity::Error);
        let warnings = count_for(Severity::Warning);
        let infos = count_for(Severity::Info);
        let styles = count_for(Severity::Style);

        summary.push_str(&format!("Found {}: ", pluralize(issues.len(), "issue")));

        let mut counts = Vec::new();
        if errors > 0 {
            counts.push(pluralize(errors, "error"));
        }
        if warnings > 0 {
            counts.push(pluralize(warnings, "warning"));
        }
        if infos > 0 {
            counts.push(pluralize(infos, "info"));
        }
        if styles > 0 {
            counts.push(pluralize(styles, "style issue"));
        }

        summary.push_str(&counts.join(", "));
        summary.push_str(". ");
    }

    let mut advisories = Vec::new();
    if metrics.complexity < ADVISORY_THRESHOLD {
        advisories.push("The code is overly complex and could benefit from simplification.");
    }
    if metrics.maintainability < ADVISORY_THRESHOLD {
        advisories.push("Maintainability could be improved with better documentation and structure.");
    }
    if metrics.readability < ADVISORY_THRESHOLD {
        advisories.push("Readability is an issue - consider improving formatting and naming.");
    }
    if metrics.duplication < ADVISORY_THRESHOLD {
        advisories.push("There appears to be code duplication that could be refactored.");
    }

    if !advisories.is_empty() {
        summary.push_str(&advisories.join(" "));
    }

    summary
}
