//! Output formatting for review results.
//!
//! Supports three output formats:
//! - Pretty: colored terminal output for human readability
//! - Markdown: a shareable report with fixed section order
//! - JSON: structured output for programmatic consumption

use colored::*;
use lazy_static::lazy_static;
use regex::Regex;

use crate::metrics::CodeMetrics;
use crate::scan::{CodeIssue, Severity};
use crate::session::ReviewResult;

/// Markdown sub-heading per severity, in export order.
fn severity_heading(severity: Severity) -> &'static str {
    match severity {
        Severity::Error => "Errors",
        Severity::Warning => "Warnings",
        Severity::Info => "Information",
        Severity::Style => "Style Issues",
    }
}

fn issues_with(issues: &[CodeIssue], severity: Severity) -> Vec<&CodeIssue> {
    issues.iter().filter(|i| i.severity == severity).collect()
}

fn format_date(date: &chrono::DateTime<chrono::Utc>) -> String {
    date.format("%b %-d, %Y, %-I:%M %p").to_string()
}

// =============================================================================
// Markdown
// =============================================================================

/// Render a review as a markdown report.
///
/// Section order is fixed: Overview, Metrics, Issues (grouped by severity,
/// empty groups omitted), Date.
pub fn to_markdown(review: &ReviewResult) -> String {
    let metrics = &review.metrics;
    let mut md = String::from("# Code Review Summary\n\n");

    md.push_str("## Overview\n\n");
    md.push_str(&review.summary);
    md.push_str("\n\n");

    md.push_str("## Metrics\n\n");
    md.push_str(&format!("- Overall Score: {}/100\n", metrics.overall_score));
    md.push_str(&format!("- Complexity: {}/100\n", metrics.complexity));
    md.push_str(&format!("- Maintainability: {}/100\n", metrics.maintainability));
    md.push_str(&format!("- Readability: {}/100\n", metrics.readability));
    md.push_str(&format!("- Duplication: {}/100\n\n", metrics.duplication));

    md.push_str("## Issues\n\n");

    for severity in crate::scan::SEVERITY_ORDER {
        let group = issues_with(&review.issues, *severity);
        if group.is_empty() {
            continue;
        }

        md.push_str(&format!("### {}\n\n", severity_heading(*severity)));
        for issue in group {
            md.push_str(&format!("- Line {}: {}\n", issue.line_number, issue.message));
            if let Some(suggestion) = &issue.suggestion {
                md.push_str(&format!("  - Suggestion: {}\n", suggestion));
            }
        }
        md.push('\n');
    }

    md.push_str("## Date\n\n");
    md.push_str(&format!("Generated on {}\n", format_date(&review.created_at)));

    md
}

lazy_static! {
    static ref METRIC_LINE: Regex =
        Regex::new(r"- (Overall Score|Complexity|Maintainability|Readability|Duplication): (\d+)/100")
            .unwrap();
}

/// Re-parse the metrics section of an exported markdown report.
///
/// Returns `None` unless all five values are present. The counterpart of
/// `to_markdown`: exporting and re-parsing recovers the same numbers.
pub fn parse_metrics(markdown: &str) -> Option<CodeMetrics> {
    let mut overall = None;
    let mut complexity = None;
    let mut maintainability = None;
    let mut readability = None;
    let mut duplication = None;

    for caps in METRIC_LINE.captures_iter(markdown) {
        let value: i32 = caps[2].parse().ok()?;
        match &caps[1] {
            "Overall Score" => overall = Some(value),
            "Complexity" => complexity = Some(value),
            "Maintainability" => maintainability = Some(value),
            "Readability" => readability = Some(value),
            "Duplication" => duplication = Some(value),
            _ => unreachable!(),
        }
    }

    Some(CodeMetrics {
        complexity: complexity?,
        maintainability: maintainability?,
        readability: readability?,
        duplication: duplication?,
        overall_score: overall?,
    })
}

// =============================================================================
// JSON
// =============================================================================

/// Write a review as pretty-printed JSON to stdout.
pub fn write_json(review: &ReviewResult) -> anyhow::Result<()> {
    let json = serde_json::to_string_pretty(review)?;
    println!("{}", json);
    Ok(())
}

// =============================================================================
// Pretty
// =============================================================================

fn severity_color(severity: Severity, text: &str) -> ColoredString {
    match severity {
        Severity::Error => text.red(),
        Severity::Warning => text.yellow(),
        Severity::Info => text.blue(),
        Severity::Style => text.magenta(),
    }
}

fn write_colored_score(label: &str, score: i32) {
    let rendered = match score {
        s if s >= 90 => s.to_string().green().bold(),
        s if s >= 75 => s.to_string().green(),
        s if s >= 50 => s.to_string().yellow(),
        s => s.to_string().red(),
    };
    println!("  {:<16} {}/100", label, rendered);
}

/// Write a review in pretty (human-readable) format.
pub fn write_pretty(review: &ReviewResult) {
    // Header
    println!();
    print!("  ");
    print!("{}", "coderev".cyan().bold());
    println!(" v{}", env!("CARGO_PKG_VERSION"));
    println!();

    print!("  {}", "Language: ".dimmed());
    println!("{}", review.language);
    println!();

    // Summary
    println!("  {}", review.summary);
    println!();

    // Metrics
    write_colored_score("Overall Score", review.metrics.overall_score);
    write_colored_score("Complexity", review.metrics.complexity);
    write_colored_score("Maintainability", review.metrics.maintainability);
    write_colored_score("Readability", review.metrics.readability);
    write_colored_score("Duplication", review.metrics.duplication);
    println!();

    // Issues grouped by severity
    if review.issues.is_empty() {
        println!("  {}", "✓ No issues found".green());
        println!();
        return;
    }

    for severity in crate::scan::SEVERITY_ORDER {
        let group = issues_with(&review.issues, *severity);
        if group.is_empty() {
            continue;
        }

        println!(
            "  {} ({})",
            severity_color(*severity, severity_heading(*severity)).bold(),
            group.len()
        );
        for issue in group {
            println!(
                "    {} {}",
                format!("L{}", issue.line_number).dimmed(),
                issue.message
            );
            if let Some(suggestion) = &issue.suggestion {
                println!("      {}", suggestion.dimmed());
            }
        }
        println!();
    }
}
