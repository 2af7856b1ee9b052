//! Quality metric scoring.
//!
//! Four heuristic sub-scores plus a weighted aggregate, every one clamped
//! to 0-100. These are whole-text heuristics over `split('\n')` lines; a
//! trailing newline counts as a final empty line, matching how every
//! denominator below is defined.
//!
//! The nesting part of the complexity score looks only at the single line
//! with the largest brace-count delta. That is a narrow "burst" measure,
//! not cumulative nesting depth, and is kept as-is: downstream consumers
//! depend on the documented behavior.

use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

lazy_static! {
    /// Conditional/loop keywords counted by the complexity score.
    /// Substring alternation, not word-bounded.
    static ref CONDITIONAL_PATTERN: Regex =
        Regex::new(r"if|else|switch|case|for|while|do").unwrap();

    /// Comment markers counted by the maintainability score.
    static ref COMMENT_PATTERN: Regex = Regex::new(r"//|/\*|\*/|#").unwrap();
}

/// Weights for the aggregate score.
pub mod weights {
    pub const COMPLEXITY: f64 = 0.25;
    pub const MAINTAINABILITY: f64 = 0.30;
    pub const READABILITY: f64 = 0.25;
    pub const DUPLICATION: f64 = 0.20;
}

/// The five scores for one buffer. `overall_score` is always the weighted
/// function of the other four, never set independently: deserialization
/// clamps the sub-scores and recomputes the aggregate, so untrusted input
/// cannot smuggle in an inconsistent value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "MetricsRepr")]
pub struct CodeMetrics {
    pub complexity: i32,
    pub maintainability: i32,
    pub readability: i32,
    pub duplication: i32,
    pub overall_score: i32,
}

/// Wire form of `CodeMetrics`. Any serialized `overall_score` is ignored
/// and rederived from the four sub-scores.
#[derive(Deserialize)]
struct MetricsRepr {
    complexity: i32,
    maintainability: i32,
    readability: i32,
    duplication: i32,
}

impl From<MetricsRepr> for CodeMetrics {
    fn from(repr: MetricsRepr) -> Self {
        let complexity = repr.complexity.clamp(0, 100);
        let maintainability = repr.maintainability.clamp(0, 100);
        let readability = repr.readability.clamp(0, 100);
        let duplication = repr.duplication.clamp(0, 100);
        CodeMetrics {
            complexity,
            maintainability,
            readability,
            duplication,
            overall_score: overall_score(complexity, maintainability, readability, duplication),
        }
    }
}

impl CodeMetrics {
    /// Score a buffer on all four axes and derive the aggregate.
    pub fn measure(text: &str) -> CodeMetrics {
        let complexity = clamp_round(complexity_raw(text));
        let maintainability = clamp_round(maintainability_raw(text));
        let readability = clamp_round(readability_raw(text));
        let duplication = clamp_round(duplication_raw(text));

        CodeMetrics {
            complexity,
            maintainability,
            readability,
            duplication,
            overall_score: overall_score(complexity, maintainability, readability, duplication),
        }
    }
}

/// Neutral scores for an empty buffer: exactly what the formulas yield for
/// a single empty line, returned without touching any denominator.
fn empty_text_metrics() -> (f64, f64, f64, f64) {
    (100.0, 75.0, 100.0, 100.0)
}

fn clamp_round(score: f64) -> i32 {
    score.clamp(0.0, 100.0).round() as i32
}

/// Weighted aggregate of the four sub-scores, rounded to nearest.
pub fn overall_score(
    complexity: i32,
    maintainability: i32,
    readability: i32,
    duplication: i32,
) -> i32 {
    let weighted = f64::from(complexity) * weights::COMPLEXITY
        + f64::from(maintainability) * weights::MAINTAINABILITY
        + f64::from(readability) * weights::READABILITY
        + f64::from(duplication) * weights::DUPLICATION;
    weighted.round() as i32
}

/// Complexity: conditional keyword count plus the largest single-line
/// brace-count delta.
pub fn complexity(text: &str) -> i32 {
    clamp_round(complexity_raw(text))
}

fn complexity_raw(text: &str) -> f64 {
    if text.is_empty() {
        return empty_text_metrics().0;
    }

    let conditionals = CONDITIONAL_PATTERN.find_iter(text).count() as f64;
    let max_line_delta = text
        .split('\n')
        .map(|line| {
            line.chars().filter(|c| *c == '{').count() as i64
                - line.chars().filter(|c| *c == '}').count() as i64
        })
        .max()
        .unwrap_or(0)
        .max(0) as f64;

    100.0 - (conditionals / 20.0 + max_line_delta / 3.0) * 10.0
}

/// Readability: penalizes over-long lines and sheer buffer length.
pub fn readability(text: &str) -> i32 {
    clamp_round(readability_raw(text))
}

fn readability_raw(text: &str) -> f64 {
    if text.is_empty() {
        return empty_text_metrics().2;
    }

    let lines: Vec<&str> = text.split('\n').collect();
    let long_lines = lines
        .iter()
        .filter(|line| line.chars().count() > 100)
        .count() as f64;

    let long_line_ratio = (long_lines / lines.len() as f64).min(0.5);
    let length_penalty = (text.chars().count() as f64 / 5000.0).min(0.5);

    100.0 - (long_line_ratio + length_penalty) * 100.0
}

/// Maintainability: rewards comment density, folds in a quarter of the
/// readability score.
pub fn maintainability(text: &str) -> i32 {
    clamp_round(maintainability_raw(text))
}

fn maintainability_raw(text: &str) -> f64 {
    if text.is_empty() {
        return empty_text_metrics().1;
    }

    let comments = COMMENT_PATTERN.find_iter(text).count() as f64;
    let lines = text.split('\n').count() as f64;
    let comment_ratio = comments / lines;

    50.0 + comment_ratio * 100.0 + readability_raw(text).clamp(0.0, 100.0) / 4.0
}

/// Duplication: the unique-line ratio scaled to 0-100. Blank lines all
/// count as one value.
pub fn duplication(text: &str) -> i32 {
    clamp_round(duplication_raw(text))
}

fn duplication_raw(text: &str) -> f64 {
    if text.is_empty() {
        return empty_text_metrics().3;
    }

    let lines: Vec<&str> = text.split('\n').collect();
    let unique: HashSet<&&str> = lines.iter().collect();
    let unique_ratio = unique.len() as f64 / lines.len() as f64;

    unique_ratio * 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_in_bounds(m: &CodeMetrics) {
        for v in [
            m.complexity,
            m.maintainability,
            m.readability,
            m.duplication,
            m.overall_score,
        ] {
            assert!((0..=100).contains(&v), "score out of bounds: {}", v);
        }
    }

    #[test]
    fn test_empty_text_neutral_scores() {
        let m = CodeMetrics::measure("");
        assert_eq!(m.complexity, 100);
        assert_eq!(m.readability, 100);
        assert_eq!(m.maintainability, 75);
        assert_eq!(m.duplication, 100);
        assert_in_bounds(&m);
    }

    #[test]
    fn test_all_scores_bounded() {
        let keyword_soup = "if if if if ".repeat(200);
        let one_long_line = format!("{}\n", "x".repeat(500));
        let repeated = "same line\n".repeat(100);
        let samples: &[&str] = &[
            "",
            "\n",
            "fn main() {}\n",
            &keyword_soup,
            &one_long_line,
            &repeated,
            "{{{{{{{{{{{{{{{{{{{{",
        ];
        for text in samples {
            assert_in_bounds(&CodeMetrics::measure(text));
        }
    }

    #[test]
    fn test_overall_is_weighted_round() {
        let m = CodeMetrics::measure("let x = 1;\nlet y = 2;\n// sum them\nlet z = x + y;");
        let expected = (0.25 * f64::from(m.complexity)
            + 0.30 * f64::from(m.maintainability)
            + 0.25 * f64::from(m.readability)
            + 0.20 * f64::from(m.duplication))
        .round() as i32;
        assert_eq!(m.overall_score, expected);

        assert_eq!(overall_score(100, 100, 100, 100), 100);
        assert_eq!(overall_score(0, 0, 0, 0), 0);
        assert_eq!(overall_score(80, 60, 40, 20), 52);
    }

    #[test]
    fn test_complexity_counts_keywords_and_brace_burst() {
        // 20 keywords knock off 10 points.
        let keywords = "if ".repeat(20);
        assert_eq!(complexity(&keywords), 90);

        // A 3-brace burst on one line knocks off 10 points.
        assert_eq!(complexity("a {{{\nb\nc"), 90);

        // Burst is per-line, not cumulative: one brace per line over three
        // lines only counts the single largest delta.
        assert_eq!(complexity("a {\nb {\nc {"), 97);
    }

    #[test]
    fn test_complexity_keyword_match_is_substring() {
        // Both words contain "if"; the scan is deliberately not
        // word-bounded.
        assert_eq!(complexity("identifier notify"), 99);
    }

    #[test]
    fn test_readability_penalties() {
        // 200 lines of 50 chars: no long lines, but length penalty caps
        // at 0.5 (10,199 chars / 5000).
        let text = vec!["x".repeat(50); 200].join("\n");
        assert_eq!(readability(&text), 50);

        // One long line out of two: ratio 0.5 cap, tiny length penalty.
        let text = format!("{}\nshort", "y".repeat(150));
        assert_eq!(readability(&text), 47);
    }

    #[test]
    fn test_maintainability_rewards_comments() {
        // No comments: 50 + readability/4.
        assert_eq!(maintainability("let a = 1;"), 75);
        // One marker per line doubles the base.
        assert_eq!(maintainability("// a\n// b"), 100);
    }

    #[test]
    fn test_duplication_unique_ratio() {
        assert_eq!(duplication("a\nb\nc"), 100);
        assert_eq!(duplication("a\na\na\na"), 25);
        // Blank lines count as one value.
        assert_eq!(duplication("a\n\n\nb"), 75);
    }

    #[test]
    fn test_deserialize_recomputes_overall_and_clamps() {
        // A tampered aggregate is ignored and rederived.
        let json = r#"{
            "complexity": 80,
            "maintainability": 60,
            "readability": 40,
            "duplication": 20,
            "overall_score": 7
        }"#;
        let m: CodeMetrics = serde_json::from_str(json).unwrap();
        assert_eq!(m.overall_score, 52);

        // Out-of-range sub-scores are clamped before the aggregate.
        let json = r#"{
            "complexity": 250,
            "maintainability": -10,
            "readability": 100,
            "duplication": 100
        }"#;
        let m: CodeMetrics = serde_json::from_str(json).unwrap();
        assert_eq!(m.complexity, 100);
        assert_eq!(m.maintainability, 0);
        assert_eq!(m.overall_score, overall_score(100, 0, 100, 100));
        assert_in_bounds(&m);
    }

    #[test]
    fn test_serde_roundtrip_preserves_measured_metrics() {
        let m = CodeMetrics::measure("// a\nif (x) {\n  y();\n}");
        let json = serde_json::to_string(&m).unwrap();
        let back: CodeMetrics = serde_json::from_str(&json).unwrap();
        assert_eq!(back, m);
    }

    #[test]
    fn test_clean_uniform_text_scenario() {
        // 200 identical 50-char lines, no comments, no conditionals.
        let text = vec!["q".repeat(50); 200].join("\n");
        let m = CodeMetrics::measure(&text);

        assert_eq!(m.complexity, 100);
        assert_eq!(m.readability, 50);
        // 50 + 0 comment ratio + 50/4.
        assert_eq!(m.maintainability, 63);
        // 1 unique line out of 200.
        assert_eq!(m.duplication, 1);
        assert_in_bounds(&m);
    }
}
