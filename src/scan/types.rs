//! Core types for scan results.

use serde::{Deserialize, Serialize};

/// Severity classes for issues, in fixed priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
    Info,
    Style,
}

/// All severities, in the order used for every enumeration and export.
pub const SEVERITY_ORDER: &[Severity] = &[
    Severity::Error,
    Severity::Warning,
    Severity::Info,
    Severity::Style,
];

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Warning => write!(f, "warning"),
            Severity::Info => write!(f, "info"),
            Severity::Style => write!(f, "style"),
        }
    }
}

impl std::str::FromStr for Severity {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "error" => Ok(Severity::Error),
            "warning" => Ok(Severity::Warning),
            "info" => Ok(Severity::Info),
            "style" => Ok(Severity::Style),
            _ => Err(format!("unknown severity: {}", s)),
        }
    }
}

/// A single detected issue, tied to a 1-based line number.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CodeIssue {
    pub id: String,
    pub line_number: usize,
    pub message: String,
    pub severity: Severity,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<String>,
}

impl CodeIssue {
    pub fn new(
        line_number: usize,
        message: impl Into<String>,
        severity: Severity,
        suggestion: impl Into<String>,
    ) -> Self {
        CodeIssue {
            id: uuid::Uuid::new_v4().to_string(),
            line_number,
            message: message.into(),
            severity,
            suggestion: Some(suggestion.into()),
        }
    }
}
