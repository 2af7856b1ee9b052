//! Review history.
//!
//! An append-only, newest-first log of review results. Entries are never
//! mutated after creation; the only removal path is the cascade that runs
//! when the snippet they were produced from is deleted.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::language::Language;
use crate::metrics::CodeMetrics;
use crate::scan::CodeIssue;

/// `code_snippet_id` value for reviews of a buffer that was never saved.
/// Never a valid snippet id, so never subject to cascade deletion.
pub const UNSAVED_SNIPPET_ID: &str = "unsaved";

/// The immutable result of one analysis run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReviewResult {
    pub id: String,
    pub code_snippet_id: String,
    pub language: Language,
    pub issues: Vec<CodeIssue>,
    pub summary: String,
    pub metrics: CodeMetrics,
    pub created_at: DateTime<Utc>,
}

impl ReviewResult {
    pub fn new(
        code_snippet_id: impl Into<String>,
        language: Language,
        issues: Vec<CodeIssue>,
        summary: impl Into<String>,
        metrics: CodeMetrics,
    ) -> Self {
        ReviewResult {
            id: uuid::Uuid::new_v4().to_string(),
            code_snippet_id: code_snippet_id.into(),
            language,
            issues,
            summary: summary.into(),
            metrics,
            created_at: Utc::now(),
        }
    }
}

/// Newest-first log of past reviews.
#[derive(Debug, Default)]
pub struct ReviewHistory {
    reviews: Vec<ReviewResult>,
}

impl ReviewHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Prepend a result (newest-first ordering).
    pub fn insert(&mut self, review: ReviewResult) {
        self.reviews.insert(0, review);
    }

    pub fn get(&self, id: &str) -> Option<&ReviewResult> {
        self.reviews.iter().find(|r| r.id == id)
    }

    /// Cascade: drop every review produced from the given snippet.
    /// Returns how many were removed.
    pub fn remove_for_snippet(&mut self, snippet_id: &str) -> usize {
        let before = self.reviews.len();
        self.reviews.retain(|r| r.code_snippet_id != snippet_id);
        before - self.reviews.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ReviewResult> {
        self.reviews.iter()
    }

    pub fn len(&self) -> usize {
        self.reviews.len()
    }

    pub fn is_empty(&self) -> bool {
        self.reviews.is_empty()
    }
}
