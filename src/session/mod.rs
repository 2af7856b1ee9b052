//! The editing session.
//!
//! A `Session` owns the live buffer, the snippet repository, the review
//! history, and the two active pointers. It is the only mutation entry
//! point; commands (`analyze`, `save`, `load`, `delete`, edits) apply
//! atomically because every one takes `&mut self`, so a session serializes
//! its own callers.
//!
//! `analyze` is the single suspending command. The artificial delay stands
//! in for a real computation or service call; the busy flag is visible for
//! its whole duration and no result is observable before the transition
//! back to idle. The flag also guards re-entry at the boundary: a second
//! `analyze` against a busy session is refused as a no-op.

mod history;
mod snippets;

pub use history::{ReviewHistory, ReviewResult, UNSAVED_SNIPPET_ID};
pub use snippets::{CodeSnippet, SnippetRepository};

use std::time::Duration;

use crate::analyzer;
use crate::language::Language;
use crate::summary;

/// Stand-in latency for the analysis pass.
pub const DEFAULT_ANALYSIS_DELAY: Duration = Duration::from_millis(1000);

/// One editing session: buffer, repositories, and active pointers.
#[derive(Debug)]
pub struct Session {
    current_code: String,
    current_language: Language,
    analyzing: bool,
    analysis_delay: Duration,
    snippets: SnippetRepository,
    history: ReviewHistory,
    active_snippet_id: Option<String>,
    active_review_id: Option<String>,
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl Session {
    pub fn new() -> Self {
        Self::with_delay(DEFAULT_ANALYSIS_DELAY)
    }

    /// Construct with an explicit analysis delay. Tests pass
    /// `Duration::ZERO`.
    pub fn with_delay(analysis_delay: Duration) -> Self {
        Session {
            current_code: String::new(),
            current_language: Language::JavaScript,
            analyzing: false,
            analysis_delay,
            snippets: SnippetRepository::new(),
            history: ReviewHistory::new(),
            active_snippet_id: None,
            active_review_id: None,
        }
    }

    // --- buffer edits ---

    pub fn set_code(&mut self, code: impl Into<String>) {
        self.current_code = code.into();
    }

    pub fn set_language(&mut self, language: Language) {
        self.current_language = language;
    }

    pub fn code(&self) -> &str {
        &self.current_code
    }

    pub fn language(&self) -> Language {
        self.current_language
    }

    pub fn is_analyzing(&self) -> bool {
        self.analyzing
    }

    // --- commands ---

    /// Run one analysis pass over the current buffer.
    ///
    /// No-op (returns `None`) when the buffer is empty or whitespace-only,
    /// or when an analysis is already in flight. Otherwise always runs to
    /// completion and produces exactly one new review, which becomes the
    /// active review.
    pub async fn analyze(&mut self) -> Option<&ReviewResult> {
        if self.analyzing || self.current_code.trim().is_empty() {
            return None;
        }

        self.analyzing = true;
        tokio::time::sleep(self.analysis_delay).await;

        let analysis = analyzer::analyze(&self.current_code, self.current_language);
        let summary = summary::summarize(&analysis.issues, &analysis.metrics);

        let snippet_id = self
            .active_snippet_id
            .clone()
            .unwrap_or_else(|| UNSAVED_SNIPPET_ID.to_string());
        let review = ReviewResult::new(
            snippet_id,
            self.current_language,
            analysis.issues,
            summary,
            analysis.metrics,
        );

        self.active_review_id = Some(review.id.clone());
        self.history.insert(review);
        self.analyzing = false;

        self.history.iter().next()
    }

    /// Save the buffer as a snippet.
    ///
    /// With an active snippet, overwrites its code and language in place
    /// (the name argument is ignored; there is no rename). Otherwise
    /// creates a new snippet, prepends it, and makes it active. Empty or
    /// whitespace-only buffers are a no-op.
    pub fn save(&mut self, name: &str) -> Option<&CodeSnippet> {
        if self.current_code.trim().is_empty() {
            return None;
        }

        if let Some(active_id) = self.active_snippet_id.clone() {
            self.snippets
                .update(&active_id, &self.current_code, self.current_language);
            return self.snippets.get(&active_id);
        }

        let snippet = CodeSnippet::new(name, self.current_language, self.current_code.clone());
        let id = snippet.id.clone();
        self.snippets.insert(snippet);
        self.active_snippet_id = Some(id.clone());
        self.snippets.get(&id)
    }

    /// Load a snippet into the buffer and make it active. Absent ids are a
    /// no-op.
    pub fn load(&mut self, id: &str) {
        if let Some(snippet) = self.snippets.get(id) {
            self.current_code = snippet.code.clone();
            self.current_language = snippet.language;
            self.active_snippet_id = Some(snippet.id.clone());
        }
    }

    /// Delete a snippet and cascade its reviews out of history.
    ///
    /// Deleting the active snippet also clears the active pointer and
    /// empties the buffer; deleting any other snippet leaves both alone.
    pub fn delete(&mut self, id: &str) {
        if !self.snippets.remove(id) {
            return;
        }

        self.history.remove_for_snippet(id);
        if self.active_snippet_id.as_deref() == Some(id) {
            self.active_snippet_id = None;
            self.current_code.clear();
        }
    }

    /// Empty the buffer and drop the active snippet pointer. History and
    /// the active review are untouched.
    pub fn clear(&mut self) {
        self.current_code.clear();
        self.active_snippet_id = None;
    }

    // --- active items and collections ---

    pub fn active_snippet(&self) -> Option<&CodeSnippet> {
        self.active_snippet_id
            .as_deref()
            .and_then(|id| self.snippets.get(id))
    }

    pub fn active_review(&self) -> Option<&ReviewResult> {
        self.active_review_id
            .as_deref()
            .and_then(|id| self.history.get(id))
    }

    pub fn active_snippet_id(&self) -> Option<&str> {
        self.active_snippet_id.as_deref()
    }

    pub fn active_review_id(&self) -> Option<&str> {
        self.active_review_id.as_deref()
    }

    pub fn snippets(&self) -> &SnippetRepository {
        &self.snippets
    }

    pub fn history(&self) -> &ReviewHistory {
        &self.history
    }
}
