//! Coderev - on-demand heuristic code review.
//!
//! Coderev scans a source buffer with a fixed set of line-level heuristic
//! rules, scores four normalized quality metrics plus a weighted aggregate,
//! and produces a narrative summary. Around that engine sits a small
//! in-memory session: the buffer being edited, a library of named saved
//! snippets, and a newest-first history of past reviews, with active
//! pointers tracking which snippet and review are currently displayed.
//!
//! # Architecture
//!
//! - `scan`: line-by-line issue detection (severity-tagged, no AST)
//! - `metrics`: the four 0-100 sub-scores and the aggregate
//! - `analyzer`: one-shot composition of scan + metrics
//! - `summary`: deterministic narrative paragraph from a result
//! - `session`: buffer, snippet repository, review history, active pointers
//! - `report`: pretty/markdown/JSON output
//! - `language`: supported languages and the extension table
//! - `cli`: the `coderev` binary's commands
//!
//! The analysis side is pure functions of text; `Session` is the only
//! mutation entry point and serializes its commands through `&mut self`.

pub mod analyzer;
pub mod cli;
pub mod language;
pub mod metrics;
pub mod report;
pub mod scan;
pub mod session;
pub mod summary;

pub use analyzer::{analyze, Analysis};
pub use language::Language;
pub use metrics::CodeMetrics;
pub use scan::{CodeIssue, Severity};
pub use session::{CodeSnippet, ReviewResult, Session, UNSAVED_SNIPPET_ID};
