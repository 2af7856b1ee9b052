//! Saved snippet storage.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::language::Language;

/// A named, saved piece of source code.
///
/// Identity is `id`; `created_at` never changes after creation, the rest
/// is overwritten in place on update.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CodeSnippet {
    pub id: String,
    pub name: String,
    pub language: Language,
    pub code: String,
    pub created_at: DateTime<Utc>,
}

impl CodeSnippet {
    pub fn new(name: impl Into<String>, language: Language, code: impl Into<String>) -> Self {
        CodeSnippet {
            id: uuid::Uuid::new_v4().to_string(),
            name: name.into(),
            language,
            code: code.into(),
            created_at: Utc::now(),
        }
    }
}

/// In-memory snippet collection, most recent first.
#[derive(Debug, Default)]
pub struct SnippetRepository {
    snippets: Vec<CodeSnippet>,
}

impl SnippetRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Prepend a snippet (newest-first ordering).
    pub fn insert(&mut self, snippet: CodeSnippet) {
        self.snippets.insert(0, snippet);
    }

    pub fn get(&self, id: &str) -> Option<&CodeSnippet> {
        self.snippets.iter().find(|s| s.id == id)
    }

    /// Overwrite code and language in place, keeping `created_at` and the
    /// collection position. Absent ids are a no-op.
    pub fn update(&mut self, id: &str, code: &str, language: Language) {
        if let Some(snippet) = self.snippets.iter_mut().find(|s| s.id == id) {
            snippet.code = code.to_string();
            snippet.language = language;
        }
    }

    /// Remove a snippet. Returns whether anything was removed.
    pub fn remove(&mut self, id: &str) -> bool {
        let before = self.snippets.len();
        self.snippets.retain(|s| s.id != id);
        self.snippets.len() != before
    }

    pub fn iter(&self) -> impl Iterator<Item = &CodeSnippet> {
        self.snippets.iter()
    }

    pub fn len(&self) -> usize {
        self.snippets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snippets.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_is_newest_first() {
        let mut repo = SnippetRepository::new();
        repo.insert(CodeSnippet::new("first", Language::Rust, "a"));
        repo.insert(CodeSnippet::new("second", Language::Rust, "b"));

        let names: Vec<&str> = repo.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["second", "first"]);
    }

    #[test]
    fn test_update_preserves_identity_and_position() {
        let mut repo = SnippetRepository::new();
        repo.insert(CodeSnippet::new("a", Language::JavaScript, "old"));
        repo.insert(CodeSnippet::new("b", Language::JavaScript, "x"));

        let target = repo.iter().last().unwrap();
        let id = target.id.clone();
        let created = target.created_at;

        repo.update(&id, "new", Language::TypeScript);

        assert_eq!(repo.len(), 2);
        let updated = repo.iter().last().unwrap();
        assert_eq!(updated.id, id);
        assert_eq!(updated.code, "new");
        assert_eq!(updated.language, Language::TypeScript);
        assert_eq!(updated.created_at, created);
    }

    #[test]
    fn test_update_absent_id_is_noop() {
        let mut repo = SnippetRepository::new();
        repo.insert(CodeSnippet::new("a", Language::Go, "code"));
        repo.update("missing", "other", Language::Rust);
        assert_eq!(repo.iter().next().unwrap().code, "code");
    }

    #[test]
    fn test_remove() {
        let mut repo = SnippetRepository::new();
        repo.insert(CodeSnippet::new("a", Language::Go, "code"));
        let id = repo.iter().next().unwrap().id.clone();

        assert!(repo.remove(&id));
        assert!(repo.is_empty());
        assert!(!repo.remove(&id));
    }
}
