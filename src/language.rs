//! Supported source languages.

use serde::{Deserialize, Serialize};

/// Languages a snippet can declare.
///
/// The scanner only has language-specific rules for JavaScript and
/// TypeScript; every other variant still gets the generic rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    JavaScript,
    TypeScript,
    Python,
    Java,
    CSharp,
    Cpp,
    Go,
    Ruby,
    Php,
    Swift,
    Kotlin,
    Rust,
}

/// All supported languages, in display order.
pub const ALL_LANGUAGES: &[Language] = &[
    Language::JavaScript,
    Language::TypeScript,
    Language::Python,
    Language::Java,
    Language::CSharp,
    Language::Cpp,
    Language::Go,
    Language::Ruby,
    Language::Php,
    Language::Swift,
    Language::Kotlin,
    Language::Rust,
];

impl Language {
    pub fn as_str(&self) -> &'static str {
        match self {
            Language::JavaScript => "javascript",
            Language::TypeScript => "typescript",
            Language::Python => "python",
            Language::Java => "java",
            Language::CSharp => "csharp",
            Language::Cpp => "cpp",
            Language::Go => "go",
            Language::Ruby => "ruby",
            Language::Php => "php",
            Language::Swift => "swift",
            Language::Kotlin => "kotlin",
            Language::Rust => "rust",
        }
    }

    /// Map a file extension to a language.
    ///
    /// Returns `None` for unrecognized extensions so callers can leave
    /// their current language unchanged.
    pub fn from_extension(ext: &str) -> Option<Language> {
        match ext.to_lowercase().as_str() {
            "js" | "jsx" => Some(Language::JavaScript),
            "ts" | "tsx" => Some(Language::TypeScript),
            "py" => Some(Language::Python),
            "java" => Some(Language::Java),
            "cs" => Some(Language::CSharp),
            "cpp" => Some(Language::Cpp),
            "go" => Some(Language::Go),
            "rb" => Some(Language::Ruby),
            "php" => Some(Language::Php),
            "swift" => Some(Language::Swift),
            "kt" => Some(Language::Kotlin),
            "rs" => Some(Language::Rust),
            _ => None,
        }
    }

    /// Extensions recognized for this language, primary first.
    pub fn extensions(&self) -> &'static [&'static str] {
        match self {
            Language::JavaScript => &["js", "jsx"],
            Language::TypeScript => &["ts", "tsx"],
            Language::Python => &["py"],
            Language::Java => &["java"],
            Language::CSharp => &["cs"],
            Language::Cpp => &["cpp"],
            Language::Go => &["go"],
            Language::Ruby => &["rb"],
            Language::Php => &["php"],
            Language::Swift => &["swift"],
            Language::Kotlin => &["kt"],
            Language::Rust => &["rs"],
        }
    }
}

impl std::fmt::Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for Language {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "javascript" => Ok(Language::JavaScript),
            "typescript" => Ok(Language::TypeScript),
            "python" => Ok(Language::Python),
            "java" => Ok(Language::Java),
            "csharp" => Ok(Language::CSharp),
            "cpp" => Ok(Language::Cpp),
            "go" => Ok(Language::Go),
            "ruby" => Ok(Language::Ruby),
            "php" => Ok(Language::Php),
            "swift" => Ok(Language::Swift),
            "kotlin" => Ok(Language::Kotlin),
            "rust" => Ok(Language::Rust),
            _ => Err(format!("unknown language: {}", s)),
        }
    }
}
