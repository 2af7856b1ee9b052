//! Command-line interface for coderev.

use anyhow::Context;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::time::Duration;

use crate::language::{Language, ALL_LANGUAGES};
use crate::report;
use crate::scan::Severity;
use crate::session::Session;

/// Exit codes.
pub const EXIT_SUCCESS: i32 = 0;
pub const EXIT_FAILED: i32 = 1;
pub const EXIT_ERROR: i32 = 2;

/// On-demand heuristic code review.
///
/// Coderev scans a source file line by line with a fixed heuristic rule
/// set, scores four quality metrics, and prints a reviewed summary. It is
/// deliberately not a real linter: no AST, no language-aware parsing, just
/// fast whole-text heuristics.
#[derive(Parser)]
#[command(name = "coderev")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Review a source file and print the result
    #[command(visible_alias = "check")]
    Review(ReviewArgs),
    /// List supported languages and their file extensions
    Languages,
}

/// Arguments for the review command.
#[derive(Parser)]
pub struct ReviewArgs {
    /// File to review
    pub file: PathBuf,

    /// Language override (default: derived from the file extension)
    #[arg(short, long)]
    pub language: Option<String>,

    /// Output format: pretty, markdown, or json
    #[arg(short, long, default_value = "pretty")]
    pub format: String,

    /// Artificial analysis delay in milliseconds
    #[arg(long, default_value_t = 0)]
    pub delay_ms: u64,
}

/// Run the review command.
pub async fn run_review(args: &ReviewArgs) -> anyhow::Result<i32> {
    if args.format != "pretty" && args.format != "markdown" && args.format != "json" {
        eprintln!(
            "Error: invalid format {:?}, must be 'pretty', 'markdown', or 'json'",
            args.format
        );
        return Ok(EXIT_ERROR);
    }

    let language = match &args.language {
        Some(name) => match name.parse::<Language>() {
            Ok(l) => Some(l),
            Err(e) => {
                eprintln!("Error: {}", e);
                eprintln!("Run 'coderev languages' to see supported languages");
                return Ok(EXIT_ERROR);
            }
        },
        None => args
            .file
            .extension()
            .and_then(|e| e.to_str())
            .and_then(Language::from_extension),
    };

    let code = std::fs::read_to_string(&args.file)
        .with_context(|| format!("cannot read {}", args.file.display()))?;

    if code.trim().is_empty() {
        eprintln!("Warning: nothing to review in {}", args.file.display());
        return Ok(EXIT_SUCCESS);
    }

    let snippet_name = args
        .file
        .file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_else(|| args.file.display().to_string());

    let mut session = Session::with_delay(Duration::from_millis(args.delay_ms));
    if let Some(language) = language {
        session.set_language(language);
    }
    session.set_code(code);
    session.save(&snippet_name);
    session.analyze().await;

    let review = session
        .active_review()
        .context("analysis produced no review")?;

    match args.format.as_str() {
        "markdown" => print!("{}", report::to_markdown(review)),
        "json" => report::write_json(review)?,
        _ => report::write_pretty(review),
    }

    let has_errors = review.issues.iter().any(|i| i.severity == Severity::Error);
    if has_errors {
        Ok(EXIT_FAILED)
    } else {
        Ok(EXIT_SUCCESS)
    }
}

/// Run the languages command.
pub fn run_languages() -> anyhow::Result<i32> {
    println!("Supported languages:");
    println!();

    for language in ALL_LANGUAGES {
        let extensions: Vec<String> = language
            .extensions()
            .iter()
            .map(|e| format!(".{}", e))
            .collect();
        println!("  {:<12} {}", language.as_str(), extensions.join(", "));
    }

    println!();
    println!("Usage:");
    println!("  coderev review <file> [--language <name>]");

    Ok(EXIT_SUCCESS)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn temp_source(suffix: &str, contents: &str) -> NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(suffix).tempfile().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[tokio::test]
    async fn test_review_clean_file_succeeds() {
        let file = temp_source(".rs", "fn main() {\n    println!(\"hi\");\n}\n");
        let args = ReviewArgs {
            file: file.path().to_path_buf(),
            language: None,
            format: "markdown".to_string(),
            delay_ms: 0,
        };
        assert_eq!(run_review(&args).await.unwrap(), EXIT_SUCCESS);
    }

    #[tokio::test]
    async fn test_review_fails_on_error_issues() {
        let file = temp_source(".js", "try { f() } catch (e)\n{}\n");
        let args = ReviewArgs {
            file: file.path().to_path_buf(),
            language: None,
            format: "markdown".to_string(),
            delay_ms: 0,
        };
        assert_eq!(run_review(&args).await.unwrap(), EXIT_FAILED);
    }

    #[tokio::test]
    async fn test_review_rejects_bad_format() {
        let file = temp_source(".py", "print('x')\n");
        let args = ReviewArgs {
            file: file.path().to_path_buf(),
            language: None,
            format: "yaml".to_string(),
            delay_ms: 0,
        };
        assert_eq!(run_review(&args).await.unwrap(), EXIT_ERROR);
    }

    #[tokio::test]
    async fn test_review_rejects_unknown_language() {
        let file = temp_source(".js", "let a = 1;\n");
        let args = ReviewArgs {
            file: file.path().to_path_buf(),
            language: Some("cobol".to_string()),
            format: "pretty".to_string(),
            delay_ms: 0,
        };
        assert_eq!(run_review(&args).await.unwrap(), EXIT_ERROR);
    }

    #[tokio::test]
    async fn test_review_missing_file_is_error() {
        let args = ReviewArgs {
            file: PathBuf::from("/no/such/file.js"),
            language: None,
            format: "pretty".to_string(),
            delay_ms: 0,
        };
        assert!(run_review(&args).await.is_err());
    }
}
