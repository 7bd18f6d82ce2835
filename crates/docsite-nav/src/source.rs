//! Page source trait and error types.
//!
//! All path parameters are paths relative to `docs_dir` using `/` as the
//! separator, exactly as they appear in the `nav` section (e.g. `index.md`,
//! `guides/install.md`).

use std::path::PathBuf;

/// Read access to the documentation sources.
///
/// Implementations must reject paths that escape the docs directory.
pub trait PageSource: Send + Sync {
    /// Whether a file exists at `path`.
    fn exists(&self, path: &str) -> bool;

    /// Read the content of the file at `path`.
    fn read(&self, path: &str) -> Result<String, SourceError>;

    /// All markdown pages, sorted by path.
    fn list_pages(&self) -> Result<Vec<String>, SourceError>;
}

/// Error returned by [`PageSource`] implementations.
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    /// File or directory does not exist.
    #[error("Not found: {}", .0.display())]
    NotFound(PathBuf),
    /// Path escapes the docs directory.
    #[error("Invalid path: {0}")]
    InvalidPath(String),
    /// I/O error.
    #[error("I/O error at {}: {source}", path.display())]
    Io {
        /// Path being accessed.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },
}

/// Whether `path` names a markdown page.
#[must_use]
pub fn is_markdown(path: &str) -> bool {
    let lower = path.to_ascii_lowercase();
    lower.ends_with(".md") || lower.ends_with(".markdown")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_markdown() {
        assert!(is_markdown("index.md"));
        assert!(is_markdown("guides/Setup.MD"));
        assert!(is_markdown("notes.markdown"));
        assert!(!is_markdown("css/site.css"));
        assert!(!is_markdown("md"));
    }
}
