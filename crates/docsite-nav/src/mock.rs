//! Mock page source for testing.
//!
//! Provides [`MockSource`] for unit testing without filesystem access.

use std::collections::BTreeMap;
use std::path::PathBuf;

use crate::source::{PageSource, SourceError, is_markdown};

/// In-memory page source.
///
/// # Example
///
/// ```ignore
/// use docsite_nav::{MockSource, PageSource};
///
/// let source = MockSource::new()
///     .with_file("index.md", "# Home")
///     .with_file("css/site.css", "");
///
/// assert_eq!(source.list_pages().unwrap(), vec!["index.md"]);
/// ```
#[derive(Debug, Default, Clone)]
pub struct MockSource {
    files: BTreeMap<String, String>,
}

impl MockSource {
    /// Create an empty source.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a file with content.
    #[must_use]
    pub fn with_file(mut self, path: impl Into<String>, content: impl Into<String>) -> Self {
        self.files.insert(path.into(), content.into());
        self
    }

    /// Add several empty markdown pages.
    #[must_use]
    pub fn with_pages(self, paths: &[&str]) -> Self {
        paths
            .iter()
            .fold(self, |source, path| source.with_file(*path, ""))
    }
}

impl PageSource for MockSource {
    fn exists(&self, path: &str) -> bool {
        self.files.contains_key(path)
    }

    fn read(&self, path: &str) -> Result<String, SourceError> {
        self.files
            .get(path)
            .cloned()
            .ok_or_else(|| SourceError::NotFound(PathBuf::from(path)))
    }

    fn list_pages(&self) -> Result<Vec<String>, SourceError> {
        Ok(self
            .files
            .keys()
            .filter(|path| is_markdown(path))
            .cloned()
            .collect())
    }
}
