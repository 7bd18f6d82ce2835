//! Filesystem page source.

use std::fs;
use std::path::{Component, Path, PathBuf};

use crate::source::{PageSource, SourceError, is_markdown};

/// Page source backed by a docs directory on disk.
///
/// Hidden files and directories (leading `.`) are not listed.
///
/// # Example
///
/// ```ignore
/// use docsite_nav::{FsSource, PageSource};
///
/// let source = FsSource::new("docs".into());
/// assert!(source.exists("index.md"));
/// ```
#[derive(Debug, Clone)]
pub struct FsSource {
    /// Root directory for markdown sources.
    docs_dir: PathBuf,
}

impl FsSource {
    /// Create a source rooted at `docs_dir`.
    #[must_use]
    pub fn new(docs_dir: PathBuf) -> Self {
        Self { docs_dir }
    }

    /// Root directory.
    #[must_use]
    pub fn docs_dir(&self) -> &Path {
        &self.docs_dir
    }

    /// Validate that a path doesn't escape the docs directory.
    ///
    /// Rejects absolute paths and parent directory components (`..`).
    fn full_path(&self, path: &str) -> Result<PathBuf, SourceError> {
        let relative = Path::new(path);
        let escapes = relative
            .components()
            .any(|c| !matches!(c, Component::Normal(_) | Component::CurDir));
        if path.is_empty() || escapes {
            return Err(SourceError::InvalidPath(path.to_owned()));
        }
        Ok(self.docs_dir.join(relative))
    }

    /// Scan a directory recursively, collecting markdown paths.
    fn scan_directory(
        &self,
        dir_path: &Path,
        prefix: &str,
        pages: &mut Vec<String>,
    ) -> Result<(), SourceError> {
        let entries = fs::read_dir(dir_path).map_err(|source| SourceError::Io {
            path: dir_path.to_path_buf(),
            source,
        })?;

        for entry in entries.filter_map(Result::ok) {
            let name = entry.file_name().to_string_lossy().into_owned();
            if name.starts_with('.') {
                continue;
            }
            let rel = if prefix.is_empty() {
                name
            } else {
                format!("{prefix}/{name}")
            };

            if entry.file_type().is_ok_and(|t| t.is_dir()) {
                self.scan_directory(&entry.path(), &rel, pages)?;
            } else if is_markdown(&rel) {
                pages.push(rel);
            }
        }
        Ok(())
    }
}

impl PageSource for FsSource {
    fn exists(&self, path: &str) -> bool {
        self.full_path(path).is_ok_and(|p| p.is_file())
    }

    fn read(&self, path: &str) -> Result<String, SourceError> {
        let full_path = self.full_path(path)?;
        fs::read_to_string(&full_path).map_err(|source| {
            if source.kind() == std::io::ErrorKind::NotFound {
                SourceError::NotFound(full_path.clone())
            } else {
                SourceError::Io {
                    path: full_path.clone(),
                    source,
                }
            }
        })
    }

    fn list_pages(&self) -> Result<Vec<String>, SourceError> {
        if !self.docs_dir.is_dir() {
            return Err(SourceError::NotFound(self.docs_dir.clone()));
        }
        let mut pages = Vec::new();
        self.scan_directory(&self.docs_dir, "", &mut pages)?;
        pages.sort();
        tracing::debug!(count = pages.len(), docs_dir = %self.docs_dir.display(), "Listed pages");
        Ok(pages)
    }
}
