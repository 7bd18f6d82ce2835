//! Navigation errors.

use crate::source::SourceError;

/// Reference error found while resolving navigation.
#[derive(Debug, thiserror::Error)]
pub enum NavError {
    /// Entry points to a file that does not exist.
    #[error("nav entry `{label}` points to missing file `{path}`")]
    MissingPage {
        /// Entry label (the path for bare entries).
        label: String,
        /// Target path as written.
        path: String,
    },
    /// Entry points to a file that is not markdown.
    #[error("nav entry `{label}` points to `{path}`, which is not a markdown page")]
    NotMarkdown {
        /// Entry label.
        label: String,
        /// Target path as written.
        path: String,
    },
    /// Entry path escapes the docs directory.
    #[error("nav entry `{label}` has invalid path `{path}`: paths must be relative to docs_dir")]
    InvalidPath {
        /// Entry label.
        label: String,
        /// Target path as written.
        path: String,
    },
    /// Two siblings share a label.
    #[error("duplicate nav label `{label}` in {parent}")]
    DuplicateLabel {
        /// Repeated label.
        label: String,
        /// Location, e.g. `the top level` or `section Guides > API`.
        parent: String,
    },
    /// Section without entries.
    #[error("nav section `{label}` has no entries")]
    EmptySection {
        /// Section label.
        label: String,
    },
    /// Page source failure.
    #[error("{0}")]
    Source(#[from] SourceError),
}
