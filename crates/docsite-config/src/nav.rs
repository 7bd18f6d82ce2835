//! Declared navigation entries.
//!
//! The `nav` key is an ordered sequence where each item is one of:
//!
//! - `page.md` - a page whose title comes from the page itself
//! - `{Label: page.md}` - a titled page
//! - `{Label: https://example.com}` - an external link
//! - `{Label: [...]}` - a section with nested entries
//!
//! Order is preserved exactly as declared.

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};
use serde_yaml::Value;

/// A single navigation entry.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum NavEntry {
    /// A markdown page, relative to `docs_dir`.
    Page {
        /// Explicit label, `None` for bare paths.
        #[serde(skip_serializing_if = "Option::is_none")]
        title: Option<String>,
        /// Source path as written in the document.
        path: String,
    },
    /// An external link, not resolved against `docs_dir`.
    Link {
        /// Label.
        title: String,
        /// Target URL.
        url: String,
    },
    /// A labeled group of entries.
    Section {
        /// Label.
        title: String,
        /// Nested entries in declared order.
        children: Vec<NavEntry>,
    },
}

impl NavEntry {
    /// Label used for display and sibling uniqueness checks.
    ///
    /// Bare page entries have no label and return `None`.
    #[must_use]
    pub fn label(&self) -> Option<&str> {
        match self {
            Self::Page { title, .. } => title.as_deref(),
            Self::Link { title, .. } | Self::Section { title, .. } => Some(title),
        }
    }

    /// Convert a raw YAML value into an entry.
    fn from_value(value: Value) -> Result<Self, String> {
        match value {
            Value::String(path) if is_external(&path) => Err(format!(
                "nav link `{path}` needs a label (use `- Label: {path}`)"
            )),
            Value::String(path) => Ok(Self::Page { title: None, path }),
            Value::Mapping(mapping) => {
                if mapping.len() != 1 {
                    return Err(format!(
                        "nav entry must have exactly one label, found {}",
                        mapping.len()
                    ));
                }
                let Some((key, target)) = mapping.into_iter().next() else {
                    return Err("nav entry must have exactly one label".to_owned());
                };
                let title = match key {
                    Value::String(title) => title,
                    other => return Err(format!("nav label must be a string, found {other:?}")),
                };
                match target {
                    Value::String(target) if is_external(&target) => Ok(Self::Link {
                        title,
                        url: target,
                    }),
                    Value::String(path) => Ok(Self::Page {
                        title: Some(title),
                        path,
                    }),
                    Value::Sequence(items) => {
                        let children = items
                            .into_iter()
                            .map(Self::from_value)
                            .collect::<Result<Vec<_>, _>>()?;
                        Ok(Self::Section { title, children })
                    }
                    Value::Null => Err(format!("nav entry `{title}` has no target")),
                    _ => Err(format!(
                        "nav entry `{title}` must point to a page, a link, or a list of entries"
                    )),
                }
            }
            _ => Err("nav entry must be a path or a single-key mapping".to_owned()),
        }
    }
}

impl<'de> Deserialize<'de> for NavEntry {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Self::from_value(value).map_err(D::Error::custom)
    }
}

/// Whether a target refers to something outside `docs_dir`.
///
/// Matches absolute URLs, protocol-relative URLs and `mailto:` links.
#[must_use]
pub fn is_external(target: &str) -> bool {
    target.starts_with("http://")
        || target.starts_with("https://")
        || target.starts_with("//")
        || target.starts_with("mailto:")
}
