//! Recognized theme, markdown extension and plugin identifiers.

use std::collections::BTreeSet;
use std::fmt;

use crate::ConfigError;

const THEMES: &[&str] = &["material", "mkdocs", "readthedocs"];

/// Python-Markdown built-ins and the `pymdownx` family.
const MARKDOWN_EXTENSIONS: &[&str] = &[
    "abbr",
    "admonition",
    "attr_list",
    "codehilite",
    "def_list",
    "extra",
    "fenced_code",
    "footnotes",
    "legacy_attrs",
    "legacy_em",
    "md_in_html",
    "meta",
    "nl2br",
    "sane_lists",
    "smarty",
    "tables",
    "toc",
    "wikilinks",
    "pymdownx.arithmatex",
    "pymdownx.b64",
    "pymdownx.betterem",
    "pymdownx.blocks.admonition",
    "pymdownx.blocks.details",
    "pymdownx.blocks.html",
    "pymdownx.blocks.tab",
    "pymdownx.caret",
    "pymdownx.critic",
    "pymdownx.details",
    "pymdownx.emoji",
    "pymdownx.escapeall",
    "pymdownx.extra",
    "pymdownx.highlight",
    "pymdownx.inlinehilite",
    "pymdownx.keys",
    "pymdownx.magiclink",
    "pymdownx.mark",
    "pymdownx.progressbar",
    "pymdownx.saneheaders",
    "pymdownx.smartsymbols",
    "pymdownx.snippets",
    "pymdownx.striphtml",
    "pymdownx.superfences",
    "pymdownx.tabbed",
    "pymdownx.tasklist",
    "pymdownx.tilde",
];

const PLUGINS: &[&str] = &[
    "search",
    "awesome-pages",
    "blog",
    "git-revision-date-localized",
    "include-markdown",
    "info",
    "macros",
    "mermaid2",
    "minify",
    "mkdocstrings",
    "offline",
    "optimize",
    "privacy",
    "redirects",
    "render_swagger",
    "social",
    "swagger-ui-tag",
    "tags",
];

/// Prefix accepted on built-in extension names.
const EXTENSION_PREFIX: &str = "markdown.extensions.";
/// Namespace accepted on plugin names.
const PLUGIN_NAMESPACE: &str = "material/";

/// Kind of identifier being checked.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum IdentifierKind {
    /// `theme.name`.
    Theme,
    /// An entry of `markdown_extensions`.
    MarkdownExtension,
    /// An entry of `plugins`.
    Plugin,
}

impl fmt::Display for IdentifierKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Theme => "theme",
            Self::MarkdownExtension => "markdown extension",
            Self::Plugin => "plugin",
        })
    }
}

/// Set of identifiers the renderer understands.
///
/// [`Registry::builtin`] covers the stock themes, the Python-Markdown and
/// `pymdownx` extensions and common plugins. Sites using other packages
/// register them with the `with_*` builders.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Registry {
    themes: BTreeSet<String>,
    extensions: BTreeSet<String>,
    plugins: BTreeSet<String>,
}

impl Default for Registry {
    fn default() -> Self {
        Self::builtin()
    }
}

impl Registry {
    /// Registry with the built-in identifiers.
    #[must_use]
    pub fn builtin() -> Self {
        Self {
            themes: owned(THEMES),
            extensions: owned(MARKDOWN_EXTENSIONS),
            plugins: owned(PLUGINS),
        }
    }

    /// Registry that recognizes nothing.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            themes: BTreeSet::new(),
            extensions: BTreeSet::new(),
            plugins: BTreeSet::new(),
        }
    }

    /// Register an additional theme.
    #[must_use]
    pub fn with_theme(mut self, name: impl Into<String>) -> Self {
        self.themes.insert(name.into());
        self
    }

    /// Register an additional markdown extension.
    #[must_use]
    pub fn with_extension(mut self, name: impl Into<String>) -> Self {
        self.extensions.insert(name.into());
        self
    }

    /// Register an additional plugin.
    #[must_use]
    pub fn with_plugin(mut self, name: impl Into<String>) -> Self {
        self.plugins.insert(name.into());
        self
    }

    /// Whether `name` is recognized for `kind`.
    #[must_use]
    pub fn contains(&self, kind: IdentifierKind, name: &str) -> bool {
        match kind {
            IdentifierKind::Theme => self.themes.contains(name),
            IdentifierKind::MarkdownExtension => {
                self.extensions.contains(name)
                    || name
                        .strip_prefix(EXTENSION_PREFIX)
                        .is_some_and(|short| self.extensions.contains(short))
            }
            IdentifierKind::Plugin => {
                self.plugins.contains(name)
                    || name
                        .strip_prefix(PLUGIN_NAMESPACE)
                        .is_some_and(|short| self.plugins.contains(short))
            }
        }
    }

    /// Fail with [`ConfigError::UnknownIdentifier`] if `name` is not recognized.
    pub fn require(&self, kind: IdentifierKind, name: &str) -> Result<(), ConfigError> {
        if self.contains(kind, name) {
            return Ok(());
        }
        Err(ConfigError::UnknownIdentifier {
            kind,
            name: name.to_owned(),
        })
    }
}

fn owned(names: &[&str]) -> BTreeSet<String> {
    names.iter().map(|&n| n.to_owned()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_identifiers() {
        let registry = Registry::builtin();
        assert!(registry.contains(IdentifierKind::Theme, "material"));
        assert!(registry.contains(IdentifierKind::MarkdownExtension, "admonition"));
        assert!(registry.contains(IdentifierKind::MarkdownExtension, "pymdownx.superfences"));
        assert!(registry.contains(IdentifierKind::Plugin, "search"));
        assert!(!registry.contains(IdentifierKind::Plugin, "admonition"));
    }

    #[test]
    fn test_prefixed_names() {
        let registry = Registry::builtin();
        assert!(registry.contains(IdentifierKind::MarkdownExtension, "markdown.extensions.toc"));
        assert!(registry.contains(IdentifierKind::Plugin, "material/search"));
        assert!(!registry.contains(IdentifierKind::MarkdownExtension, "markdown.extensions.nope"));
    }

    #[test]
    fn test_registered_identifiers() {
        let registry = Registry::empty()
            .with_theme("dracula")
            .with_extension("custom_ext")
            .with_plugin("neoteroi.mkdocsoad");
        assert!(registry.contains(IdentifierKind::Theme, "dracula"));
        assert!(registry.contains(IdentifierKind::MarkdownExtension, "custom_ext"));
        assert!(registry.contains(IdentifierKind::Plugin, "neoteroi.mkdocsoad"));
        assert!(!registry.contains(IdentifierKind::Theme, "material"));
    }

    #[test]
    fn test_require_reports_kind_and_name() {
        let err = Registry::builtin()
            .require(IdentifierKind::MarkdownExtension, "pymdownx.unknown")
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "Unknown markdown extension: pymdownx.unknown"
        );
    }
}
