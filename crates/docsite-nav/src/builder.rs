//! Navigation building.
//!
//! Turns the declared `nav` of a [`Config`] into a [`Navigation`] tree,
//! checking every page reference against a [`PageSource`]. When `nav` is
//! absent, the tree is generated from the docs directory instead:
//! - files come before subdirectories
//! - `index.md` (or `README.md`) sorts first within its directory
//! - everything else sorts alphabetically

use std::collections::{BTreeMap, BTreeSet, HashSet};

use docsite_config::{Config, NavEntry};

use crate::error::NavError;
use crate::navigation::{NavItem, Navigation};
use crate::page::{extract_title, is_index, page_url, title_from_name, title_from_path};
use crate::source::{PageSource, is_markdown};

/// Outcome of navigation resolution.
///
/// Reference errors are collected rather than returned early so a single
/// run reports every broken entry.
#[derive(Debug, Default)]
pub struct Resolution {
    /// Navigation tree. Entries with errors are left out.
    pub navigation: Navigation,
    /// Reference errors.
    pub errors: Vec<NavError>,
    /// Non-fatal findings.
    pub warnings: Vec<String>,
    /// Source paths referenced by page items.
    pub referenced: BTreeSet<String>,
}

/// Builds navigation for a site.
pub struct NavBuilder<'a> {
    config: &'a Config,
    source: &'a dyn PageSource,
}

impl<'a> NavBuilder<'a> {
    /// Create a builder over `config` reading pages from `source`.
    #[must_use]
    pub fn new(config: &'a Config, source: &'a dyn PageSource) -> Self {
        Self { config, source }
    }

    /// Build navigation, failing on the first reference error.
    ///
    /// # Errors
    ///
    /// Returns the first [`NavError`] found.
    pub fn build(&self) -> Result<Navigation, NavError> {
        let mut resolution = self.resolve()?;
        if resolution.errors.is_empty() {
            Ok(resolution.navigation)
        } else {
            Err(resolution.errors.swap_remove(0))
        }
    }

    /// Resolve navigation, collecting all reference errors.
    ///
    /// # Errors
    ///
    /// Returns [`NavError::Source`] if pages cannot be listed for a
    /// generated navigation.
    pub fn resolve(&self) -> Result<Resolution, NavError> {
        let mut resolution = Resolution::default();
        match &self.config.nav {
            Some(entries) => {
                let mut trail = Vec::new();
                resolution.navigation.items =
                    self.resolve_entries(entries, &mut trail, &mut resolution);
            }
            None => {
                resolution.navigation.items = self.generate(&mut resolution)?;
                resolution.navigation.generated = true;
            }
        }
        tracing::debug!(
            items = resolution.navigation.items.len(),
            errors = resolution.errors.len(),
            generated = resolution.navigation.generated,
            "Resolved navigation"
        );
        Ok(resolution)
    }

    fn resolve_entries(
        &self,
        entries: &[NavEntry],
        trail: &mut Vec<String>,
        resolution: &mut Resolution,
    ) -> Vec<NavItem> {
        let mut labels = HashSet::new();
        let mut items = Vec::with_capacity(entries.len());

        for entry in entries {
            if let Some(label) = entry.label()
                && !labels.insert(label)
            {
                resolution.errors.push(NavError::DuplicateLabel {
                    label: label.to_owned(),
                    parent: describe_parent(trail),
                });
            }

            match entry {
                NavEntry::Page { title, path } => {
                    if let Some(item) = self.resolve_page(title.as_deref(), path, resolution) {
                        items.push(item);
                    }
                }
                NavEntry::Link { title, url } => items.push(NavItem::link(title, url)),
                NavEntry::Section { title, children } => {
                    if children.is_empty() {
                        resolution.errors.push(NavError::EmptySection {
                            label: title.clone(),
                        });
                        continue;
                    }
                    trail.push(title.clone());
                    let children = self.resolve_entries(children, trail, resolution);
                    trail.pop();
                    items.push(NavItem::section(title, children));
                }
            }
        }

        items
    }

    fn resolve_page(
        &self,
        title: Option<&str>,
        path: &str,
        resolution: &mut Resolution,
    ) -> Option<NavItem> {
        let label = title.unwrap_or(path).to_owned();

        let Some(normalized) = normalize_path(path) else {
            resolution.errors.push(NavError::InvalidPath {
                label,
                path: path.to_owned(),
            });
            return None;
        };
        if !is_markdown(normalized) {
            resolution.errors.push(NavError::NotMarkdown {
                label,
                path: path.to_owned(),
            });
            return None;
        }
        if !self.source.exists(normalized) {
            resolution.errors.push(NavError::MissingPage {
                label,
                path: path.to_owned(),
            });
            return None;
        }
        if !resolution.referenced.insert(normalized.to_owned()) {
            resolution
                .warnings
                .push(format!("page `{normalized}` is listed in nav more than once"));
        }

        let title = title.map_or_else(|| self.page_title(normalized), str::to_owned);
        Some(NavItem::page(
            title,
            normalized,
            page_url(normalized, self.config.use_directory_urls),
        ))
    }

    /// Title of a page without an explicit label.
    fn page_title(&self, path: &str) -> String {
        self.source
            .read(path)
            .ok()
            .and_then(|content| extract_title(&content))
            .unwrap_or_else(|| title_from_path(path))
    }

    fn generate(&self, resolution: &mut Resolution) -> Result<Vec<NavItem>, NavError> {
        let pages = self.source.list_pages()?;

        let mut root = DirNode::default();
        for page in &pages {
            root.insert(page);
        }

        let items = self.emit(&root, resolution);
        Ok(items)
    }

    fn emit(&self, dir: &DirNode, resolution: &mut Resolution) -> Vec<NavItem> {
        let mut files: Vec<&String> = dir.files.iter().collect();
        files.sort_by_key(|path| (!is_index(path), path.to_ascii_lowercase()));

        let mut items = Vec::with_capacity(files.len() + dir.dirs.len());
        for path in files {
            resolution.referenced.insert(path.clone());
            items.push(NavItem::page(
                self.page_title(path),
                path.as_str(),
                page_url(path, self.config.use_directory_urls),
            ));
        }
        for (name, child) in &dir.dirs {
            let children = self.emit(child, resolution);
            if !children.is_empty() {
                items.push(NavItem::section(title_from_name(name), children));
            }
        }
        items
    }
}

/// Directory tree used for generated navigation.
#[derive(Default)]
struct DirNode {
    files: Vec<String>,
    dirs: BTreeMap<String, DirNode>,
}

impl DirNode {
    fn insert(&mut self, path: &str) {
        let mut node = self;
        let mut segments: Vec<&str> = path.split('/').collect();
        segments.pop();
        for segment in segments {
            node = node.dirs.entry(segment.to_owned()).or_default();
        }
        node.files.push(path.to_owned());
    }
}

/// Normalize a nav path: strip leading `./`, reject absolute paths and `..`.
fn normalize_path(path: &str) -> Option<&str> {
    let mut trimmed = path.trim();
    while let Some(rest) = trimmed.strip_prefix("./") {
        trimmed = rest;
    }
    let escapes = trimmed.starts_with('/')
        || trimmed.contains('\\')
        || trimmed.split('/').any(|segment| segment == "..");
    if trimmed.is_empty() || escapes {
        return None;
    }
    Some(trimmed)
}

fn describe_parent(trail: &[String]) -> String {
    if trail.is_empty() {
        "the top level".to_owned()
    } else {
        format!("section {}", trail.join(" > "))
    }
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use pretty_assertions::assert_eq;

    use super::*;
    use crate::mock::MockSource;

    fn config(yaml: &str) -> Config {
        Config::from_str_with_base(yaml, Path::new("/project")).unwrap()
    }

    #[test]
    fn test_declared_order_and_sections() {
        let config = config("site_name: Docs\nnav:\n  - A: a.md\n  - B:\n      - B1: b1.md\n");
        let source = MockSource::new().with_pages(&["a.md", "b1.md"]);

        let nav = NavBuilder::new(&config, &source).build().unwrap();

        assert_eq!(nav.titles(), vec!["A", "B"]);
        let b = nav.find(&["B"]).unwrap();
        assert!(b.is_expandable());
        assert_eq!(b.children[0].title, "B1");
        assert_eq!(b.children[0].url.as_deref(), Some("b1/"));
        assert!(!nav.generated);
    }

    #[test]
    fn test_every_declared_page_resolves() {
        let config = config(
            "site_name: Docs\nnav:\n  - Home: index.md\n  - Guides:\n      - guides/setup.md\n      - API: ./api/index.md\n",
        );
        let source = MockSource::new().with_pages(&["index.md", "guides/setup.md", "api/index.md"]);

        let nav = NavBuilder::new(&config, &source).build().unwrap();
        for page in nav.pages() {
            assert!(source.exists(page.source.as_deref().unwrap()));
        }
        assert_eq!(nav.pages().len(), 3);
        assert_eq!(
            nav.find(&["Guides", "API"]).unwrap().source.as_deref(),
            Some("api/index.md")
        );
    }

    #[test]
    fn test_missing_page_is_error() {
        let config = config("site_name: Docs\nnav:\n  - Home: index.md\n  - Gone: gone.md\n");
        let source = MockSource::new().with_pages(&["index.md"]);

        let err = NavBuilder::new(&config, &source).build().unwrap_err();
        assert!(
            matches!(&err, NavError::MissingPage { label, path } if label == "Gone" && path == "gone.md"),
            "got {err:?}"
        );
    }

    #[test]
    fn test_resolve_collects_all_errors() {
        let yaml = r"
site_name: Docs
nav:
  - A: a.md
  - A: missing.md
  - Style: css/site.css
  - Escape: ../outside.md
  - Empty: []
";
        let config = config(yaml);
        let source = MockSource::new()
            .with_pages(&["a.md"])
            .with_file("css/site.css", "");

        let resolution = NavBuilder::new(&config, &source).resolve().unwrap();

        assert_eq!(resolution.navigation.titles(), vec!["A"]);
        let kinds: Vec<_> = resolution
            .errors
            .iter()
            .map(|e| match e {
                NavError::DuplicateLabel { .. } => "duplicate",
                NavError::MissingPage { .. } => "missing",
                NavError::NotMarkdown { .. } => "not_markdown",
                NavError::InvalidPath { .. } => "invalid",
                NavError::EmptySection { .. } => "empty",
                NavError::Source(_) => "source",
            })
            .collect();
        assert_eq!(
            kinds,
            vec!["duplicate", "missing", "not_markdown", "invalid", "empty"]
        );
    }

    #[test]
    fn test_duplicate_label_in_section() {
        let config = config(
            "site_name: Docs\nnav:\n  - Guides:\n      - Setup: a.md\n      - Setup: b.md\n",
        );
        let source = MockSource::new().with_pages(&["a.md", "b.md"]);

        let err = NavBuilder::new(&config, &source).build().unwrap_err();
        assert_eq!(
            err.to_string(),
            "duplicate nav label `Setup` in section Guides"
        );
    }

    #[test]
    fn test_same_label_in_different_sections_is_allowed() {
        let config = config(
            "site_name: Docs\nnav:\n  - A:\n      - Overview: a.md\n  - B:\n      - Overview: b.md\n",
        );
        let source = MockSource::new().with_pages(&["a.md", "b.md"]);

        assert!(NavBuilder::new(&config, &source).build().is_ok());
    }

    #[test]
    fn test_bare_page_titles() {
        let config = config("site_name: Docs\nnav:\n  - intro.md\n  - getting-started.md\n");
        let source = MockSource::new()
            .with_file("intro.md", "# Introduction to Fidesops\n")
            .with_file("getting-started.md", "No heading here");

        let nav = NavBuilder::new(&config, &source).build().unwrap();
        assert_eq!(nav.titles(), vec!["Introduction to Fidesops", "Getting started"]);
    }

    #[test]
    fn test_front_matter_title_is_used_for_bare_pages() {
        let config = config("site_name: Docs\nnav:\n  - guides/policies.md\n  - Custom: guides/rules.md\n");
        let source = MockSource::new()
            .with_file(
                "guides/policies.md",
                "---\ntitle: >\n  Execution Policies\n---\n# Policies\n",
            )
            .with_file("guides/rules.md", "---\ntitle: Rules\n---\n");

        let nav = NavBuilder::new(&config, &source).build().unwrap();
        assert_eq!(nav.titles(), vec!["Execution Policies", "Custom"]);
    }

    #[test]
    fn test_generated_navigation_uses_front_matter_title() {
        let config = config("site_name: Docs");
        let source = MockSource::new().with_file("setup.md", "---\ntitle: 'Installing it'\n---\nBody\n");

        let nav = NavBuilder::new(&config, &source).build().unwrap();
        assert_eq!(nav.titles(), vec!["Installing it"]);
    }

    #[test]
    fn test_links_are_not_resolved() {
        let config = config("site_name: Docs\nnav:\n  - Repo: https://github.com/ethyca/fidesops\n");
        let nav = NavBuilder::new(&config, &MockSource::new()).build().unwrap();
        assert_eq!(
            nav.items,
            vec![NavItem::link("Repo", "https://github.com/ethyca/fidesops")]
        );
    }

    #[test]
    fn test_file_urls() {
        let config = config(
            "site_name: Docs\nuse_directory_urls: false\nnav:\n  - Home: index.md\n  - Guide: guide.md\n",
        );
        let source = MockSource::new().with_pages(&["index.md", "guide.md"]);

        let nav = NavBuilder::new(&config, &source).build().unwrap();
        let urls: Vec<_> = nav.pages().iter().filter_map(|p| p.url.as_deref()).collect();
        assert_eq!(urls, vec!["index.html", "guide.html"]);
    }

    #[test]
    fn test_repeated_page_is_warning() {
        let config = config("site_name: Docs\nnav:\n  - One: a.md\n  - Two: a.md\n");
        let source = MockSource::new().with_pages(&["a.md"]);

        let resolution = NavBuilder::new(&config, &source).resolve().unwrap();
        assert!(resolution.errors.is_empty());
        assert_eq!(
            resolution.warnings,
            vec!["page `a.md` is listed in nav more than once".to_owned()]
        );
    }

    #[test]
    fn test_generated_navigation() {
        let config = config("site_name: Docs");
        let source = MockSource::new()
            .with_file("index.md", "# Welcome")
            .with_pages(&[
                "about.md",
                "user-guide/index.md",
                "user-guide/zeta.md",
                "user-guide/alpha.md",
                "api/v1/README.md",
            ]);

        let nav = NavBuilder::new(&config, &source).build().unwrap();

        assert!(nav.generated);
        assert_eq!(nav.titles(), vec!["Welcome", "About", "Api", "User guide"]);
        let guide: Vec<_> = nav
            .find(&["User guide"])
            .unwrap()
            .children
            .iter()
            .map(|c| c.title.as_str())
            .collect();
        assert_eq!(guide, vec!["User guide", "Alpha", "Zeta"]);
        assert_eq!(
            nav.find(&["Api", "V1", "V1"]).unwrap().url.as_deref(),
            Some("api/v1/")
        );
    }

    #[test]
    fn test_generated_pages_come_before_sections() {
        let config = config("site_name: Docs");
        let source = MockSource::new().with_pages(&["a/x.md", "b.md", "C.md"]);

        let nav = NavBuilder::new(&config, &source).build().unwrap();
        assert_eq!(nav.titles(), vec!["B", "C", "A"]);
        assert_eq!(nav.find(&["A", "X"]).unwrap().source.as_deref(), Some("a/x.md"));
    }

    #[test]
    fn test_generated_navigation_is_stable() {
        let config = config("site_name: Docs");
        let source = MockSource::new().with_pages(&["b.md", "a.md", "c/d.md"]);

        let first = NavBuilder::new(&config, &source).build().unwrap();
        let second = NavBuilder::new(&config, &source).build().unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_normalize_path() {
        assert_eq!(normalize_path("./a.md"), Some("a.md"));
        assert_eq!(normalize_path(" guides/a.md "), Some("guides/a.md"));
        assert_eq!(normalize_path("/abs.md"), None);
        assert_eq!(normalize_path("a/../b.md"), None);
        assert_eq!(normalize_path(""), None);
    }
}
