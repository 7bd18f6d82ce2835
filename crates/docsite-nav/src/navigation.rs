//! Resolved navigation tree.

use std::fmt;

use serde::Serialize;

/// Kind of navigation item.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NavKind {
    /// A markdown page.
    Page,
    /// An expandable group.
    Section,
    /// An external link.
    Link,
}

/// Navigation item with children for UI tree.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct NavItem {
    /// Display title.
    pub title: String,
    /// Item kind.
    pub kind: NavKind,
    /// Page URL (without leading slash) or external link target.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    /// Source path relative to `docs_dir`, for pages.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    /// Child navigation items.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<NavItem>,
}

impl NavItem {
    /// Page item.
    #[must_use]
    pub fn page(title: impl Into<String>, source: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            kind: NavKind::Page,
            url: Some(url.into()),
            source: Some(source.into()),
            children: Vec::new(),
        }
    }

    /// External link item.
    #[must_use]
    pub fn link(title: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            kind: NavKind::Link,
            url: Some(url.into()),
            source: None,
            children: Vec::new(),
        }
    }

    /// Section item.
    #[must_use]
    pub fn section(title: impl Into<String>, children: Vec<NavItem>) -> Self {
        Self {
            title: title.into(),
            kind: NavKind::Section,
            url: None,
            source: None,
            children,
        }
    }

    /// Whether the item can be expanded to reveal children.
    #[must_use]
    pub fn is_expandable(&self) -> bool {
        self.kind == NavKind::Section && !self.children.is_empty()
    }

    fn write_tree(&self, f: &mut fmt::Formatter<'_>, depth: usize) -> fmt::Result {
        let indent = "  ".repeat(depth);
        match self.kind {
            NavKind::Page => writeln!(
                f,
                "{indent}- {} [{}]",
                self.title,
                self.source.as_deref().unwrap_or_default()
            )?,
            NavKind::Link => writeln!(
                f,
                "{indent}- {} -> {}",
                self.title,
                self.url.as_deref().unwrap_or_default()
            )?,
            NavKind::Section => writeln!(f, "{indent}+ {}", self.title)?,
        }
        for child in &self.children {
            child.write_tree(f, depth + 1)?;
        }
        Ok(())
    }
}

/// Navigation tree in display order.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct Navigation {
    /// Top-level items.
    pub items: Vec<NavItem>,
    /// True if the tree was generated from the docs directory rather than
    /// declared in `nav`.
    pub generated: bool,
}

impl Navigation {
    /// Top-level titles in order.
    #[must_use]
    pub fn titles(&self) -> Vec<&str> {
        self.items.iter().map(|item| item.title.as_str()).collect()
    }

    /// All page items, depth-first in display order.
    #[must_use]
    pub fn pages(&self) -> Vec<&NavItem> {
        fn collect<'a>(items: &'a [NavItem], out: &mut Vec<&'a NavItem>) {
            for item in items {
                if item.kind == NavKind::Page {
                    out.push(item);
                }
                collect(&item.children, out);
            }
        }

        let mut pages = Vec::new();
        collect(&self.items, &mut pages);
        pages
    }

    /// Find an item by its title path, e.g. `["Guides", "Policies"]`.
    #[must_use]
    pub fn find(&self, titles: &[&str]) -> Option<&NavItem> {
        let (first, rest) = titles.split_first()?;
        let mut item = self.items.iter().find(|item| item.title == *first)?;
        for title in rest {
            item = item.children.iter().find(|child| child.title == *title)?;
        }
        Some(item)
    }
}

impl fmt::Display for Navigation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for item in &self.items {
            item.write_tree(f, 0)?;
        }
        Ok(())
    }
}
