//! Whole-site checks.
//!
//! Combines navigation resolution with the checks that need the docs
//! directory: pages missing from `nav` and local extra assets that do not
//! exist.

use docsite_config::{Config, is_external};

use crate::builder::NavBuilder;
use crate::error::NavError;
use crate::navigation::Navigation;
use crate::source::PageSource;

/// Result of checking a site.
#[derive(Debug)]
pub struct CheckReport {
    /// Resolved navigation (entries with errors left out).
    pub navigation: Navigation,
    /// Reference errors. Always fatal.
    pub errors: Vec<NavError>,
    /// Warnings from loading and checking. Fatal in strict mode.
    pub warnings: Vec<String>,
    /// Pages under `docs_dir` that `nav` does not reference.
    pub orphans: Vec<String>,
}

impl CheckReport {
    /// Whether the build may proceed.
    #[must_use]
    pub fn is_ok(&self, strict: bool) -> bool {
        self.errors.is_empty() && (!strict || self.warnings.is_empty())
    }
}

/// Check a loaded configuration against its docs directory.
///
/// # Errors
///
/// Returns [`NavError::Source`] if the docs directory cannot be listed.
pub fn check(config: &Config, source: &dyn PageSource) -> Result<CheckReport, NavError> {
    let resolution = NavBuilder::new(config, source).resolve()?;

    let mut warnings = config.warnings.clone();
    warnings.extend(resolution.warnings);

    let orphans: Vec<String> = if config.nav.is_some() {
        source
            .list_pages()?
            .into_iter()
            .filter(|page| !resolution.referenced.contains(page))
            .collect()
    } else {
        Vec::new()
    };
    if !orphans.is_empty() {
        tracing::info!(
            pages = ?orphans,
            "Pages exist in the docs directory but are not included in the nav"
        );
    }

    let scripts = config
        .extra_javascript
        .iter()
        .map(|script| ("extra_javascript", script.path.as_str()));
    let styles = config
        .extra_css
        .iter()
        .map(|css| ("extra_css", css.as_str()));
    for (field, path) in scripts.chain(styles) {
        if is_external(path) {
            continue;
        }
        let local = path.trim_start_matches("./");
        if !source.exists(local) {
            warnings.push(format!("{field} file `{path}` not found in docs_dir"));
        }
    }

    for error in &resolution.errors {
        tracing::warn!("{error}");
    }

    Ok(CheckReport {
        navigation: resolution.navigation,
        errors: resolution.errors,
        warnings,
        orphans,
    })
}
