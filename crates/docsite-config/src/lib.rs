//! Configuration management for docsite.
//!
//! Parses `mkdocs.yml` documentation-site configuration with serde and
//! provides auto-discovery of the config file in parent directories.
//!
//! The document maps the keys `site_name`, `site_url`, `nav`, `theme`,
//! `markdown_extensions`, `extra_javascript`, `extra_css` and `plugins`
//! (plus the usual site metadata keys) to an immutable [`Config`]. Loading
//! runs in fixed order:
//!
//! 1. YAML parse (duplicate keys are rejected)
//! 2. `!ENV` tag resolution (see below)
//! 3. Typed deserialization
//! 4. Path resolution relative to the config file
//! 5. [`CliSettings`] overrides
//! 6. Validation against a [`Registry`] of known identifiers
//!
//! ## Environment Variable Tags
//!
//! - `!ENV NAME` - value of `NAME`, errors if unset
//! - `!ENV [NAME, OTHER, fallback]` - first variable set, else `fallback`

mod assets;
mod env;
mod named;
mod nav;
mod registry;
mod theme;

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use serde_yaml::{Mapping, Value};

pub use assets::ExtraScript;
pub use named::NamedEntry;
pub use nav::{NavEntry, is_external};
pub use registry::{IdentifierKind, Registry};
pub use theme::{ColorScheme, FontConfig, PaletteEntry, PaletteToggle, ThemeConfig};

/// Configuration filenames to search for, in order of preference.
pub const CONFIG_FILENAMES: [&str; 2] = ["mkdocs.yml", "mkdocs.yaml"];

/// Top-level keys the site generator understands.
///
/// Keys outside this list produce a warning rather than an error.
const KNOWN_KEYS: &[&str] = &[
    "site_name",
    "site_url",
    "site_description",
    "site_author",
    "copyright",
    "repo_url",
    "repo_name",
    "edit_uri",
    "edit_uri_template",
    "docs_dir",
    "site_dir",
    "use_directory_urls",
    "strict",
    "dev_addr",
    "nav",
    "theme",
    "markdown_extensions",
    "extra_javascript",
    "extra_css",
    "extra_templates",
    "plugins",
    "extra",
    "hooks",
    "watch",
    "validation",
    "exclude_docs",
    "not_in_nav",
    "draft_docs",
    "remote_branch",
    "remote_name",
];

const HIGHLIGHT_EXTENSION: &str = "pymdownx.highlight";
const LINENUMS_STYLES: [&str; 3] = ["table", "pymdownx-inline", "inline"];

/// CLI settings that override configuration file values.
///
/// All fields are optional. Only non-None values override the loaded config;
/// the `allow_*` lists extend the built-in [`Registry`].
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Override docs source directory.
    pub docs_dir: Option<PathBuf>,
    /// Override output directory.
    pub site_dir: Option<PathBuf>,
    /// Override canonical site URL.
    pub site_url: Option<String>,
    /// Override strict mode.
    pub strict: Option<bool>,
    /// Additional markdown extensions to accept.
    pub allow_extensions: Vec<String>,
    /// Additional plugins to accept.
    pub allow_plugins: Vec<String>,
    /// Additional themes to accept.
    pub allow_themes: Vec<String>,
}

impl CliSettings {
    /// Built-in registry extended with the allowed identifiers.
    #[must_use]
    pub fn registry(&self) -> Registry {
        let registry = self
            .allow_extensions
            .iter()
            .fold(Registry::builtin(), |r, name| r.with_extension(name.as_str()));
        let registry = self
            .allow_plugins
            .iter()
            .fold(registry, |r, name| r.with_plugin(name.as_str()));
        self.allow_themes
            .iter()
            .fold(registry, |r, name| r.with_theme(name.as_str()))
    }
}

/// Resolved filesystem locations.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ResolvedPaths {
    /// Directory containing the config file.
    pub config_dir: PathBuf,
    /// Markdown source directory.
    pub docs_dir: PathBuf,
    /// Output directory for the built site.
    pub site_dir: PathBuf,
}

/// Site configuration document.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Site title.
    pub site_name: String,
    /// Canonical URL of the published site.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub site_url: Option<String>,
    /// Site description for page metadata.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub site_description: Option<String>,
    /// Site author for page metadata.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub site_author: Option<String>,
    /// Footer copyright notice.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub copyright: Option<String>,
    /// Source repository URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub repo_url: Option<String>,
    /// Source repository display name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub repo_name: Option<String>,
    /// Path from `repo_url` to the docs directory for edit links.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub edit_uri: Option<String>,
    /// Docs directory as written (relative to the config file).
    #[serde(rename = "docs_dir", default = "default_docs_dir")]
    docs_dir_raw: String,
    /// Site directory as written (relative to the config file).
    #[serde(rename = "site_dir", default = "default_site_dir")]
    site_dir_raw: String,
    /// Emit `page/` URLs instead of `page.html`.
    #[serde(default = "default_true")]
    pub use_directory_urls: bool,
    /// Treat warnings as errors.
    #[serde(default)]
    pub strict: bool,
    /// Development server address (`host:port`).
    #[serde(default = "default_dev_addr")]
    pub dev_addr: String,
    /// Declared navigation. `None` means navigation is generated from the
    /// docs directory.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nav: Option<Vec<NavEntry>>,
    /// Theme configuration.
    #[serde(default)]
    pub theme: ThemeConfig,
    /// Markdown extensions in declared order.
    #[serde(default, deserialize_with = "named::deserialize_list")]
    pub markdown_extensions: Vec<NamedEntry>,
    /// Extra scripts in load order.
    #[serde(default)]
    pub extra_javascript: Vec<ExtraScript>,
    /// Extra stylesheets in load order.
    #[serde(default)]
    pub extra_css: Vec<String>,
    /// Build plugins.
    #[serde(default = "default_plugins", deserialize_with = "named::deserialize_list")]
    pub plugins: Vec<NamedEntry>,
    /// Free-form data passed to templates.
    #[serde(default, skip_serializing_if = "Mapping::is_empty")]
    pub extra: Mapping,

    /// Resolved paths (set after loading).
    #[serde(skip)]
    pub paths: ResolvedPaths,
    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
    /// Non-fatal findings collected while loading.
    #[serde(skip)]
    pub warnings: Vec<String>,
}

fn default_docs_dir() -> String {
    "docs".to_owned()
}

fn default_site_dir() -> String {
    "site".to_owned()
}

fn default_true() -> bool {
    true
}

fn default_dev_addr() -> String {
    "127.0.0.1:8000".to_owned()
}

fn default_plugins() -> Vec<NamedEntry> {
    vec![NamedEntry::new("search")]
}

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File not found.
    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// YAML parsing error (malformed document, duplicate keys, wrong shapes).
    #[error("YAML parse error: {0}")]
    Parse(#[from] serde_yaml::Error),
    /// Validation error.
    #[error("Configuration error: {0}")]
    Validation(String),
    /// Unrecognized theme, extension or plugin.
    #[error("Unknown {kind}: {name}")]
    UnknownIdentifier {
        /// What kind of identifier was checked.
        kind: IdentifierKind,
        /// Identifier as written.
        name: String,
    },
    /// Environment variable error during `!ENV` resolution.
    #[error("Environment variable error in {field}: {message}")]
    EnvVar {
        /// Config field path (e.g., "`site_url`").
        field: String,
        /// Error message (e.g., "${`SITE_URL`} not set").
        message: String,
    },
}

/// Require a string field to be non-empty.
fn require_non_empty(value: &str, field: &str) -> Result<(), ConfigError> {
    if value.trim().is_empty() {
        return Err(ConfigError::Validation(format!("{field} cannot be empty")));
    }
    Ok(())
}

/// Require a URL field to use http:// or https:// scheme.
fn require_http_url(url: &str, field: &str) -> Result<(), ConfigError> {
    if !url.starts_with("http://") && !url.starts_with("https://") {
        return Err(ConfigError::Validation(format!(
            "{field} must start with http:// or https://"
        )));
    }
    Ok(())
}

impl Config {
    /// Load configuration from file with optional CLI settings.
    ///
    /// If `config_path` is provided, loads from that file. Otherwise, searches
    /// for `mkdocs.yml` / `mkdocs.yaml` in the current directory and parents.
    ///
    /// # Errors
    ///
    /// Returns error if no config file is found, parsing fails, or the
    /// document does not validate.
    pub fn load(
        config_path: Option<&Path>,
        cli_settings: Option<&CliSettings>,
    ) -> Result<Self, ConfigError> {
        let path = if let Some(path) = config_path {
            if !path.exists() {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            path.to_path_buf()
        } else {
            let cwd = std::env::current_dir()?;
            Self::discover_config(&cwd)
                .ok_or_else(|| ConfigError::NotFound(cwd.join(CONFIG_FILENAMES[0])))?
        };

        Self::load_from_file(&path, cli_settings)
    }

    /// Parse a document whose relative paths resolve against `base_dir`.
    ///
    /// Validates with the built-in [`Registry`].
    ///
    /// # Errors
    ///
    /// Returns error if parsing or validation fails.
    pub fn from_str_with_base(content: &str, base_dir: &Path) -> Result<Self, ConfigError> {
        Self::parse(content, base_dir, None)
    }

    /// Search for a config file in `start` and its parents.
    #[must_use]
    pub fn discover_config(start: &Path) -> Option<PathBuf> {
        let mut current = start.to_path_buf();
        loop {
            for name in CONFIG_FILENAMES {
                let candidate = current.join(name);
                if candidate.is_file() {
                    return Some(candidate);
                }
            }
            if !current.pop() {
                return None;
            }
        }
    }

    /// Load configuration from a specific file.
    fn load_from_file(path: &Path, cli_settings: Option<&CliSettings>) -> Result<Self, ConfigError> {
        tracing::debug!(path = %path.display(), "Loading site configuration");
        let content = std::fs::read_to_string(path)?;

        let config_dir = match path.parent() {
            Some(dir) if !dir.as_os_str().is_empty() => dir,
            _ => Path::new("."),
        };
        let mut config = Self::parse(&content, config_dir, cli_settings)?;
        config.config_path = Some(path.to_path_buf());

        Ok(config)
    }

    fn parse(
        content: &str,
        config_dir: &Path,
        cli_settings: Option<&CliSettings>,
    ) -> Result<Self, ConfigError> {
        if content.trim().is_empty() {
            return Err(ConfigError::Validation(
                "configuration document is empty".to_owned(),
            ));
        }
        let mut value: Value = serde_yaml::from_str(content)?;
        if !value.is_mapping() {
            return Err(ConfigError::Validation(
                "configuration document must be a mapping".to_owned(),
            ));
        }

        env::resolve_env_tags(&mut value)?;
        let unknown = unknown_keys(&value);

        let mut config: Self = serde_yaml::from_value(value)?;
        config.warnings.extend(
            unknown
                .into_iter()
                .map(|key| format!("unrecognized configuration key `{key}`")),
        );

        config.resolve_paths(config_dir);

        let registry = match cli_settings {
            Some(settings) => {
                config.apply_cli_settings(settings);
                settings.registry()
            }
            None => Registry::builtin(),
        };

        let warnings = config.validate(&registry)?;
        config.warnings.extend(warnings);
        for warning in &config.warnings {
            tracing::warn!("{warning}");
        }

        Ok(config)
    }

    /// Apply CLI settings to the configuration.
    fn apply_cli_settings(&mut self, settings: &CliSettings) {
        if let Some(docs_dir) = &settings.docs_dir {
            self.paths.docs_dir.clone_from(docs_dir);
        }
        if let Some(site_dir) = &settings.site_dir {
            self.paths.site_dir.clone_from(site_dir);
        }
        if let Some(site_url) = &settings.site_url {
            self.site_url = Some(site_url.clone());
        }
        if let Some(strict) = settings.strict {
            self.strict = strict;
        }
    }

    /// Resolve relative paths against the config directory.
    fn resolve_paths(&mut self, config_dir: &Path) {
        self.paths = ResolvedPaths {
            config_dir: config_dir.to_path_buf(),
            docs_dir: config_dir.join(&self.docs_dir_raw),
            site_dir: config_dir.join(&self.site_dir_raw),
        };
    }

    /// Validate configuration values.
    ///
    /// Called automatically after loading. Returns warnings for findings
    /// that do not invalidate the document.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Validation`] for invalid values and
    /// [`ConfigError::UnknownIdentifier`] for unrecognized names.
    pub fn validate(&self, registry: &Registry) -> Result<Vec<String>, ConfigError> {
        let mut warnings = Vec::new();

        self.validate_site()?;
        self.validate_paths()?;

        registry.require(IdentifierKind::Theme, &self.theme.name)?;
        warnings.extend(self.theme.palette_warnings());

        validate_named(
            &self.markdown_extensions,
            IdentifierKind::MarkdownExtension,
            "markdown_extensions",
            registry,
        )?;
        for extension in &self.markdown_extensions {
            if extension.name == HIGHLIGHT_EXTENSION {
                validate_highlight(extension)?;
            }
        }
        validate_named(&self.plugins, IdentifierKind::Plugin, "plugins", registry)?;

        self.validate_assets()?;

        Ok(warnings)
    }

    fn validate_site(&self) -> Result<(), ConfigError> {
        require_non_empty(&self.site_name, "site_name")?;
        if let Some(ref site_url) = self.site_url {
            require_http_url(site_url, "site_url")?;
        }
        if let Some(ref repo_url) = self.repo_url {
            require_http_url(repo_url, "repo_url")?;
        }

        let port = self
            .dev_addr
            .rsplit_once(':')
            .filter(|(host, _)| !host.is_empty())
            .and_then(|(_, port)| port.parse::<u16>().ok());
        match port {
            Some(0) => Err(ConfigError::Validation(
                "dev_addr port cannot be 0".to_owned(),
            )),
            Some(_) => Ok(()),
            None => Err(ConfigError::Validation(format!(
                "dev_addr must be host:port, got `{}`",
                self.dev_addr
            ))),
        }
    }

    fn validate_paths(&self) -> Result<(), ConfigError> {
        let ResolvedPaths {
            config_dir,
            docs_dir,
            site_dir,
        } = &self.paths;

        if docs_dir == config_dir {
            return Err(ConfigError::Validation(
                "docs_dir cannot be the directory containing the config file".to_owned(),
            ));
        }
        if site_dir.starts_with(docs_dir) {
            return Err(ConfigError::Validation(format!(
                "site_dir ({}) cannot be inside docs_dir ({})",
                site_dir.display(),
                docs_dir.display()
            )));
        }
        if docs_dir.starts_with(site_dir) {
            return Err(ConfigError::Validation(format!(
                "docs_dir ({}) cannot be inside site_dir ({})",
                docs_dir.display(),
                site_dir.display()
            )));
        }
        Ok(())
    }

    fn validate_assets(&self) -> Result<(), ConfigError> {
        for script in &self.extra_javascript {
            require_non_empty(&script.path, "extra_javascript path")?;
        }
        for css in &self.extra_css {
            require_non_empty(css, "extra_css path")?;
        }
        Ok(())
    }
}

/// Check identifiers against the registry and reject repeats.
fn validate_named(
    entries: &[NamedEntry],
    kind: IdentifierKind,
    field: &str,
    registry: &Registry,
) -> Result<(), ConfigError> {
    let mut seen = HashSet::new();
    for entry in entries {
        registry.require(kind, &entry.name)?;
        if !seen.insert(entry.name.as_str()) {
            return Err(ConfigError::Validation(format!(
                "{field}: `{}` is listed more than once",
                entry.name
            )));
        }
    }
    Ok(())
}

fn validate_highlight(entry: &NamedEntry) -> Result<(), ConfigError> {
    if let Some(linenums) = entry.option("linenums")
        && !linenums.is_bool()
    {
        return Err(ConfigError::Validation(format!(
            "{HIGHLIGHT_EXTENSION}.linenums must be true or false"
        )));
    }
    if let Some(style) = entry.option("linenums_style")
        && !style.as_str().is_some_and(|s| LINENUMS_STYLES.contains(&s))
    {
        return Err(ConfigError::Validation(format!(
            "{HIGHLIGHT_EXTENSION}.linenums_style must be one of {}",
            LINENUMS_STYLES.join(", ")
        )));
    }
    Ok(())
}

fn unknown_keys(value: &Value) -> Vec<String> {
    let Some(mapping) = value.as_mapping() else {
        return Vec::new();
    };
    mapping
        .keys()
        .filter_map(Value::as_str)
        .filter(|key| !KNOWN_KEYS.contains(key))
        .map(str::to_owned)
        .collect()
}
