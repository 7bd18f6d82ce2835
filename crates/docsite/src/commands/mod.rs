//! CLI command implementations.

pub(crate) mod check;
pub(crate) mod config;
pub(crate) mod nav;

use std::path::PathBuf;

use clap::Args;
use docsite_config::{CliSettings, Config};

use crate::error::CliError;

pub(crate) use check::CheckArgs;
pub(crate) use config::ConfigArgs;
pub(crate) use nav::NavArgs;

/// Arguments shared by all commands that load a site.
#[derive(Args)]
pub(crate) struct SiteArgs {
    /// Path to configuration file (default: auto-discover mkdocs.yml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Markdown source directory (overrides config).
    #[arg(short, long)]
    docs_dir: Option<PathBuf>,

    /// Accept an additional markdown extension (repeatable).
    #[arg(long = "allow-extension", value_name = "NAME")]
    allow_extensions: Vec<String>,

    /// Accept an additional plugin (repeatable).
    #[arg(long = "allow-plugin", value_name = "NAME")]
    allow_plugins: Vec<String>,

    /// Accept an additional theme (repeatable).
    #[arg(long = "allow-theme", value_name = "NAME")]
    allow_themes: Vec<String>,
}

impl SiteArgs {
    /// Load the configuration with CLI overrides applied.
    pub(crate) fn load(self, strict: Option<bool>) -> Result<Config, CliError> {
        let cli_settings = CliSettings {
            docs_dir: self.docs_dir,
            strict,
            allow_extensions: self.allow_extensions,
            allow_plugins: self.allow_plugins,
            allow_themes: self.allow_themes,
            ..CliSettings::default()
        };
        let config = Config::load(self.config.as_deref(), Some(&cli_settings))?;
        tracing::debug!(
            config_path = ?config.config_path,
            docs_dir = %config.paths.docs_dir.display(),
            strict = config.strict,
            "Loaded configuration"
        );
        Ok(config)
    }
}
