//! `docsite check` command implementation.

use clap::Args;
use docsite_nav::{FsSource, check};

use super::SiteArgs;
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the check command.
#[derive(Args)]
pub(crate) struct CheckArgs {
    #[command(flatten)]
    site: SiteArgs,

    /// Treat warnings as errors (overrides config).
    #[arg(long)]
    strict: bool,
}

impl CheckArgs {
    /// Execute the check command.
    ///
    /// # Errors
    ///
    /// Returns an error if loading fails, any reference error is found, or
    /// warnings are present in strict mode.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();

        let config = self.site.load(self.strict.then_some(true))?;
        if let Some(path) = &config.config_path {
            output.info(&format!("Config: {}", path.display()));
        }
        output.info(&format!("Docs: {}", config.paths.docs_dir.display()));

        let source = FsSource::new(config.paths.docs_dir.clone());
        let report = check(&config, &source)?;

        for warning in &report.warnings {
            output.warning(&format!("warning: {warning}"));
        }
        if !report.orphans.is_empty() {
            output.note("Pages not included in nav:");
            for orphan in &report.orphans {
                output.note(&format!("  - {orphan}"));
            }
        }
        for error in &report.errors {
            output.error(&format!("error: {error}"));
        }

        if report.is_ok(config.strict) {
            output.success(&format!(
                "{}: {} pages in navigation",
                config.site_name,
                report.navigation.pages().len()
            ));
            return Ok(());
        }

        let mut summary = format!(
            "{} error(s), {} warning(s)",
            report.errors.len(),
            report.warnings.len()
        );
        if config.strict && report.errors.is_empty() {
            summary.push_str(" (strict mode)");
        }
        Err(CliError::Validation(summary))
    }
}
