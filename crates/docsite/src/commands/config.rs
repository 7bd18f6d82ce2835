//! `docsite config` command implementation.

use clap::Args;

use super::SiteArgs;
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the config command.
#[derive(Args)]
pub(crate) struct ConfigArgs {
    #[command(flatten)]
    site: SiteArgs,
}

impl ConfigArgs {
    /// Execute the config command.
    ///
    /// # Errors
    ///
    /// Returns an error if loading fails.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();

        let config = self.site.load(None)?;
        for warning in &config.warnings {
            output.warning(&format!("warning: {warning}"));
        }

        let mut json = serde_json::to_string_pretty(&config)?;
        json.push('\n');
        output.data(&json);
        Ok(())
    }
}
