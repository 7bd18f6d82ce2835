//! `docsite nav` command implementation.

use clap::Args;
use docsite_nav::{FsSource, NavBuilder};

use super::SiteArgs;
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the nav command.
#[derive(Args)]
pub(crate) struct NavArgs {
    #[command(flatten)]
    site: SiteArgs,

    /// Print as JSON instead of an indented tree.
    #[arg(long)]
    json: bool,
}

impl NavArgs {
    /// Execute the nav command.
    ///
    /// # Errors
    ///
    /// Returns an error if loading fails or a nav entry cannot be resolved.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();

        let config = self.site.load(None)?;
        let source = FsSource::new(config.paths.docs_dir.clone());
        let navigation = NavBuilder::new(&config, &source).build()?;

        if self.json {
            let mut json = serde_json::to_string_pretty(&navigation)?;
            json.push('\n');
            output.data(&json);
        } else {
            output.data(&navigation.to_string());
        }
        Ok(())
    }
}
