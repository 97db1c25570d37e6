//! Command to show the configuration file locations.

use crate::error::CliError;
use crate::utils::{locator_config, GlobalOptions};
use aspire_e2e::config::LayerLocator;
use clap::Args;

/// Show the configuration file locations.
///
/// Prints the global path on the first line and the discovered local path
/// (or nothing) on the second.
#[derive(Args)]
pub struct ShowPathsCommand {}

impl ShowPathsCommand {
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let locator = LayerLocator::new(locator_config(global)?);

        println!("{}", locator.global_path().display());
        match locator.find_local_path() {
            Some(local) => println!("{}", local.display()),
            None => global.logger.status("No local configuration found"),
        }
        Ok(())
    }
}
