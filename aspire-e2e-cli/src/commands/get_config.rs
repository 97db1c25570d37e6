//! Command to print one configuration value of a resource.

use crate::error::CliError;
use crate::utils::{open_engine, GlobalOptions};
use aspire_e2e::ConfigKey;
use clap::Args;

/// Print one configuration value of a resource.
///
/// Valid keys: Mode, Name, ContainerImage, ContainerTag, ProjectPath,
/// BuildImage, BuildImageCommand, SkipImageBuild, ImageRegistry
/// (case-insensitive).
#[derive(Args)]
pub struct GetConfigCommand {
    /// Resource id
    #[arg(value_name = "ID")]
    pub id: String,

    /// Configuration key
    #[arg(value_name = "KEY")]
    pub key: String,
}

impl GetConfigCommand {
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let key: ConfigKey = self.key.parse()?;
        let engine = open_engine(global)?;

        let entry = engine
            .get_entry(&self.id)
            .ok_or_else(|| CliError::resource_not_found(&self.id))?;

        match entry.config_value(key) {
            Some(value) => {
                println!("{value}");
                Ok(())
            }
            None => Err(CliError::SemanticFailure(format!(
                "Resource '{}' has no value for {key}",
                self.id
            ))),
        }
    }
}
