//! Command to print the effective mode of a resource.

use crate::error::CliError;
use crate::utils::{open_engine, GlobalOptions};
use clap::Args;

/// Print the effective mode of a resource.
#[derive(Args)]
pub struct GetModeCommand {
    /// Resource id
    #[arg(value_name = "ID")]
    pub id: String,
}

impl GetModeCommand {
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let engine = open_engine(global)?;

        let entry = engine
            .get_entry(&self.id)
            .ok_or_else(|| CliError::resource_not_found(&self.id))?;

        println!("{}", entry.mode);
        Ok(())
    }
}
