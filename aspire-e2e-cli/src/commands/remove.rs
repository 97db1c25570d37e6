//! Command to remove a resource from the global configuration.

use crate::error::CliError;
use crate::utils::{open_global_engine, save_engine, GlobalOptions};
use clap::Args;

/// Remove a resource from the global configuration.
#[derive(Args)]
pub struct RemoveCommand {
    /// Resource id
    #[arg(value_name = "ID")]
    pub id: String,
}

impl RemoveCommand {
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let mut engine = open_global_engine(global)?;

        if !engine.remove_entry(&self.id) {
            return Err(CliError::resource_not_found(&self.id));
        }

        save_engine(&engine, global)?;
        global
            .logger
            .status(&format!("Removed resource '{}'", self.id));
        Ok(())
    }
}
