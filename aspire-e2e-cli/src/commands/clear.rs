//! Command to reset the global configuration to an empty document.

use crate::error::CliError;
use crate::utils::{open_global_engine, save_engine, GlobalOptions};
use clap::Args;

/// Reset the global configuration: every resource and override rule is
/// removed. The local layer is left untouched.
#[derive(Args)]
pub struct ClearCommand {}

impl ClearCommand {
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let mut engine = open_global_engine(global)?;

        let count = engine.global().resources().len();
        engine.clear_resources();
        engine.clear_overrides();
        save_engine(&engine, global)?;

        global
            .logger
            .status(&format!("Global configuration cleared ({count} resource(s) removed)"));
        Ok(())
    }
}
