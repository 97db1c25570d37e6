//! Command to switch a resource between Project and Container mode.

use crate::error::CliError;
use crate::utils::{open_global_engine, save_engine, GlobalOptions};
use clap::Args;

/// Switch a resource between Project and Container mode.
///
/// Flips the stored mode in the global configuration and prints the new
/// one. A `Mode` override still takes precedence when reading.
#[derive(Args)]
pub struct ToggleModeCommand {
    /// Resource id
    #[arg(value_name = "ID")]
    pub id: String,
}

impl ToggleModeCommand {
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let mut engine = open_global_engine(global)?;

        let mode = engine.toggle_mode(&self.id)?;
        save_engine(&engine, global)?;

        if let Some(pinned) = engine.global().overrides().and_then(|o| o.mode) {
            if pinned != mode {
                global
                    .logger
                    .warn(&format!("Mode override pins every resource to {pinned}"));
            }
        }

        println!("{mode}");
        Ok(())
    }
}
