//! Command to print the project path of a resource.

use crate::error::CliError;
use crate::utils::{open_engine, GlobalOptions};
use clap::Args;

/// Print the project path of a resource.
#[derive(Args)]
pub struct GetProjectPathCommand {
    /// Resource id
    #[arg(value_name = "ID")]
    pub id: String,
}

impl GetProjectPathCommand {
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let engine = open_engine(global)?;

        let entry = engine
            .get_entry(&self.id)
            .ok_or_else(|| CliError::resource_not_found(&self.id))?;

        // A blank path is as good as none
        match entry.project_path.as_deref().filter(|p| !p.trim().is_empty()) {
            Some(path) => {
                println!("{path}");
                Ok(())
            }
            None => Err(CliError::SemanticFailure(format!(
                "Resource '{}' has no project path",
                self.id
            ))),
        }
    }
}
