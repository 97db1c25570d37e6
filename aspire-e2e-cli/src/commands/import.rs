//! Import command implementation.
//!
//! Copies the resources of another configuration file into the global
//! layer. Override rules in the imported file are ignored.

use crate::error::CliError;
use crate::utils::{open_global_engine, save_engine, GlobalOptions};
use aspire_e2e::config::FileStore;
use aspire_e2e::ImportPolicy;
use clap::Args;
use std::path::PathBuf;

/// Import resources from another configuration file.
#[derive(Args)]
pub struct ImportCommand {
    /// File to import
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Merge into existing resources instead of replacing them
    #[arg(long, conflicts_with = "skip_existing")]
    pub merge: bool,

    /// Leave existing resources untouched
    #[arg(long)]
    pub skip_existing: bool,
}

impl ImportCommand {
    /// Execute the import command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        if !self.file.is_file() {
            return Err(CliError::SemanticFailure(format!(
                "Import file not found: {}",
                self.file.display()
            )));
        }

        let policy = if self.merge {
            ImportPolicy::Merge
        } else if self.skip_existing {
            ImportPolicy::SkipExisting
        } else {
            ImportPolicy::Replace
        };

        let source = FileStore::load_file(&self.file)?;
        let mut engine = open_global_engine(global)?;

        let report = engine.import(&source, policy);
        if report.changed() > 0 {
            save_engine(&engine, global)?;
        }

        global.logger.status(&format!(
            "Imported {} resource(s): {} added, {} replaced, {} merged, {} skipped",
            report.changed(),
            report.added.len(),
            report.replaced.len(),
            report.merged.len(),
            report.skipped.len(),
        ));
        for id in &report.skipped {
            global.logger.info(&format!("Skipped '{id}'"));
        }
        Ok(())
    }
}
