//! Update command implementation.
//!
//! Edits one resource in the global layer. Only the fields given on the
//! command line change; an empty value clears an optional field.

use crate::error::CliError;
use crate::utils::{open_global_engine, parse_bool, save_engine, GlobalOptions};
use aspire_e2e::{ResourceEntry, ResourceMode};
use clap::Args;

/// Create or edit a resource in the global configuration.
#[derive(Args)]
pub struct UpdateCommand {
    /// Resource id
    #[arg(value_name = "ID")]
    pub id: String,

    /// Display name
    #[arg(long, value_name = "NAME")]
    pub name: Option<String>,

    /// Run mode (Project or Container)
    #[arg(long, value_name = "MODE")]
    pub mode: Option<String>,

    /// Container image name
    #[arg(long, value_name = "IMAGE")]
    pub container_image: Option<String>,

    /// Container image tag
    #[arg(long, value_name = "TAG")]
    pub container_tag: Option<String>,

    /// Path to the project file
    #[arg(long, value_name = "PATH")]
    pub project_path: Option<String>,

    /// Whether the image is built locally
    #[arg(long, value_name = "BOOL", value_parser = parse_bool)]
    pub build_image: Option<bool>,

    /// Command used to build the image
    #[arg(long, value_name = "COMMAND")]
    pub build_image_command: Option<String>,

    /// Whether the image build step is skipped
    #[arg(long, value_name = "BOOL", value_parser = parse_bool)]
    pub skip_image_build: Option<bool>,

    /// Registry the image is pulled from
    #[arg(long, value_name = "REGISTRY")]
    pub image_registry: Option<String>,

    /// Create the resource if it does not exist
    #[arg(long)]
    pub create: bool,
}

impl UpdateCommand {
    /// Execute the update command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        // Validate before touching any file
        let mode = self
            .mode
            .as_deref()
            .map(str::parse::<ResourceMode>)
            .transpose()?;

        let mut engine = open_global_engine(global)?;

        let (mut entry, created) = match engine.global().get_resource(&self.id) {
            Some(existing) => (existing.clone(), false),
            None if self.create => (ResourceEntry::new(&self.id), true),
            None => {
                return Err(CliError::SemanticFailure(format!(
                    "Resource '{}' not found in {} (use --create to add it)",
                    self.id,
                    engine.global_path().display()
                )))
            }
        };

        if let Some(mode) = mode {
            entry.mode = mode;
        }
        if let Some(build_image) = self.build_image {
            entry.build_image = build_image;
        }
        if let Some(skip) = self.skip_image_build {
            entry.skip_image_build = skip;
        }
        set_optional(&mut entry.name, self.name);
        set_optional(&mut entry.container_image, self.container_image);
        set_optional(&mut entry.container_tag, self.container_tag);
        set_optional(&mut entry.project_path, self.project_path);
        set_optional(&mut entry.build_image_command, self.build_image_command);
        set_optional(&mut entry.image_registry, self.image_registry);

        engine.set_entry(&self.id, entry)?;
        save_engine(&engine, global)?;

        if created {
            global.logger.status(&format!("Added resource '{}'", self.id));
        } else {
            global.logger.status(&format!("Updated resource '{}'", self.id));
        }
        Ok(())
    }
}

/// Apply a command-line value to an optional field. `None` leaves the field
/// alone; an empty string clears it.
fn set_optional(field: &mut Option<String>, value: Option<String>) {
    match value {
        Some(v) if v.is_empty() => *field = None,
        Some(v) => *field = Some(v),
        None => {}
    }
}
