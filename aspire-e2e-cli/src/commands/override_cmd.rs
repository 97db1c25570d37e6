//! Override command implementation.
//!
//! Override rules are edited in the global layer and applied every time
//! resources are read. Setting them never changes a stored resource.
//! `override list` shows what reads apply: global rules with any local
//! rules merged on top.

use crate::error::CliError;
use crate::utils::{open_engine, open_global_engine, save_engine, GlobalOptions};
use aspire_e2e::config::{OverrideKey, OverrideRules, RewriteTable};
use clap::{Args, Subcommand};
use std::io::Write;

/// Manage override rules.
#[derive(Args)]
pub struct OverrideCommand {
    #[command(subcommand)]
    pub action: OverrideAction,
}

/// Override subcommands.
#[derive(Subcommand)]
pub enum OverrideAction {
    /// Pin a field for every resource (keys: Mode, BuildImage)
    Set {
        /// Override key
        #[arg(value_name = "KEY")]
        key: String,
        /// Value to pin
        #[arg(value_name = "VALUE")]
        value: String,
    },

    /// Remove a field pin
    Remove {
        /// Override key
        #[arg(value_name = "KEY")]
        key: String,
    },

    /// Rewrite one image registry to another
    SetRegistry {
        /// Registry to match exactly
        #[arg(value_name = "FROM")]
        from: String,
        /// Replacement registry
        #[arg(value_name = "TO")]
        to: String,
    },

    /// Remove a registry rewrite
    RemoveRegistry {
        /// Registry the rule matches
        #[arg(value_name = "FROM")]
        from: String,
    },

    /// Rewrite one image[:tag] to another
    SetImage {
        /// Image (with optional tag) to match exactly
        #[arg(value_name = "FROM")]
        from: String,
        /// Replacement image (with optional tag)
        #[arg(value_name = "TO")]
        to: String,
    },

    /// Remove an image rewrite
    RemoveImage {
        /// Image the rule matches
        #[arg(value_name = "FROM")]
        from: String,
    },

    /// Show the override rules in effect (global merged with local)
    List {
        /// Print the rules as JSON
        #[arg(long)]
        json: bool,
    },

    /// Remove all override rules from the global configuration
    Clear,
}

impl OverrideCommand {
    /// Execute the override command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        if let OverrideAction::List { json } = self.action {
            return list_rules(json, global);
        }

        let mut engine = open_global_engine(global)?;

        let message = match self.action {
            OverrideAction::List { .. } => unreachable!(),
            OverrideAction::Set { key, value } => {
                let key: OverrideKey = key.parse()?;
                engine.set_override_field(key, &value)?;
                format!("Override {key} set to {value}")
            }
            OverrideAction::Remove { key } => {
                let key: OverrideKey = key.parse()?;
                if !engine.remove_override_field(key) {
                    return Err(CliError::SemanticFailure(format!(
                        "Override {key} is not set"
                    )));
                }
                format!("Override {key} removed")
            }
            OverrideAction::SetRegistry { from, to } => {
                engine.add_rewrite(RewriteTable::Registry, &from, &to);
                format!("Registry rewrite added: {from} -> {to}")
            }
            OverrideAction::RemoveRegistry { from } => {
                remove_rewrite(&mut engine, RewriteTable::Registry, &from)?
            }
            OverrideAction::SetImage { from, to } => {
                engine.add_rewrite(RewriteTable::Image, &from, &to);
                format!("Image rewrite added: {from} -> {to}")
            }
            OverrideAction::RemoveImage { from } => {
                remove_rewrite(&mut engine, RewriteTable::Image, &from)?
            }
            OverrideAction::Clear => {
                engine.clear_overrides();
                "Overrides cleared".to_string()
            }
        };

        save_engine(&engine, global)?;
        global.logger.status(&message);
        Ok(())
    }
}

fn remove_rewrite(
    engine: &mut aspire_e2e::ResolutionEngine,
    table: RewriteTable,
    from: &str,
) -> Result<String, CliError> {
    if engine.remove_rewrite(table, from) {
        Ok(format!("{table} removed: {from}"))
    } else {
        Err(CliError::SemanticFailure(format!(
            "No {table} for '{from}'"
        )))
    }
}

fn list_rules(json: bool, global: &GlobalOptions) -> Result<(), CliError> {
    let engine = open_engine(global)?;
    let merged = engine.merged();

    if merged.overrides().is_some() {
        global.logger.status(&source_label(
            &engine.global_path().display().to_string(),
            engine.local_path().map(|p| p.display().to_string()).as_deref(),
        ));
    }
    print_rules(merged.overrides(), json, global)
}

/// Names the files a listed rule set was read from.
fn source_label(global_path: &str, local_path: Option<&str>) -> String {
    match local_path {
        Some(local) => format!("Override rules from {global_path} merged with {local}:"),
        None => format!("Override rules from {global_path}:"),
    }
}

fn print_rules(
    rules: Option<&OverrideRules>,
    json: bool,
    global: &GlobalOptions,
) -> Result<(), CliError> {
    let stdout = std::io::stdout();
    let mut handle = stdout.lock();

    if json {
        let empty = OverrideRules::default();
        serde_json::to_writer_pretty(&mut handle, rules.unwrap_or(&empty))
            .map_err(|e| CliError::Io(std::io::Error::new(std::io::ErrorKind::Other, e)))?;
        writeln!(handle)?;
        return Ok(());
    }

    let Some(rules) = rules else {
        global.logger.status("No overrides configured.");
        return Ok(());
    };

    for line in describe_rules(rules) {
        writeln!(handle, "{line}")?;
    }
    Ok(())
}

/// Human-readable lines for a rule set, one rule per line.
fn describe_rules(rules: &OverrideRules) -> Vec<String> {
    let mut lines = Vec::new();

    if let Some(mode) = rules.mode {
        lines.push(format!("Mode: {mode}"));
    }
    if let Some(build_image) = rules.build_image {
        lines.push(format!("BuildImage: {build_image}"));
    }
    for (label, table) in [
        ("ImageRegistryRewrites", RewriteTable::Registry),
        ("ImageRewrites", RewriteTable::Image),
    ] {
        if let Some(map) = rules.rewrites(table).filter(|m| !m.is_empty()) {
            lines.push(format!("{label}:"));
            lines.extend(map.iter().map(|(from, to)| format!("  {from} -> {to}")));
        }
    }

    lines
}
