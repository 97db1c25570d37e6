//! CLI structure and command definitions.
//!
//! This module defines the main CLI structure using clap's derive macros,
//! including global options and subcommands.

use crate::commands::{
    ClearCommand, CompletionsCommand, GetConfigCommand, GetModeCommand, GetProjectPathCommand,
    ImportCommand, ListCommand, OverrideCommand, RemoveCommand, ShowPathsCommand,
    ToggleModeCommand, UpdateCommand,
};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Command-line tool for managing e2e test resource configuration.
#[derive(Parser)]
#[command(name = "aspire-e2e")]
#[command(
    version,
    about = "Manage shared e2e resource configuration",
    long_about = None
)]
pub struct Cli {
    /// Enable verbose output
    #[arg(long, global = true)]
    pub verbose: bool,

    /// Suppress non-essential output
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Override the global configuration file path
    #[arg(long, value_name = "PATH", global = true, env = "ASPIRE_E2E_CONFIG_PATH")]
    pub config_path: Option<PathBuf>,

    /// Directory to start the local configuration search from
    #[arg(long, value_name = "DIR", global = true)]
    pub working_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

/// Available CLI commands.
#[derive(Subcommand)]
pub enum Command {
    /// List resources
    List(ListCommand),

    /// Print the effective mode of a resource
    GetMode(GetModeCommand),

    /// Print the project path of a resource
    GetProjectPath(GetProjectPathCommand),

    /// Print one configuration value of a resource
    GetConfig(GetConfigCommand),

    /// Create or edit a resource in the global configuration
    Update(UpdateCommand),

    /// Remove a resource from the global configuration
    Remove(RemoveCommand),

    /// Switch a resource between Project and Container mode
    ToggleMode(ToggleModeCommand),

    /// Import resources from another configuration file
    Import(ImportCommand),

    /// Reset the global configuration to an empty document
    Clear(ClearCommand),

    /// Manage override rules
    #[command(name = "override")]
    Override(OverrideCommand),

    /// Show the configuration file locations
    ShowPaths(ShowPathsCommand),

    /// Generate shell completion scripts
    Completions(CompletionsCommand),
}
