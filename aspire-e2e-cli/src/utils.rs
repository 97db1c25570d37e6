//! Utility functions for CLI operations.
//!
//! This module provides common utility functions used across CLI commands,
//! including locator configuration and engine access.

use crate::error::CliError;
use aspire_e2e::config::default_global_path;
use aspire_e2e::{LocatorConfig, Logger, ResolutionEngine};
use std::env;
use std::path::PathBuf;

/// Global CLI options shared across all commands.
///
/// `--verbose` and `--quiet` are folded into `logger`.
#[derive(Debug, Clone)]
pub struct GlobalOptions {
    /// Override the global configuration file path.
    pub config_path: Option<PathBuf>,

    /// Start directory for the local configuration search.
    pub working_dir: Option<PathBuf>,

    /// Logger for user-facing status lines on stderr.
    pub logger: Logger,
}

/// Build the locator configuration from global options.
///
/// `--config-path` (or `ASPIRE_E2E_CONFIG_PATH`) wins over the default path
/// under the home directory; `--working-dir` wins over the current directory.
pub fn locator_config(global: &GlobalOptions) -> Result<LocatorConfig, CliError> {
    let global_path = match &global.config_path {
        Some(path) => path.clone(),
        None => default_global_path()?,
    };

    let start_dir = match &global.working_dir {
        Some(dir) => dir.clone(),
        None => env::current_dir()?,
    };

    Ok(LocatorConfig::new(global_path, start_dir))
}

/// Open the resolution engine over both layers, for commands that read.
pub fn open_engine(global: &GlobalOptions) -> Result<ResolutionEngine, CliError> {
    let config = locator_config(global)?;
    ResolutionEngine::open(config).map_err(CliError::from)
}

/// Open the global layer alone, for commands that edit it.
pub fn open_global_engine(global: &GlobalOptions) -> Result<ResolutionEngine, CliError> {
    let config = locator_config(global)?;
    ResolutionEngine::open_global(config).map_err(CliError::from)
}

/// Save the global layer and report where it went.
pub fn save_engine(engine: &ResolutionEngine, global: &GlobalOptions) -> Result<(), CliError> {
    engine.save()?;
    global.logger.info(&format!(
        "Saved configuration to {}",
        engine.global_path().display()
    ));
    Ok(())
}

/// Parse a `true`/`false` flag value, case-insensitively.
pub fn parse_bool(value: &str) -> Result<bool, String> {
    match value.to_ascii_lowercase().as_str() {
        "true" => Ok(true),
        "false" => Ok(false),
        other => Err(format!("expected 'true' or 'false', got '{other}'")),
    }
}
