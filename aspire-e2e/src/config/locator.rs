//! Locating the global and local configuration layers.
//!
//! The global layer lives at a fixed path under the home directory, which
//! the `ASPIRE_E2E_CONFIG_PATH` environment variable replaces wholesale. The
//! local layer is found by walking up from a start directory until the file
//! turns up or a repository root is reached.

use std::env;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

/// Environment variable that replaces the entire global layer path.
pub const CONFIG_PATH_ENV: &str = "ASPIRE_E2E_CONFIG_PATH";

/// Directory under the home directory holding the global layer.
pub const DEFAULT_CONFIG_DIR: &str = ".aspire-e2e";

/// File name of the global layer.
pub const GLOBAL_CONFIG_FILE_NAME: &str = "resources.json";

/// File name of the local layer.
pub const LOCAL_CONFIG_FILE_NAME: &str = "e2e-resources.json";

/// Directory marking a repository root; the upward walk stops there.
pub const REPOSITORY_ROOT_MARKER: &str = ".git";

/// Inputs to layer discovery.
///
/// Everything the locator needs is held here explicitly, so tests can point
/// it at arbitrary roots without touching the process environment.
///
/// # Examples
///
/// ```
/// use aspire_e2e::config::LocatorConfig;
///
/// let config = LocatorConfig::new("/tmp/global.json", "/tmp/repo/src");
/// assert_eq!(config.local_file_name, "e2e-resources.json");
/// assert_eq!(config.root_marker, ".git");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocatorConfig {
    /// Full path of the global layer file.
    pub global_path: PathBuf,
    /// Directory the local-layer walk starts from.
    pub start_dir: PathBuf,
    /// File name searched for during the walk.
    pub local_file_name: String,
    /// Directory name that stops the walk.
    pub root_marker: String,
}

impl LocatorConfig {
    /// Creates a configuration with the default file name and root marker.
    #[must_use]
    pub fn new(global_path: impl Into<PathBuf>, start_dir: impl Into<PathBuf>) -> Self {
        Self {
            global_path: global_path.into(),
            start_dir: start_dir.into(),
            local_file_name: LOCAL_CONFIG_FILE_NAME.to_string(),
            root_marker: REPOSITORY_ROOT_MARKER.to_string(),
        }
    }

    /// Builds a configuration from the process environment: the global path
    /// from [`default_global_path`] and the current working directory as the
    /// start of the walk.
    ///
    /// # Errors
    ///
    /// Returns an error if neither `ASPIRE_E2E_CONFIG_PATH` nor the home
    /// directory is available, or the working directory cannot be read.
    pub fn from_env() -> Result<Self> {
        Ok(Self::new(default_global_path()?, env::current_dir()?))
    }

    /// Replaces the global layer path.
    #[must_use]
    pub fn with_global_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.global_path = path.into();
        self
    }

    /// Replaces the start directory of the walk.
    #[must_use]
    pub fn with_start_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.start_dir = dir.into();
        self
    }

    /// Replaces the local layer file name.
    #[must_use]
    pub fn with_local_file_name(mut self, name: impl Into<String>) -> Self {
        self.local_file_name = name.into();
        self
    }

    /// Replaces the repository-root marker.
    #[must_use]
    pub fn with_root_marker(mut self, marker: impl Into<String>) -> Self {
        self.root_marker = marker.into();
        self
    }
}

/// Returns the default global layer path.
///
/// `$ASPIRE_E2E_CONFIG_PATH` if set (the whole path, not a directory),
/// otherwise `~/.aspire-e2e/resources.json`.
///
/// # Errors
///
/// Returns [`Error::HomeDirectoryNotFound`] if the variable is unset and the
/// home directory cannot be determined.
pub fn default_global_path() -> Result<PathBuf> {
    if let Some(path) = env::var_os(CONFIG_PATH_ENV).filter(|v| !v.is_empty()) {
        return Ok(PathBuf::from(path));
    }

    let home = home::home_dir().ok_or(Error::HomeDirectoryNotFound)?;
    Ok(home.join(DEFAULT_CONFIG_DIR).join(GLOBAL_CONFIG_FILE_NAME))
}

/// Finds the global and local layer files.
///
/// # Examples
///
/// ```no_run
/// use aspire_e2e::config::{LayerLocator, LocatorConfig};
///
/// let locator = LayerLocator::new(LocatorConfig::from_env().unwrap());
/// if let Some(local) = locator.find_local_path() {
///     println!("local layer: {}", local.display());
/// }
/// ```
#[derive(Debug, Clone)]
pub struct LayerLocator {
    config: LocatorConfig,
}

impl LayerLocator {
    /// Creates a locator over the given configuration.
    #[must_use]
    pub fn new(config: LocatorConfig) -> Self {
        Self { config }
    }

    /// The configuration this locator was built with.
    #[must_use]
    pub fn config(&self) -> &LocatorConfig {
        &self.config
    }

    /// Path of the global layer (which may not exist yet).
    #[must_use]
    pub fn global_path(&self) -> &Path {
        &self.config.global_path
    }

    /// Walks up from the configured start directory looking for the local
    /// layer file.
    #[must_use]
    pub fn find_local_path(&self) -> Option<PathBuf> {
        self.find_local_path_from(&self.config.start_dir)
    }

    /// Walks up from `start_dir` looking for the local layer file.
    ///
    /// In each directory the file is checked first; only if it is absent
    /// does a root marker in that same directory end the walk. Reaching the
    /// filesystem root also ends it.
    #[must_use]
    pub fn find_local_path_from(&self, start_dir: &Path) -> Option<PathBuf> {
        let mut current = Some(start_dir);

        while let Some(dir) = current {
            let candidate = dir.join(&self.config.local_file_name);
            if candidate.is_file() {
                log::debug!("Found local configuration at {}", candidate.display());
                return Some(candidate);
            }

            if dir.join(&self.config.root_marker).is_dir() {
                log::debug!("Stopped local search at repository root {}", dir.display());
                return None;
            }

            current = dir.parent();
        }

        None
    }
}
