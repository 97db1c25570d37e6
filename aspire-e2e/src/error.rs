//! Error types for the aspire-e2e library.
//!
//! This module provides the error hierarchy for loading, merging and
//! saving resource configuration layers, using `thiserror` for ergonomic
//! error handling.

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias for operations that may fail with an aspire-e2e error.
///
/// # Examples
///
/// ```
/// use aspire_e2e::{Error, Result};
///
/// fn example_operation() -> Result<String> {
///     Ok("Project".to_string())
/// }
/// ```
pub type Result<T> = std::result::Result<T, Error>;

/// The main error type for the aspire-e2e library.
///
/// A missing layer file is never an error (it yields an empty document);
/// everything else that goes wrong while reading or writing a layer ends up
/// here and is propagated unmodified to the caller.
#[derive(Debug, Error)]
pub enum Error {
    /// Reading or writing a configuration file failed.
    #[error("I/O error on {}: {source}", path.display())]
    FileIo {
        /// The file being read or written.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// A configuration file exists but does not contain a valid document.
    #[error("malformed configuration file {}: {source}", path.display())]
    Parse {
        /// The file that failed to parse.
        path: PathBuf,
        /// The underlying JSON error.
        #[source]
        source: serde_json::Error,
    },

    /// An I/O error without a known path.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A serialization error without a known path.
    #[error("serialization error: {0}")]
    Json(#[from] serde_json::Error),

    /// A validation error occurred.
    #[error("validation error for '{field}': {message}")]
    Validation {
        /// The field that failed validation.
        field: String,
        /// A description of the validation failure.
        message: String,
    },

    /// The requested resource was not found.
    #[error("not found: {resource}")]
    NotFound {
        /// The resource that was not found.
        resource: String,
    },

    /// An override key other than `Mode` or `BuildImage` was given.
    #[error("unknown override key '{key}'. Valid keys: Mode, BuildImage")]
    UnknownOverrideKey {
        /// The rejected key.
        key: String,
    },

    /// A resource config key that does not name an entry field was given.
    #[error("unknown config key '{key}'")]
    UnknownConfigKey {
        /// The rejected key.
        key: String,
    },

    /// A mode string other than `Project` or `Container` was given.
    #[error("invalid mode '{value}': expected Project or Container")]
    InvalidMode {
        /// The rejected value.
        value: String,
    },

    /// The home directory could not be determined and no explicit global
    /// path was configured.
    #[error("cannot determine home directory (set ASPIRE_E2E_CONFIG_PATH)")]
    HomeDirectoryNotFound,
}

impl Error {
    /// Wraps an I/O error with the path it happened on.
    pub(crate) fn file_io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::FileIo {
            path: path.into(),
            source,
        }
    }

    /// Check if error is a lookup miss.
    ///
    /// # Examples
    ///
    /// ```
    /// use aspire_e2e::Error;
    ///
    /// let err = Error::NotFound { resource: "resource 'svc'".into() };
    /// assert!(err.is_not_found());
    /// ```
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Check if error is a caller-level validation failure rather than an
    /// I/O or parse failure.
    ///
    /// # Examples
    ///
    /// ```
    /// use aspire_e2e::Error;
    ///
    /// let err = Error::UnknownOverrideKey { key: "Foo".into() };
    /// assert!(err.is_validation());
    /// ```
    #[must_use]
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::Validation { .. }
                | Self::UnknownOverrideKey { .. }
                | Self::UnknownConfigKey { .. }
                | Self::InvalidMode { .. }
        )
    }
}
