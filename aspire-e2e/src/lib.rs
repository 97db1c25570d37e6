#![deny(missing_docs, unsafe_code)]
#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

//! # aspire-e2e
//!
//! Layered configuration for end-to-end test resources.
//!
//! Each resource can run either from a local project or as a prebuilt
//! container. Its settings come from a global layer in the home directory
//! and an optional repository-local layer, plus override rules that are
//! applied on read and never written back.
//!
//! ## Core Types
//!
//! - [`ResourceEntry`] and [`ResourceMode`]: one resource and how it runs
//! - [`config::Document`]: a raw, persistable layer
//! - [`config::EffectiveDocument`]: the merged, override-applied view
//! - [`ResolutionEngine`]: loads layers, resolves, edits the global layer
//! - [`Error`] and [`Result`]: Error handling types
//! - [`Logger`] and [`LogLevel`]: Logging infrastructure
//!
//! ## Examples
//!
//! ```
//! use aspire_e2e::config::{apply_overrides, Document, OverrideKey};
//! use aspire_e2e::{ResourceEntry, ResourceMode};
//!
//! let mut doc = Document::new();
//! doc.set_resource("rabbit", ResourceEntry::new("rabbit")).unwrap();
//! doc.set_override_field(OverrideKey::Mode, "container").unwrap();
//!
//! let effective = apply_overrides(&doc);
//! assert_eq!(effective.get("rabbit").unwrap().mode, ResourceMode::Container);
//! ```

pub mod config;
pub mod engine;
pub mod error;
pub mod logging;
pub mod resource;

// Re-export key types at crate root for convenience
pub use config::{Document, EffectiveDocument, LocatorConfig};
pub use engine::{ImportPolicy, ImportReport, ResolutionEngine};
pub use error::{Error, Result};
pub use logging::{init_logger, LogLevel, Logger};
pub use resource::{ConfigKey, ResourceEntry, ResourceMode};
