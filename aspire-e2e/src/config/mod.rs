//! Layered resource configuration.
//!
//! Two JSON layers describe the same set of resources:
//!
//! - the global layer (`~/.aspire-e2e/resources.json`, or the path in
//!   `ASPIRE_E2E_CONFIG_PATH`)
//! - the local layer (`e2e-resources.json`, found by walking up from the
//!   working directory to the repository root)
//!
//! # Precedence
//!
//! Resources from the local layer replace global resources with the same id
//! whole. Override rules merge field by field, local winning. The merged
//! rules are then applied on read to produce the effective view; the stored
//! entries are never modified by them.
//!
//! # Examples
//!
//! ```
//! use aspire_e2e::config::{apply_overrides, Document, LayerMerger, RewriteTable};
//! use aspire_e2e::ResourceEntry;
//!
//! let mut global = Document::new();
//! global
//!     .set_resource(
//!         "db",
//!         ResourceEntry::new("db").with_image_registry("docker.io"),
//!     )
//!     .unwrap();
//!
//! let mut local = Document::new();
//! local.add_rewrite(RewriteTable::Registry, "docker.io", "mirror.local");
//!
//! let effective = apply_overrides(&LayerMerger::merge_layers(global, &local));
//! assert_eq!(
//!     effective.get("db").unwrap().image_registry.as_deref(),
//!     Some("mirror.local")
//! );
//! ```

pub mod loader;
pub mod locator;
pub mod merger;
pub mod overrides;
pub mod schema;

#[cfg(test)]
mod proptests;

pub use loader::FileStore;
pub use locator::{
    default_global_path, LayerLocator, LocatorConfig, CONFIG_PATH_ENV, DEFAULT_CONFIG_DIR,
    GLOBAL_CONFIG_FILE_NAME, LOCAL_CONFIG_FILE_NAME, REPOSITORY_ROOT_MARKER,
};
pub use merger::LayerMerger;
pub use overrides::{apply_overrides, apply_to_entry, EffectiveDocument};
pub use schema::{AspireSection, Document, OverrideKey, OverrideRules, RewriteMap, RewriteTable};
