//! The resolution engine.
//!
//! Ties the pieces together: locate both layers, load them, merge local on
//! top of global and apply the override rules to produce the effective
//! view. Mutations always target the global layer and are persisted with
//! [`ResolutionEngine::save`]; the effective view is never written back.

use std::path::{Path, PathBuf};

use crate::config::{
    apply_overrides, Document, EffectiveDocument, FileStore, LayerLocator, LayerMerger,
    LocatorConfig, OverrideKey, RewriteTable,
};
use crate::error::{Error, Result};
use crate::resource::{ResourceEntry, ResourceMode};

/// How [`ResolutionEngine::import`] treats ids that already exist.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ImportPolicy {
    /// Replace the existing entry whole.
    #[default]
    Replace,
    /// Merge non-default imported fields into the existing entry.
    Merge,
    /// Keep the existing entry untouched.
    SkipExisting,
}

/// Outcome of an import, listing affected ids.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImportReport {
    /// Ids that did not exist before.
    pub added: Vec<String>,
    /// Existing ids replaced whole.
    pub replaced: Vec<String>,
    /// Existing ids merged into.
    pub merged: Vec<String>,
    /// Ids left alone: existing under `SkipExisting`, or entries without an id.
    pub skipped: Vec<String>,
}

impl ImportReport {
    /// Number of entries that changed the global layer.
    #[must_use]
    pub fn changed(&self) -> usize {
        self.added.len() + self.replaced.len() + self.merged.len()
    }
}

/// Loads, merges and resolves resource configuration layers.
///
/// # Examples
///
/// ```no_run
/// use aspire_e2e::{LocatorConfig, ResolutionEngine};
///
/// let engine = ResolutionEngine::open(LocatorConfig::from_env().unwrap()).unwrap();
/// if let Some(entry) = engine.get_entry("rabbit") {
///     println!("{}", entry.mode);
/// }
/// ```
#[derive(Debug, Clone)]
pub struct ResolutionEngine {
    locator: LayerLocator,
    global: Document,
    local: Option<(PathBuf, Document)>,
}

impl ResolutionEngine {
    /// Locate and load both layers.
    ///
    /// # Errors
    ///
    /// Returns an error if either layer file exists but cannot be read or
    /// parsed. Missing files are empty layers.
    pub fn open(config: LocatorConfig) -> Result<Self> {
        let mut engine = Self::open_global(config)?;

        if let Some(path) = engine.locator.find_local_path() {
            let doc = FileStore::load_file(&path)?;
            log::debug!(
                "Loaded local layer {} ({} resource(s))",
                path.display(),
                doc.resources().len()
            );
            engine.local = Some((path, doc));
        }

        Ok(engine)
    }

    /// Load the global layer only, for callers that edit it.
    ///
    /// The local layer is not searched for, so a broken local file never
    /// blocks a global write. [`ResolutionEngine::resolve`] on such an engine
    /// reflects the global layer alone.
    ///
    /// # Errors
    ///
    /// Returns an error if the global file exists but cannot be read or
    /// parsed.
    pub fn open_global(config: LocatorConfig) -> Result<Self> {
        let locator = LayerLocator::new(config);
        let global = FileStore::load_file(locator.global_path())?;

        log::debug!(
            "Loaded global layer {} ({} resource(s))",
            locator.global_path().display(),
            global.resources().len(),
        );

        Ok(Self {
            locator,
            global,
            local: None,
        })
    }

    /// One-shot read: open the layers and return the effective view.
    ///
    /// # Errors
    ///
    /// See [`ResolutionEngine::open`].
    pub fn load(config: LocatorConfig) -> Result<EffectiveDocument> {
        Ok(Self::open(config)?.resolve())
    }

    /// Path of the global layer, the target of every write.
    #[must_use]
    pub fn global_path(&self) -> &Path {
        self.locator.global_path()
    }

    /// Path of the local layer, if one was found.
    #[must_use]
    pub fn local_path(&self) -> Option<&Path> {
        self.local.as_ref().map(|(path, _)| path.as_path())
    }

    /// The raw global layer, including unsaved changes.
    #[must_use]
    pub fn global(&self) -> &Document {
        &self.global
    }

    /// The raw local layer, if one was found.
    #[must_use]
    pub fn local(&self) -> Option<&Document> {
        self.local.as_ref().map(|(_, doc)| doc)
    }

    /// Merge local on top of global without applying overrides.
    #[must_use]
    pub fn merged(&self) -> Document {
        match self.local() {
            Some(local) => LayerMerger::merge_layers(self.global.clone(), local),
            None => self.global.clone(),
        }
    }

    /// Merge both layers and apply the resulting override rules.
    #[must_use]
    pub fn resolve(&self) -> EffectiveDocument {
        apply_overrides(&self.merged())
    }

    /// The effective entry for `id`.
    #[must_use]
    pub fn get_entry(&self, id: &str) -> Option<ResourceEntry> {
        self.resolve().get(id).cloned()
    }

    /// Insert or replace an entry in the global layer.
    ///
    /// # Errors
    ///
    /// Returns a validation error when `id` is blank.
    pub fn set_entry(&mut self, id: &str, entry: ResourceEntry) -> Result<()> {
        self.global.set_resource(id, entry)
    }

    /// Remove an entry from the global layer. Returns whether it existed.
    pub fn remove_entry(&mut self, id: &str) -> bool {
        self.global.remove_resource(id)
    }

    /// Flip the stored mode of a global entry and return the new mode.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] if the global layer has no such entry.
    pub fn toggle_mode(&mut self, id: &str) -> Result<ResourceMode> {
        let entry = self.global.get_resource_mut(id).ok_or_else(|| Error::NotFound {
            resource: format!("resource '{id}'"),
        })?;
        entry.mode = entry.mode.toggled();
        Ok(entry.mode)
    }

    /// Remove every resource from the global layer.
    pub fn clear_resources(&mut self) {
        self.global.clear_resources();
    }

    /// Set a scalar override in the global layer.
    ///
    /// # Errors
    ///
    /// Returns a validation error for a value the key does not accept.
    pub fn set_override_field(&mut self, key: OverrideKey, value: &str) -> Result<()> {
        self.global.set_override_field(key, value)
    }

    /// Clear a scalar override in the global layer. Returns whether it was set.
    pub fn remove_override_field(&mut self, key: OverrideKey) -> bool {
        self.global.remove_override_field(key)
    }

    /// Add or replace a rewrite rule in the global layer.
    pub fn add_rewrite(&mut self, table: RewriteTable, from: &str, to: &str) {
        self.global.add_rewrite(table, from, to);
    }

    /// Remove a rewrite rule from the global layer. Returns whether it existed.
    pub fn remove_rewrite(&mut self, table: RewriteTable, from: &str) -> bool {
        self.global.remove_rewrite(table, from)
    }

    /// Drop all override rules from the global layer.
    pub fn clear_overrides(&mut self) {
        self.global.clear_overrides();
    }

    /// Import the resources of another document into the global layer.
    ///
    /// Entries whose `Id` is blank are skipped. The map key is the id the
    /// entry is stored under.
    pub fn import(&mut self, source: &Document, policy: ImportPolicy) -> ImportReport {
        let mut report = ImportReport::default();

        for (id, entry) in source.resources() {
            if id.trim().is_empty() || entry.id.trim().is_empty() {
                log::debug!("Skipping imported entry '{id}' without an id");
                report.skipped.push(id.clone());
                continue;
            }

            let exists = self.global.get_resource(id).is_some();
            match (exists, policy) {
                (true, ImportPolicy::SkipExisting) => report.skipped.push(id.clone()),
                (true, ImportPolicy::Merge) => {
                    if let Some(existing) = self.global.get_resource_mut(id) {
                        LayerMerger::merge_entry(existing, entry);
                    }
                    report.merged.push(id.clone());
                }
                (exists, _) => {
                    let mut entry = entry.clone();
                    entry.id.clone_from(id);
                    self.global.aspire.resources.insert(id.clone(), entry);
                    if exists {
                        report.replaced.push(id.clone());
                    } else {
                        report.added.push(id.clone());
                    }
                }
            }
        }

        report
    }

    /// Persist the global layer.
    ///
    /// Only the raw global document is written; neither the local layer nor
    /// any override-applied value is.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written.
    pub fn save(&self) -> Result<()> {
        FileStore::save(&self.global, self.locator.global_path())
    }
}
