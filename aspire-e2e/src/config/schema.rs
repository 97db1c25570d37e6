//! Configuration document schema.
//!
//! This module defines the on-disk layout of a configuration layer: a map
//! of resource entries plus an optional set of override rules, wrapped in an
//! `Aspire` root object.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::resource::{ResourceEntry, ResourceMode};

/// Mapping from a source string to its replacement.
pub type RewriteMap = BTreeMap<String, String>;

/// One configuration layer as stored on disk.
///
/// This is the *raw* form: entries exactly as persisted, overrides not
/// applied. Use [`crate::config::apply_overrides`] to derive the effective
/// view; only `Document` can be saved.
///
/// # Examples
///
/// ```
/// use aspire_e2e::config::Document;
/// use aspire_e2e::ResourceEntry;
///
/// let mut doc = Document::new();
/// doc.set_resource("svc", ResourceEntry::new("svc")).unwrap();
/// assert!(doc.get_resource("svc").is_some());
/// assert!(doc.remove_resource("svc"));
/// assert!(doc.is_empty());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct Document {
    /// Root section.
    pub aspire: AspireSection,
}

/// Contents of the `Aspire` root object.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct AspireSection {
    /// Read-time transformation rules.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub overrides: Option<OverrideRules>,

    /// Resource entries keyed by id.
    pub resources: BTreeMap<String, ResourceEntry>,
}

/// Global transformation rules applied at read time.
///
/// Every field is independently optional; an absent field means "no rule of
/// this kind".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct OverrideRules {
    /// Pins every entry's mode.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mode: Option<ResourceMode>,

    /// Pins every entry's build flag.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub build_image: Option<bool>,

    /// Exact registry string to replacement registry.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_registry_rewrites: Option<RewriteMap>,

    /// `image[:tag]` to replacement `image[:tag]`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_rewrites: Option<RewriteMap>,
}

/// Scalar override fields settable by key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverrideKey {
    /// Pin for every entry's mode.
    Mode,
    /// Pin for every entry's build flag.
    BuildImage,
}

impl OverrideKey {
    /// Returns the key as written in the file.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Mode => "Mode",
            Self::BuildImage => "BuildImage",
        }
    }
}

impl fmt::Display for OverrideKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OverrideKey {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        if s.eq_ignore_ascii_case("mode") {
            Ok(Self::Mode)
        } else if s.eq_ignore_ascii_case("buildimage") {
            Ok(Self::BuildImage)
        } else {
            Err(Error::UnknownOverrideKey { key: s.to_string() })
        }
    }
}

/// Selects one of the two rewrite maps.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RewriteTable {
    /// `ImageRegistryRewrites`
    Registry,
    /// `ImageRewrites`
    Image,
}

impl fmt::Display for RewriteTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Registry => f.write_str("Registry rewrite"),
            Self::Image => f.write_str("Image rewrite"),
        }
    }
}

impl OverrideRules {
    /// Returns true when no rule of any kind is present.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.mode.is_none()
            && self.build_image.is_none()
            && self.image_registry_rewrites.as_ref().map_or(true, RewriteMap::is_empty)
            && self.image_rewrites.as_ref().map_or(true, RewriteMap::is_empty)
    }

    /// Sets a scalar override from its string form.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidMode`] for a bad mode and
    /// [`Error::Validation`] when `BuildImage` is not `true` or `false`.
    pub fn set_field(&mut self, key: OverrideKey, value: &str) -> Result<()> {
        match key {
            OverrideKey::Mode => self.mode = Some(value.parse()?),
            OverrideKey::BuildImage => {
                let flag = value
                    .trim()
                    .to_ascii_lowercase()
                    .parse::<bool>()
                    .map_err(|_| Error::Validation {
                        field: "BuildImage".into(),
                        message: "must be 'true' or 'false'".into(),
                    })?;
                self.build_image = Some(flag);
            }
        }
        Ok(())
    }

    /// Clears a scalar override. Returns whether it was set.
    pub fn remove_field(&mut self, key: OverrideKey) -> bool {
        match key {
            OverrideKey::Mode => self.mode.take().is_some(),
            OverrideKey::BuildImage => self.build_image.take().is_some(),
        }
    }

    /// Returns the selected rewrite map, if present.
    #[must_use]
    pub fn rewrites(&self, table: RewriteTable) -> Option<&RewriteMap> {
        match table {
            RewriteTable::Registry => self.image_registry_rewrites.as_ref(),
            RewriteTable::Image => self.image_rewrites.as_ref(),
        }
    }

    fn rewrites_slot(&mut self, table: RewriteTable) -> &mut Option<RewriteMap> {
        match table {
            RewriteTable::Registry => &mut self.image_registry_rewrites,
            RewriteTable::Image => &mut self.image_rewrites,
        }
    }

    /// Adds or replaces one rewrite rule.
    pub fn add_rewrite(&mut self, table: RewriteTable, from: &str, to: &str) {
        self.rewrites_slot(table)
            .get_or_insert_with(RewriteMap::new)
            .insert(from.to_string(), to.to_string());
    }

    /// Removes one rewrite rule. Returns whether it existed.
    ///
    /// A map left empty is dropped.
    pub fn remove_rewrite(&mut self, table: RewriteTable, from: &str) -> bool {
        let slot = self.rewrites_slot(table);
        let Some(map) = slot.as_mut() else {
            return false;
        };
        let removed = map.remove(from).is_some();
        if map.is_empty() {
            *slot = None;
        }
        removed
    }
}

impl Document {
    /// Creates an empty document.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true when the document has no resources and no overrides.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.aspire.resources.is_empty() && self.aspire.overrides.is_none()
    }

    /// Resource entries keyed by id.
    #[must_use]
    pub fn resources(&self) -> &BTreeMap<String, ResourceEntry> {
        &self.aspire.resources
    }

    /// The override rules, if any.
    #[must_use]
    pub fn overrides(&self) -> Option<&OverrideRules> {
        self.aspire.overrides.as_ref()
    }

    /// Looks up one entry.
    #[must_use]
    pub fn get_resource(&self, id: &str) -> Option<&ResourceEntry> {
        self.aspire.resources.get(id)
    }

    /// Looks up one entry mutably.
    pub fn get_resource_mut(&mut self, id: &str) -> Option<&mut ResourceEntry> {
        self.aspire.resources.get_mut(id)
    }

    /// Inserts or replaces an entry under `id`.
    ///
    /// The entry's own `id` is set to `id` so the key and the record cannot
    /// disagree.
    ///
    /// # Errors
    ///
    /// Returns a validation error when `id` is blank.
    pub fn set_resource(&mut self, id: &str, mut entry: ResourceEntry) -> Result<()> {
        if id.trim().is_empty() {
            return Err(Error::Validation {
                field: "Id".into(),
                message: "resource id must be non-empty".into(),
            });
        }
        entry.id = id.to_string();
        self.aspire.resources.insert(id.to_string(), entry);
        Ok(())
    }

    /// Removes an entry. Returns whether it existed.
    pub fn remove_resource(&mut self, id: &str) -> bool {
        self.aspire.resources.remove(id).is_some()
    }

    /// Removes every resource entry, keeping overrides.
    pub fn clear_resources(&mut self) {
        self.aspire.resources.clear();
    }

    /// Sets a scalar override field, creating the rule set if needed.
    ///
    /// # Errors
    ///
    /// See [`OverrideRules::set_field`].
    pub fn set_override_field(&mut self, key: OverrideKey, value: &str) -> Result<()> {
        let mut rules = self.aspire.overrides.take().unwrap_or_default();
        let result = rules.set_field(key, value);
        self.store_overrides(rules);
        result
    }

    /// Clears a scalar override field. Returns whether it was set.
    pub fn remove_override_field(&mut self, key: OverrideKey) -> bool {
        let Some(mut rules) = self.aspire.overrides.take() else {
            return false;
        };
        let removed = rules.remove_field(key);
        self.store_overrides(rules);
        removed
    }

    /// Adds or replaces a rewrite rule, creating the rule set if needed.
    pub fn add_rewrite(&mut self, table: RewriteTable, from: &str, to: &str) {
        let mut rules = self.aspire.overrides.take().unwrap_or_default();
        rules.add_rewrite(table, from, to);
        self.store_overrides(rules);
    }

    /// Removes a rewrite rule. Returns whether it existed.
    pub fn remove_rewrite(&mut self, table: RewriteTable, from: &str) -> bool {
        let Some(mut rules) = self.aspire.overrides.take() else {
            return false;
        };
        let removed = rules.remove_rewrite(table, from);
        self.store_overrides(rules);
        removed
    }

    /// Drops the whole rule set.
    pub fn clear_overrides(&mut self) {
        self.aspire.overrides = None;
    }

    // A rule set with nothing left in it is not kept.
    fn store_overrides(&mut self, rules: OverrideRules) {
        self.aspire.overrides = if rules.is_empty() { None } else { Some(rules) };
    }
}
