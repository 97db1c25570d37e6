//! Read-time override application.
//!
//! Overrides never touch stored entries. [`apply_overrides`] projects a raw
//! [`Document`] into an [`EffectiveDocument`], which has no way back to disk.

use std::collections::BTreeMap;

use crate::config::schema::{Document, OverrideRules};
use crate::resource::ResourceEntry;

/// The merged, override-applied view of every resource.
///
/// Produced only by [`apply_overrides`]. Unlike [`Document`] it cannot be
/// saved.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EffectiveDocument {
    resources: BTreeMap<String, ResourceEntry>,
    overrides: Option<OverrideRules>,
}

impl EffectiveDocument {
    /// Effective entries keyed by id.
    #[must_use]
    pub fn resources(&self) -> &BTreeMap<String, ResourceEntry> {
        &self.resources
    }

    /// Looks up one effective entry.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&ResourceEntry> {
        self.resources.get(id)
    }

    /// Resource ids in listing order.
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.resources.keys().map(String::as_str)
    }

    /// Number of resources.
    #[must_use]
    pub fn len(&self) -> usize {
        self.resources.len()
    }

    /// Whether there are no resources.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.resources.is_empty()
    }

    /// The rule set that was applied, if any.
    #[must_use]
    pub fn overrides(&self) -> Option<&OverrideRules> {
        self.overrides.as_ref()
    }
}

/// Apply the document's override rules to every entry.
///
/// `raw` is left untouched.
///
/// # Examples
///
/// ```
/// use aspire_e2e::config::{apply_overrides, Document, OverrideKey};
/// use aspire_e2e::{ResourceEntry, ResourceMode};
///
/// let mut raw = Document::new();
/// raw.set_resource("svc", ResourceEntry::new("svc")).unwrap();
/// raw.set_override_field(OverrideKey::Mode, "Container").unwrap();
///
/// let effective = apply_overrides(&raw);
/// assert_eq!(effective.get("svc").unwrap().mode, ResourceMode::Container);
/// assert_eq!(raw.get_resource("svc").unwrap().mode, ResourceMode::Project);
/// ```
#[must_use]
pub fn apply_overrides(raw: &Document) -> EffectiveDocument {
    let overrides = raw.overrides().cloned();
    let resources = raw
        .resources()
        .iter()
        .map(|(id, entry)| {
            let effective = match &overrides {
                Some(rules) => apply_to_entry(entry, rules),
                None => entry.clone(),
            };
            (id.clone(), effective)
        })
        .collect();

    EffectiveDocument {
        resources,
        overrides,
    }
}

/// Apply one rule set to one entry.
///
/// - `Mode` / `BuildImage` pins replace the entry's values unconditionally.
/// - A registry rewrite fires when the entry's registry equals the rule's
///   source exactly; the first match wins.
/// - An image rewrite fires when `image[:tag]` equals the rule's source
///   exactly. The target is split on its first `:` into image and tag; a
///   target without `:` clears the tag. The first match wins.
///
/// Entries without a registry or image are left alone by the respective
/// rewrite.
#[must_use]
pub fn apply_to_entry(entry: &ResourceEntry, rules: &OverrideRules) -> ResourceEntry {
    let mut out = entry.clone();

    if let Some(mode) = rules.mode {
        out.mode = mode;
    }

    if let Some(build_image) = rules.build_image {
        out.build_image = build_image;
    }

    if let Some(rewrites) = &rules.image_registry_rewrites {
        if let Some(registry) = out.image_registry.as_deref().filter(|r| !r.is_empty()) {
            if let Some(to) = rewrites.get(registry) {
                log::debug!("Rewriting registry of '{}': {registry} -> {to}", out.id);
                out.image_registry = Some(to.clone());
            }
        }
    }

    if let Some(rewrites) = &rules.image_rewrites {
        if let Some(full_image) = out.full_image() {
            if let Some(to) = rewrites.get(&full_image) {
                log::debug!("Rewriting image of '{}': {full_image} -> {to}", out.id);
                match to.split_once(':') {
                    Some((image, tag)) => {
                        out.container_image = Some(image.to_string());
                        out.container_tag = Some(tag.to_string());
                    }
                    None => {
                        out.container_image = Some(to.clone());
                        out.container_tag = None;
                    }
                }
            }
        }
    }

    out
}
