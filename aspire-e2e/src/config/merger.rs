//! Merging configuration layers.
//!
//! Resources and override rules merge differently: a local resource replaces
//! the global one with the same id wholesale, while override rules merge
//! field by field (and key by key inside the rewrite maps). The two are kept
//! as separate functions so neither strategy leaks into the other.

use std::collections::BTreeMap;

use crate::config::schema::{Document, OverrideRules, RewriteMap};
use crate::resource::{ResourceEntry, ResourceMode};

/// Merges configuration layers according to precedence rules.
///
/// # Examples
///
/// ```
/// use aspire_e2e::config::{Document, LayerMerger};
/// use aspire_e2e::{ResourceEntry, ResourceMode};
///
/// let mut global = Document::new();
/// global.set_resource("a", ResourceEntry::new("a")).unwrap();
///
/// let mut local = Document::new();
/// local
///     .set_resource("a", ResourceEntry::new("a").with_mode(ResourceMode::Container))
///     .unwrap();
///
/// let merged = LayerMerger::merge_layers(global, &local);
/// assert_eq!(merged.get_resource("a").unwrap().mode, ResourceMode::Container);
/// ```
pub struct LayerMerger;

impl LayerMerger {
    /// Merge `local` on top of `global`.
    #[must_use]
    pub fn merge_layers(mut global: Document, local: &Document) -> Document {
        Self::merge_resources(&mut global.aspire.resources, &local.aspire.resources);
        Self::merge_overrides(&mut global.aspire.overrides, local.aspire.overrides.as_ref());
        global
    }

    /// Merge resource maps: every source entry replaces the target entry
    /// with the same id whole. Target-only ids are kept; source-only ids are
    /// added.
    pub fn merge_resources(
        target: &mut BTreeMap<String, ResourceEntry>,
        source: &BTreeMap<String, ResourceEntry>,
    ) {
        for (id, entry) in source {
            if target.insert(id.clone(), entry.clone()).is_some() {
                log::debug!("Local layer replaces resource '{id}'");
            }
        }
    }

    /// Merge override rules field by field.
    ///
    /// # Merging Rules
    ///
    /// - `Mode`, `BuildImage`: source wins if present
    /// - rewrite maps: per-key union, source entries win on shared keys
    pub fn merge_overrides(target: &mut Option<OverrideRules>, source: Option<&OverrideRules>) {
        let Some(source) = source else {
            return;
        };

        let target = target.get_or_insert_with(OverrideRules::default);

        if source.mode.is_some() {
            target.mode = source.mode;
        }

        if source.build_image.is_some() {
            target.build_image = source.build_image;
        }

        Self::merge_rewrites(
            &mut target.image_registry_rewrites,
            source.image_registry_rewrites.as_ref(),
        );
        Self::merge_rewrites(&mut target.image_rewrites, source.image_rewrites.as_ref());
    }

    fn merge_rewrites(target: &mut Option<RewriteMap>, source: Option<&RewriteMap>) {
        let Some(source) = source.filter(|map| !map.is_empty()) else {
            return;
        };

        let target = target.get_or_insert_with(RewriteMap::new);
        for (from, to) in source {
            target.insert(from.clone(), to.clone());
        }
    }

    /// Merge one imported entry into an existing one.
    ///
    /// A source field overwrites the target only when it carries a
    /// non-default value: non-blank strings, a mode other than `Project`, a
    /// build flag of `true`. The id is never changed.
    pub fn merge_entry(target: &mut ResourceEntry, source: &ResourceEntry) {
        fn take(target: &mut Option<String>, source: Option<&String>) {
            if let Some(value) = source.filter(|s| !s.trim().is_empty()) {
                *target = Some(value.clone());
            }
        }

        take(&mut target.name, source.name.as_ref());
        if source.mode != ResourceMode::Project {
            target.mode = source.mode;
        }
        take(&mut target.container_image, source.container_image.as_ref());
        take(&mut target.container_tag, source.container_tag.as_ref());
        take(&mut target.project_path, source.project_path.as_ref());
        if source.build_image {
            target.build_image = true;
        }
        take(&mut target.build_image_command, source.build_image_command.as_ref());
        if source.skip_image_build {
            target.skip_image_build = true;
        }
        take(&mut target.image_registry, source.image_registry.as_ref());
    }
}
