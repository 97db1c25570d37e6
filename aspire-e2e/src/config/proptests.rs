//! Property-based tests for layer merging and override application.

use super::merger::LayerMerger;
use super::overrides::apply_overrides;
use super::schema::{Document, OverrideRules, RewriteMap};
use crate::resource::{ResourceEntry, ResourceMode};
use proptest::prelude::*;

// Rewrite sources draw from a-m, targets from n-z, so a rewritten value can
// never match another rule's source.
const SOURCE: &str = "[a-m]{1,4}";
const TARGET: &str = "[n-z]{1,4}";

fn mode_strategy() -> impl Strategy<Value = ResourceMode> {
    prop_oneof![Just(ResourceMode::Project), Just(ResourceMode::Container)]
}

fn entry_strategy() -> impl Strategy<Value = ResourceEntry> {
    (
        mode_strategy(),
        any::<bool>(),
        prop::option::of(SOURCE),
        prop::option::of(SOURCE),
        prop::option::of(SOURCE),
    )
        .prop_map(|(mode, build_image, image, tag, registry)| ResourceEntry {
            mode,
            build_image,
            container_image: image,
            container_tag: tag,
            image_registry: registry,
            ..ResourceEntry::default()
        })
}

fn document_strategy() -> impl Strategy<Value = Document> {
    prop::collection::btree_map("[a-z]{1,6}", entry_strategy(), 0..8).prop_map(|entries| {
        let mut doc = Document::new();
        for (id, entry) in entries {
            doc.set_resource(&id, entry).unwrap();
        }
        doc
    })
}

fn image_key_strategy(alphabet: &'static str) -> impl Strategy<Value = String> {
    (alphabet, prop::option::of(alphabet)).prop_map(|(image, tag)| match tag {
        Some(tag) => format!("{image}:{tag}"),
        None => image,
    })
}

fn rules_strategy() -> impl Strategy<Value = OverrideRules> {
    (
        prop::option::of(mode_strategy()),
        prop::option::of(any::<bool>()),
        prop::option::of(prop::collection::btree_map(SOURCE, TARGET, 0..4)),
        prop::option::of(prop::collection::btree_map(
            image_key_strategy(SOURCE),
            image_key_strategy(TARGET),
            0..4,
        )),
    )
        .prop_map(|(mode, build_image, registry, image)| OverrideRules {
            mode,
            build_image,
            image_registry_rewrites: registry,
            image_rewrites: image,
        })
}

fn with_rules(mut doc: Document, rules: OverrideRules) -> Document {
    doc.aspire.overrides = Some(rules);
    doc
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 2000,
        .. ProptestConfig::default()
    })]

    // Applying overrides never changes the raw document and is deterministic
    #[test]
    fn apply_overrides_leaves_raw_untouched(
        doc in document_strategy(),
        rules in rules_strategy()
    ) {
        let raw = with_rules(doc, rules);
        let before = raw.clone();

        let first = apply_overrides(&raw);
        let second = apply_overrides(&raw);

        prop_assert_eq!(&raw, &before);
        prop_assert_eq!(first, second);
    }

    // Re-applying the rules to an effective view changes nothing further
    #[test]
    fn apply_overrides_is_idempotent(
        doc in document_strategy(),
        rules in rules_strategy()
    ) {
        let raw = with_rules(doc, rules.clone());
        let once = apply_overrides(&raw);

        let mut again = Document::new();
        for (id, entry) in once.resources() {
            again.set_resource(id, entry.clone()).unwrap();
        }
        let twice = apply_overrides(&with_rules(again, rules));

        prop_assert_eq!(once.resources(), twice.resources());
    }

    // Mode and build pins reach every entry
    #[test]
    fn pins_apply_to_every_entry(
        doc in document_strategy(),
        mode in mode_strategy(),
        build_image in any::<bool>()
    ) {
        let raw = with_rules(doc, OverrideRules {
            mode: Some(mode),
            build_image: Some(build_image),
            ..OverrideRules::default()
        });

        for entry in apply_overrides(&raw).resources().values() {
            prop_assert_eq!(entry.mode, mode);
            prop_assert_eq!(entry.build_image, build_image);
        }
    }

    // A local entry always replaces the global entry with the same id
    #[test]
    fn merge_local_entries_win(
        global in document_strategy(),
        local in document_strategy()
    ) {
        let merged = LayerMerger::merge_layers(global.clone(), &local);

        for (id, entry) in local.resources() {
            prop_assert_eq!(merged.get_resource(id), Some(entry));
        }
        for (id, entry) in global.resources() {
            if local.get_resource(id).is_none() {
                prop_assert_eq!(merged.get_resource(id), Some(entry));
            }
        }
        prop_assert!(merged.resources().len() <= global.resources().len() + local.resources().len());
    }

    // Rewrite maps merge as a per-key union with the local side winning
    #[test]
    fn merge_rewrite_maps_union(
        low in prop::collection::btree_map(SOURCE, TARGET, 0..6),
        high in prop::collection::btree_map(SOURCE, TARGET, 0..6)
    ) {
        let mut target = Some(OverrideRules {
            image_registry_rewrites: Some(low.clone()),
            ..OverrideRules::default()
        });
        let source = OverrideRules {
            image_registry_rewrites: Some(high.clone()),
            ..OverrideRules::default()
        };
        LayerMerger::merge_overrides(&mut target, Some(&source));

        let merged: RewriteMap = target
            .and_then(|rules| rules.image_registry_rewrites)
            .unwrap_or_default();
        for (from, to) in &high {
            prop_assert_eq!(merged.get(from), Some(to));
        }
        for (from, to) in &low {
            if !high.contains_key(from) {
                prop_assert_eq!(merged.get(from), Some(to));
            }
        }
        prop_assert!(merged.keys().all(|k| low.contains_key(k) || high.contains_key(k)));
    }

    // Merging an empty layer is the identity
    #[test]
    fn merge_with_empty_local_is_identity(global in document_strategy()) {
        let merged = LayerMerger::merge_layers(global.clone(), &Document::new());
        prop_assert_eq!(merged, global);
    }
}
