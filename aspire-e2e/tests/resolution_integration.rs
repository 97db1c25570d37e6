//! Integration tests for layered resolution.
//!
//! Every test works against a temporary home and repository, so nothing here
//! reads or writes the real `~/.aspire-e2e`. The one test that exercises the
//! `ASPIRE_E2E_CONFIG_PATH` variable is marked `#[serial]`.

mod common;

use std::env;
use std::fs;

use aspire_e2e::config::{
    FileStore, LayerLocator, OverrideKey, RewriteTable, CONFIG_PATH_ENV, LOCAL_CONFIG_FILE_NAME,
};
use aspire_e2e::{
    Document, Error, ImportPolicy, LocatorConfig, ResolutionEngine, ResourceEntry, ResourceMode,
};
use common::{document, LayerFixture};
use serial_test::serial;

// ============================================================================
// Layer precedence
// ============================================================================

#[test]
fn test_local_over_global_precedence() {
    let fixture = LayerFixture::new();
    fixture.write_global(&[ResourceEntry::new("a"), ResourceEntry::new("b")]);
    fixture.write_local_doc(&document(&[
        ResourceEntry::new("a").with_mode(ResourceMode::Container)
    ]));

    let effective = ResolutionEngine::load(fixture.config()).unwrap();
    assert_eq!(effective.get("a").unwrap().mode, ResourceMode::Container);
    assert_eq!(effective.get("b").unwrap().mode, ResourceMode::Project);
}

#[test]
fn test_local_layer_found_from_nested_directory() {
    let fixture = LayerFixture::new();
    fixture.write_local_doc(&document(&[ResourceEntry::new("local")]));
    let nested = fixture.subdir("tests/E2E");

    let engine = ResolutionEngine::open(fixture.config().with_start_dir(&nested)).unwrap();
    assert_eq!(
        engine.local_path(),
        Some(fixture.repo().join(LOCAL_CONFIG_FILE_NAME).as_path())
    );
    assert!(engine.get_entry("local").is_some());
}

#[test]
fn test_nested_repository_hides_outer_local_layer() {
    let fixture = LayerFixture::new();
    fixture.write_local_doc(&document(&[ResourceEntry::new("outer")]));
    let inner = fixture.subdir("vendor/inner");
    fs::create_dir(inner.join(".git")).unwrap();

    let engine = ResolutionEngine::open(fixture.config().with_start_dir(&inner)).unwrap();
    assert!(engine.local_path().is_none());
    assert!(engine.get_entry("outer").is_none());
}

#[test]
fn test_file_next_to_marker_is_found() {
    let fixture = LayerFixture::new();
    fixture.write_local_doc(&Document::new());

    let locator = LayerLocator::new(fixture.config());
    assert_eq!(
        locator.find_local_path(),
        Some(fixture.repo().join(LOCAL_CONFIG_FILE_NAME))
    );
}

#[test]
fn test_overrides_from_both_layers_merge() {
    let fixture = LayerFixture::new();

    let mut global = document(&[
        ResourceEntry::new("db").with_image_registry("docker.io"),
        ResourceEntry::new("cache").with_image_registry("quay.io"),
    ]);
    global.set_override_field(OverrideKey::BuildImage, "true").unwrap();
    global.add_rewrite(RewriteTable::Registry, "docker.io", "global.io");
    global.add_rewrite(RewriteTable::Registry, "quay.io", "mirror.io");
    fixture.write_global_doc(&global);

    let mut local = Document::new();
    local.set_override_field(OverrideKey::Mode, "Container").unwrap();
    local.add_rewrite(RewriteTable::Registry, "docker.io", "local.io");
    fixture.write_local_doc(&local);

    let effective = ResolutionEngine::load(fixture.config()).unwrap();
    let db = effective.get("db").unwrap();
    let cache = effective.get("cache").unwrap();

    assert_eq!(db.image_registry.as_deref(), Some("local.io"));
    assert_eq!(cache.image_registry.as_deref(), Some("mirror.io"));
    assert!(db.build_image && cache.build_image);
    assert_eq!(db.mode, ResourceMode::Container);
}

// ============================================================================
// Read/write separation
// ============================================================================

#[test]
fn test_overrides_are_never_persisted() {
    let fixture = LayerFixture::new();
    let mut engine = ResolutionEngine::open(fixture.config()).unwrap();
    engine
        .set_entry(
            "rabbit",
            ResourceEntry::new("rabbit")
                .with_container_image("rabbitmq")
                .with_container_tag("4-management"),
        )
        .unwrap();
    engine
        .set_override_field(OverrideKey::Mode, "Container")
        .unwrap();
    engine.add_rewrite(RewriteTable::Image, "rabbitmq:4-management", "rabbitmq:4");
    engine.save().unwrap();

    let raw = fixture.read_global();
    let stored = raw.get_resource("rabbit").unwrap();
    assert_eq!(stored.mode, ResourceMode::Project);
    assert_eq!(stored.container_tag.as_deref(), Some("4-management"));

    let reopened = ResolutionEngine::open(fixture.config()).unwrap();
    let effective = reopened.get_entry("rabbit").unwrap();
    assert_eq!(effective.mode, ResourceMode::Container);
    assert_eq!(effective.container_tag.as_deref(), Some("4"));
}

#[test]
fn test_writes_never_touch_local_layer() {
    let fixture = LayerFixture::new();
    fixture.write_local_doc(&document(&[ResourceEntry::new("local")]));
    let local_path = fixture.repo().join(LOCAL_CONFIG_FILE_NAME);
    let before = fs::read_to_string(&local_path).unwrap();

    let mut engine = ResolutionEngine::open(fixture.config()).unwrap();
    engine.set_entry("global", ResourceEntry::new("global")).unwrap();
    engine.clear_overrides();
    engine.save().unwrap();

    assert_eq!(fs::read_to_string(&local_path).unwrap(), before);
    assert!(fixture.read_global().get_resource("local").is_none());
}

#[test]
fn test_mutation_round_trip() {
    let fixture = LayerFixture::new();
    let mut engine = ResolutionEngine::open(fixture.config()).unwrap();

    engine.set_entry("a", ResourceEntry::new("a")).unwrap();
    engine.set_entry("b", ResourceEntry::new("b")).unwrap();
    engine.add_rewrite(RewriteTable::Image, "redis:7", "valkey:8");
    assert!(engine.remove_entry("b"));
    assert!(!engine.remove_entry("b"));
    assert!(engine.remove_rewrite(RewriteTable::Image, "redis:7"));
    assert!(!engine.remove_rewrite(RewriteTable::Image, "redis:7"));
    engine.save().unwrap();

    let text = fs::read_to_string(fixture.global_path()).unwrap();
    assert!(!text.contains("Overrides"));

    let raw = fixture.read_global();
    assert_eq!(raw.resources().keys().collect::<Vec<_>>(), vec!["a"]);
}

#[test]
fn test_blank_id_is_rejected() {
    let fixture = LayerFixture::new();
    let mut engine = ResolutionEngine::open(fixture.config()).unwrap();
    let err = engine.set_entry("  ", ResourceEntry::new("  ")).unwrap_err();
    assert!(err.is_validation());
}

// ============================================================================
// Errors
// ============================================================================

#[test]
fn test_corrupt_local_layer_is_fatal() {
    let fixture = LayerFixture::new();
    fixture.write_global(&[ResourceEntry::new("a")]);
    fixture.write_local_text("{ this is not json");

    match ResolutionEngine::open(fixture.config()) {
        Err(Error::Parse { path, .. }) => {
            assert_eq!(path, fixture.repo().join(LOCAL_CONFIG_FILE_NAME));
        }
        other => panic!("expected parse error, got {other:?}"),
    }
}

#[test]
fn test_unknown_stored_mode_is_parse_error() {
    let fixture = LayerFixture::new();
    fixture.write_local_text(r#"{"Aspire":{"Resources":{"a":{"Id":"a","Mode":"Hybrid"}}}}"#);
    let err = ResolutionEngine::open(fixture.config()).unwrap_err();
    assert!(matches!(err, Error::Parse { .. }));
}

#[test]
fn test_unknown_fields_are_ignored() {
    let fixture = LayerFixture::new();
    fixture.write_local_text(
        r#"{"Aspire":{"Resources":{"a":{"Id":"a","Future":1}}},"Other":{}}"#,
    );
    let engine = ResolutionEngine::open(fixture.config()).unwrap();
    assert_eq!(engine.get_entry("a").unwrap(), ResourceEntry::new("a"));
}

// ============================================================================
// Import
// ============================================================================

#[test]
fn test_import_from_exported_file() {
    let fixture = LayerFixture::new();
    fixture.write_global(&[ResourceEntry::new("kept").with_project_path("/kept.csproj")]);

    let export = fixture.repo().join("export.json");
    FileStore::save(
        &document(&[
            ResourceEntry::new("kept").with_mode(ResourceMode::Container),
            ResourceEntry::new("fresh"),
        ]),
        &export,
    )
    .unwrap();

    let mut engine = ResolutionEngine::open(fixture.config()).unwrap();
    let source = FileStore::load_file(&export).unwrap();
    let report = engine.import(&source, ImportPolicy::Merge);
    engine.save().unwrap();

    assert_eq!(report.added, vec!["fresh".to_string()]);
    assert_eq!(report.merged, vec!["kept".to_string()]);

    let kept = fixture.read_global().get_resource("kept").cloned().unwrap();
    assert_eq!(kept.mode, ResourceMode::Container);
    assert_eq!(kept.project_path.as_deref(), Some("/kept.csproj"));
}

// ============================================================================
// Environment
// ============================================================================

#[test]
#[serial]
fn test_config_path_env_redirects_global_layer() {
    let fixture = LayerFixture::new();
    let custom = fixture.repo().join("custom.json");
    FileStore::save(&document(&[ResourceEntry::new("env")]), &custom).unwrap();

    let saved = env::var_os(CONFIG_PATH_ENV);
    env::set_var(CONFIG_PATH_ENV, &custom);
    let config = LocatorConfig::from_env().map(|c| c.with_start_dir(fixture.repo()));
    match saved {
        Some(v) => env::set_var(CONFIG_PATH_ENV, v),
        None => env::remove_var(CONFIG_PATH_ENV),
    }

    let config = config.unwrap();
    assert_eq!(config.global_path, custom);
    let engine = ResolutionEngine::open(config).unwrap();
    assert!(engine.get_entry("env").is_some());
}
