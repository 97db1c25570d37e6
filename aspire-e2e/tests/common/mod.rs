//! Common test utilities for integration tests.
//!
//! Provides a throwaway repository layout with a home directory for the
//! global layer, so engine tests never see the real user configuration.

use std::fs;
use std::path::{Path, PathBuf};

use aspire_e2e::config::{Document, FileStore, LOCAL_CONFIG_FILE_NAME};
use aspire_e2e::{LocatorConfig, ResourceEntry};
use tempfile::TempDir;

/// A temporary `home/` plus `repo/` (with `.git`) pair.
///
/// # Examples
///
/// ```no_run
/// # use common::LayerFixture;
/// let fixture = LayerFixture::new();
/// fixture.write_global(&[ResourceEntry::new("db")]);
/// let engine = ResolutionEngine::open(fixture.config()).unwrap();
/// ```
pub struct LayerFixture {
    _temp: TempDir,
    home: PathBuf,
    repo: PathBuf,
}

#[allow(dead_code)]
impl LayerFixture {
    /// Creates the directory layout. The global file is not written.
    pub fn new() -> Self {
        let temp = tempfile::tempdir().unwrap();
        let home = temp.path().join("home");
        let repo = temp.path().join("repo");
        fs::create_dir_all(&home).unwrap();
        fs::create_dir_all(repo.join(".git")).unwrap();
        Self {
            _temp: temp,
            home,
            repo,
        }
    }

    /// Path the global layer lives at.
    pub fn global_path(&self) -> PathBuf {
        self.home.join(".aspire-e2e").join("resources.json")
    }

    /// Repository root (contains `.git`).
    pub fn repo(&self) -> &Path {
        &self.repo
    }

    /// Creates and returns a nested directory inside the repository.
    pub fn subdir(&self, relative: &str) -> PathBuf {
        let dir = self.repo.join(relative);
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    /// Locator configuration starting at the repository root.
    pub fn config(&self) -> LocatorConfig {
        LocatorConfig::new(self.global_path(), &self.repo)
    }

    /// Writes the given entries as the global layer.
    pub fn write_global(&self, entries: &[ResourceEntry]) {
        self.write_global_doc(&document(entries));
    }

    /// Writes a prepared document as the global layer.
    pub fn write_global_doc(&self, doc: &Document) {
        FileStore::save(doc, &self.global_path()).unwrap();
    }

    /// Writes a prepared document as the local layer at the repository root.
    pub fn write_local_doc(&self, doc: &Document) {
        FileStore::save(doc, &self.repo.join(LOCAL_CONFIG_FILE_NAME)).unwrap();
    }

    /// Writes raw text as the local layer.
    pub fn write_local_text(&self, contents: &str) {
        fs::write(self.repo.join(LOCAL_CONFIG_FILE_NAME), contents).unwrap();
    }

    /// Reads the global layer back from disk.
    pub fn read_global(&self) -> Document {
        FileStore::load_file(&self.global_path()).unwrap()
    }
}

/// Builds a document from entries keyed by their ids.
pub fn document(entries: &[ResourceEntry]) -> Document {
    let mut doc = Document::new();
    for entry in entries {
        doc.set_resource(&entry.id, entry.clone()).unwrap();
    }
    doc
}
