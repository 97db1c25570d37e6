//! Loading and saving configuration layers.
//!
//! A layer file that does not exist is an empty document. A layer file
//! that exists but cannot be read or parsed is an error.

use std::fs;
use std::io::{self, Write};
use std::path::Path;

use tempfile::NamedTempFile;

use crate::config::schema::Document;
use crate::error::{Error, Result};

/// Reads and writes [`Document`]s as JSON files.
///
/// # Examples
///
/// ```no_run
/// use aspire_e2e::config::FileStore;
/// use std::path::Path;
///
/// let doc = FileStore::load_file(Path::new("/tmp/resources.json")).unwrap();
/// FileStore::save(&doc, Path::new("/tmp/resources.json")).unwrap();
/// ```
pub struct FileStore;

impl FileStore {
    /// Load a document from `path`.
    ///
    /// Returns an empty document if `path` does not reference an existing
    /// file. Fields absent from the JSON take their defaults.
    ///
    /// # Errors
    ///
    /// Returns [`Error::FileIo`] if the file exists but cannot be read and
    /// [`Error::Parse`] if its contents are not a valid document.
    pub fn load_file(path: &Path) -> Result<Document> {
        if !path.is_file() {
            log::debug!("No configuration at {}, using empty document", path.display());
            return Ok(Document::new());
        }

        let contents = fs::read_to_string(path).map_err(|e| Error::file_io(path, e))?;
        Self::parse(path, &contents)
    }

    /// Parse document text, attributing errors to `path`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Parse`] on malformed JSON or schema mismatch.
    pub fn parse(path: &Path, contents: &str) -> Result<Document> {
        serde_json::from_str(contents).map_err(|source| Error::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Save `document` to `path` as indented JSON.
    ///
    /// Missing parent directories are created. The file is written to a
    /// temporary sibling and renamed into place, so readers never observe a
    /// half-written file. Concurrent writers are not coordinated: the last
    /// save wins.
    ///
    /// # Errors
    ///
    /// Returns [`Error::FileIo`] if the directory cannot be created or the
    /// file cannot be written.
    pub fn save(document: &Document, path: &Path) -> Result<()> {
        let dir = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        fs::create_dir_all(dir).map_err(|e| Error::file_io(dir, e))?;

        let mut json = serde_json::to_string_pretty(document)?;
        json.push('\n');

        let write = || -> io::Result<()> {
            let mut tmp = NamedTempFile::new_in(dir)?;
            tmp.write_all(json.as_bytes())?;
            tmp.as_file().sync_all()?;
            tmp.persist(path).map_err(|e| e.error)?;
            Ok(())
        };
        write().map_err(|e| Error::file_io(path, e))?;

        log::debug!(
            "Saved {} resource(s) to {}",
            document.resources().len(),
            path.display()
        );
        Ok(())
    }
}
