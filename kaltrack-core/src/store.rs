//! Document store for persisting the tracker document to disk.
//!
//! The store owns the single JSON data file and keeps it well-formed: a
//! missing file is initialized, unparseable content is replaced with the
//! default document, and shape-invalid fields are repaired on load. Writes
//! go to a temporary sibling file first and are renamed into place, so a
//! crash mid-write never leaves a half-written primary file.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::models::Document;

/// Storage for the tracker document.
///
/// The two public operations, [`load`](DocumentStore::load) and
/// [`save`](DocumentStore::save), never let a filesystem or parse error
/// escape: `load` always returns a usable document and `save` reports
/// failure as `false`, with detail sent to diagnostic logging.
#[derive(Debug, Clone)]
pub struct DocumentStore {
    path: PathBuf,
}

impl DocumentStore {
    /// Creates a store backed by the given data file path.
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Returns the data file path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Checks if the data file exists on disk.
    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    /// Loads the document, repairing or resetting the file as needed.
    ///
    /// Missing file: a default document is written and returned. Unparseable
    /// content: treated as corruption, the file is overwritten with the
    /// default document. Parseable content with invalid fields: each
    /// offending field is coerced to its default and the corrected document
    /// is written back. Any I/O failure falls back to the default document.
    pub fn load(&self) -> Document {
        match self.read_document() {
            Ok(LoadOutcome::Valid(doc)) => doc,
            Ok(LoadOutcome::Missing) => {
                debug!(path = %self.path.display(), "data file not found, initializing");
                let doc = Document::default();
                self.persist_silently(&doc);
                doc
            }
            Ok(LoadOutcome::Corrupt) => {
                warn!(path = %self.path.display(), "data file corrupt, resetting to defaults");
                let doc = Document::default();
                self.persist_silently(&doc);
                doc
            }
            Ok(LoadOutcome::Repaired(doc)) => {
                warn!(path = %self.path.display(), "repaired invalid fields in data file");
                self.persist_silently(&doc);
                doc
            }
            Err(e) => {
                warn!(error = %e, "failed to read data file, falling back to defaults");
                Document::default()
            }
        }
    }

    /// Persists the document. Returns whether the whole operation succeeded;
    /// on failure the previous file contents are untouched.
    pub fn save(&self, document: &Document) -> bool {
        match self.write_document(document) {
            Ok(()) => {
                debug!(path = %self.path.display(), "document saved");
                true
            }
            Err(e) => {
                warn!(error = %e, "failed to save document");
                false
            }
        }
    }

    fn read_document(&self) -> Result<LoadOutcome, StorageError> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(LoadOutcome::Missing),
            Err(e) => return Err(StorageError::Io(self.path.clone(), e)),
        };

        let value: serde_json::Value = match serde_json::from_str(&content) {
            Ok(value) => value,
            Err(_) => return Ok(LoadOutcome::Corrupt),
        };

        let (mut doc, repaired) = Document::from_json_value(value);
        let sanitized = doc.sanitize();
        if repaired || sanitized {
            Ok(LoadOutcome::Repaired(doc))
        } else {
            Ok(LoadOutcome::Valid(doc))
        }
    }

    fn write_document(&self, document: &Document) -> Result<(), StorageError> {
        if let Some(dir) = self.path.parent() {
            if !dir.as_os_str().is_empty() {
                fs::create_dir_all(dir).map_err(|e| StorageError::Io(dir.to_path_buf(), e))?;
            }
        }

        let json = serde_json::to_string_pretty(document)
            .map_err(|e| StorageError::Serialize(self.path.clone(), e))?;

        // Write-temp-then-rename: the primary file only ever changes via the
        // atomic rename, never a partial write.
        let tmp = self.temp_path();
        fs::write(&tmp, json).map_err(|e| StorageError::Io(tmp.clone(), e))?;
        fs::rename(&tmp, &self.path).map_err(|e| StorageError::Io(self.path.clone(), e))?;

        Ok(())
    }

    fn temp_path(&self) -> PathBuf {
        let mut os = self.path.as_os_str().to_os_string();
        os.push(".tmp");
        PathBuf::from(os)
    }

    fn persist_silently(&self, document: &Document) {
        if let Err(e) = self.write_document(document) {
            warn!(error = %e, "failed to persist document during load");
        }
    }
}

enum LoadOutcome {
    Valid(Document),
    Missing,
    Corrupt,
    Repaired(Document),
}

/// Errors that can occur inside the store. These never cross the store's
/// public boundary; they exist for diagnostics.
#[derive(Debug)]
pub enum StorageError {
    /// I/O error reading or writing a file.
    Io(PathBuf, io::Error),
    /// Error serializing the document.
    Serialize(PathBuf, serde_json::Error),
}

impl std::fmt::Display for StorageError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StorageError::Io(path, e) => {
                write!(f, "I/O error for {}: {}", path.display(), e)
            }
            StorageError::Serialize(path, e) => {
                write!(f, "Failed to serialize document {}: {}", path.display(), e)
            }
        }
    }
}

impl std::error::Error for StorageError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            StorageError::Io(_, e) => Some(e),
            StorageError::Serialize(_, e) => Some(e),
        }
    }
}
