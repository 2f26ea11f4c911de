//! File-backed store: one JSON object of string keys to string values.
//!
//! The file is re-read on every call and rewritten through a temporary file
//! plus rename, so a crash mid-write leaves the previous document intact.

use std::collections::BTreeMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use super::{DEFAULT_QUOTA_BYTES, StorageBackend, StorageError};

type Document = BTreeMap<String, String>;

/// Persistent store at a single file path.
#[derive(Debug, Clone)]
pub struct FileBackend {
    path: PathBuf,
    quota: usize,
}

impl FileBackend {
    /// Store at `path` with the default quota. The file is created lazily.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self::with_quota(path, DEFAULT_QUOTA_BYTES)
    }

    /// Store at `path` limited to `quota` bytes of keys and values.
    #[must_use]
    pub fn with_quota(path: impl Into<PathBuf>, quota: usize) -> Self {
        Self {
            path: path.into(),
            quota,
        }
    }

    /// Path of the backing file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> Result<Document, StorageError> {
        match fs::read_to_string(&self.path) {
            Ok(contents) if contents.trim().is_empty() => Ok(Document::new()),
            Ok(contents) => Ok(serde_json::from_str(&contents)?),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(Document::new()),
            Err(e) => Err(e.into()),
        }
    }

    fn save(&self, document: &Document) -> Result<(), StorageError> {
        match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => fs::create_dir_all(parent)?,
            _ => {}
        }

        let contents = serde_json::to_string_pretty(document)?;
        let tmp = self.path.with_extension("tmp");
        fs::write(&tmp, contents)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

impl StorageBackend for FileBackend {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.load()?.remove(key))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut document = self.load()?;
        document.insert(key.to_owned(), value.to_owned());

        let needed: usize = document.iter().map(|(k, v)| k.len() + v.len()).sum();
        if needed > self.quota {
            return Err(StorageError::QuotaExceeded {
                key: key.to_owned(),
                needed,
                limit: self.quota,
            });
        }

        self.save(&document)
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        let mut document = self.load()?;
        if document.remove(key).is_some() {
            self.save(&document)?;
        }
        Ok(())
    }
}
