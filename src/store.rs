//! Local key-value store adapter.
//!
//! Each key maps to a single JSON document holding a whole collection.
//! Reads parse the document into typed records; writes serialize the whole
//! collection and fully overwrite the key. There is no per-record
//! granularity and no merge semantics.
use std::{
    fs,
    io::Write,
    path::PathBuf,
};

use log::{debug, error, trace, warn};
use serde::{de::DeserializeOwned, Serialize};
use tempfile::NamedTempFile;

use crate::{CaptureError, Result};

/// Handle to a string-keyed local store backed by one JSON file per key.
///
/// A disconnected handle has no backing directory: every key reads as
/// absent and writes are silently dropped.
#[derive(Debug, Clone)]
pub struct LocalStore {
    root: Option<PathBuf>,
}

impl LocalStore {
    /// Opens a store rooted at the given directory, creating it if needed.
    pub fn open(root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();

        if !root.exists() {
            debug!(
                "Store directory does not exist, creating: {}",
                root.display()
            );
            fs::create_dir_all(&root).map_err(|e| {
                error!("Failed to create store directory: {}", e);
                CaptureError::DirectoryError { path: root.clone() }
            })?;
        }

        Ok(Self { root: Some(root) })
    }

    /// A store with no backing directory.
    pub fn disconnected() -> Self {
        Self { root: None }
    }

    fn key_path(&self, key: &str) -> Option<PathBuf> {
        self.root
            .as_ref()
            .map(|root| root.join(format!("{}.json", key)))
    }

    /// Reads the collection stored under `key`.
    ///
    /// Returns `None` when the key is absent. A document that no longer
    /// parses yields an empty collection rather than an error.
    pub fn read<T: DeserializeOwned>(&self, key: &str) -> Result<Option<Vec<T>>> {
        let path = match self.key_path(key) {
            Some(path) => path,
            None => {
                debug!("Store is disconnected, reading {} as absent", key);
                return Ok(None);
            }
        };

        if !path.exists() {
            debug!("No document for key: {}", key);
            return Ok(None);
        }

        trace!("Reading document: {}", path.display());
        let text = fs::read_to_string(&path).map_err(|e| {
            error!("Failed to read document {}: {}", path.display(), e);
            CaptureError::Io(e)
        })?;

        match serde_json::from_str(&text) {
            Ok(records) => Ok(Some(records)),
            Err(e) => {
                warn!("Discarding unparsable document for key {}: {}", key, e);
                Ok(Some(Vec::new()))
            }
        }
    }

    /// Writes the full collection under `key`, replacing any prior value.
    ///
    /// The document goes to a temporary file in the store directory first
    /// and is atomically moved into place, so the prior value survives a
    /// failure partway through.
    pub fn write<T: Serialize>(&self, key: &str, records: &[T]) -> Result<()> {
        let (root, path) = match (&self.root, self.key_path(key)) {
            (Some(root), Some(path)) => (root.clone(), path),
            _ => {
                debug!("Store is disconnected, dropping write of {}", key);
                return Ok(());
            }
        };

        let mut temp_file = NamedTempFile::new_in(&root).map_err(|e| {
            error!("Failed to create temporary file: {}", e);
            CaptureError::Io(e)
        })?;

        let json = serde_json::to_string_pretty(records).map_err(|e| {
            error!("Failed to serialize records for key {}: {}", key, e);
            CaptureError::Serialization(e)
        })?;

        temp_file.write_all(json.as_bytes()).map_err(|e| {
            error!("Failed to write to temporary file: {}", e);
            CaptureError::Io(e)
        })?;

        temp_file.flush().map_err(|e| {
            error!("Failed to flush temporary file: {}", e);
            CaptureError::Io(e)
        })?;

        temp_file.persist(&path).map_err(|e| {
            error!(
                "Failed to persist document {}: {}",
                path.display(),
                e.error
            );
            CaptureError::Io(e.error)
        })?;

        trace!("Wrote {} record(s) under key: {}", records.len(), key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use tempfile::tempdir;

    use super::*;

    #[test]
    fn absent_key_reads_as_none() {
        let dir = tempdir().unwrap();
        let store = LocalStore::open(dir.path()).unwrap();

        let records = store.read::<String>("missing").unwrap();
        assert!(records.is_none());
    }

    #[test]
    fn write_then_read_round_trips() {
        let dir = tempdir().unwrap();
        let store = LocalStore::open(dir.path()).unwrap();

        let records = vec!["alpha".to_string(), "beta".to_string()];
        store.write("things", &records).unwrap();

        let read_back = store.read::<String>("things").unwrap();
        assert_eq!(read_back, Some(records));
    }

    #[test]
    fn write_replaces_the_prior_value() {
        let dir = tempdir().unwrap();
        let store = LocalStore::open(dir.path()).unwrap();

        store
            .write("things", &["a".to_string(), "b".to_string(), "c".to_string()])
            .unwrap();
        store.write("things", &["only".to_string()]).unwrap();

        let read_back = store.read::<String>("things").unwrap();
        assert_eq!(read_back, Some(vec!["only".to_string()]));
    }

    #[test]
    fn unparsable_document_reads_as_empty() {
        let dir = tempdir().unwrap();
        let store = LocalStore::open(dir.path()).unwrap();

        std::fs::write(dir.path().join("things.json"), "{ not valid json").unwrap();

        let read_back = store.read::<String>("things").unwrap();
        assert_eq!(read_back, Some(Vec::new()));
    }

    #[test]
    fn disconnected_store_reads_absent_and_drops_writes() {
        let store = LocalStore::disconnected();

        store.write("things", &["lost".to_string()]).unwrap();
        assert!(store.read::<String>("things").unwrap().is_none());
    }
}
