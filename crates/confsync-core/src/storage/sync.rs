//! Sync-directory configuration store
//!
//! Mirrors the active store on disk as pretty-printed JSON files. Default
//! collection entries sit at the root of the sync directory; a named
//! collection `c` keeps its entries under subdirectory `c/`. Dot-prefixed
//! files (the export manifest among them) are never treated as entries.

use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use super::{validate_collection_name, validate_entry_name, ConfigStorage, StorageError};
use crate::collection::DEFAULT_COLLECTION;

/// File extension for configuration entries
const ENTRY_EXT: &str = "json";

/// A sync directory of configuration entry files
pub struct SyncStore {
    root: PathBuf,
}

impl SyncStore {
    /// Create a store over a sync directory
    ///
    /// The directory does not have to exist yet; reads against a missing
    /// directory behave as an empty store.
    #[must_use]
    pub fn new(root: &Path) -> Self {
        Self {
            root: root.to_path_buf(),
        }
    }

    /// The sync directory root
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn collection_dir(&self, collection: &str) -> PathBuf {
        if collection == DEFAULT_COLLECTION {
            self.root.clone()
        } else {
            self.root.join(collection)
        }
    }

    fn entry_path(&self, collection: &str, name: &str) -> PathBuf {
        self.collection_dir(collection)
            .join(format!("{name}.{ENTRY_EXT}"))
    }

    fn io_err(path: &Path, e: &std::io::Error) -> StorageError {
        StorageError::Io {
            path: path.to_path_buf(),
            message: e.to_string(),
        }
    }
}

impl ConfigStorage for SyncStore {
    fn read(&self, collection: &str, name: &str) -> Result<Option<Value>, StorageError> {
        validate_collection_name(collection)?;
        validate_entry_name(name)?;

        let path = self.entry_path(collection, name);
        if !path.exists() {
            return Ok(None);
        }

        let content = fs::read_to_string(&path).map_err(|e| Self::io_err(&path, &e))?;
        let value = serde_json::from_str(&content).map_err(|e| StorageError::Json {
            context: path.display().to_string(),
            message: e.to_string(),
        })?;
        Ok(Some(value))
    }

    fn write(&self, collection: &str, name: &str, data: &Value) -> Result<(), StorageError> {
        validate_collection_name(collection)?;
        validate_entry_name(name)?;

        let dir = self.collection_dir(collection);
        fs::create_dir_all(&dir).map_err(|e| Self::io_err(&dir, &e))?;

        let path = self.entry_path(collection, name);
        let mut content = serde_json::to_string_pretty(data).map_err(|e| StorageError::Json {
            context: path.display().to_string(),
            message: e.to_string(),
        })?;
        content.push('\n');

        fs::write(&path, content).map_err(|e| Self::io_err(&path, &e))?;
        Ok(())
    }

    fn delete(&self, collection: &str, name: &str) -> Result<bool, StorageError> {
        validate_collection_name(collection)?;
        validate_entry_name(name)?;

        let path = self.entry_path(collection, name);
        if !path.exists() {
            return Ok(false);
        }
        fs::remove_file(&path).map_err(|e| Self::io_err(&path, &e))?;

        // Drop a named collection's directory once its last entry is gone
        if collection != DEFAULT_COLLECTION {
            let dir = self.collection_dir(collection);
            if let Ok(mut entries) = fs::read_dir(&dir) {
                if entries.next().is_none() {
                    fs::remove_dir(&dir).map_err(|e| Self::io_err(&dir, &e))?;
                }
            }
        }

        Ok(true)
    }

    fn list(&self, collection: &str) -> Result<Vec<String>, StorageError> {
        validate_collection_name(collection)?;

        let dir = self.collection_dir(collection);
        if !dir.is_dir() {
            return Ok(Vec::new());
        }

        let mut names = Vec::new();
        let entries = fs::read_dir(&dir).map_err(|e| Self::io_err(&dir, &e))?;
        for entry in entries {
            let entry = entry.map_err(|e| Self::io_err(&dir, &e))?;
            let path = entry.path();
            if !path.is_file() {
                continue;
            }
            if path.extension().and_then(|e| e.to_str()) != Some(ENTRY_EXT) {
                continue;
            }
            let Some(stem) = path.file_stem().and_then(|s| s.to_str()) else {
                continue;
            };
            if stem.starts_with('.') {
                continue;
            }
            names.push(stem.to_string());
        }

        names.sort();
        Ok(names)
    }

    fn collections(&self) -> Result<Vec<String>, StorageError> {
        if !self.root.is_dir() {
            return Ok(Vec::new());
        }

        let mut names = Vec::new();
        for entry in WalkDir::new(&self.root).min_depth(1).max_depth(1) {
            let entry = entry.map_err(|e| StorageError::Io {
                path: self.root.clone(),
                message: e.to_string(),
            })?;
            if !entry.file_type().is_dir() {
                continue;
            }
            let Some(name) = entry.file_name().to_str() else {
                continue;
            };
            if name.starts_with('.') {
                continue;
            }
            // Directories without entry files are not collections
            if !self.list(name)?.is_empty() {
                names.push(name.to_string());
            }
        }

        names.sort();
        Ok(names)
    }

    fn delete_collection(&self, collection: &str) -> Result<usize, StorageError> {
        let names = self.list(collection)?;
        let mut deleted = 0;
        for name in &names {
            if self.delete(collection, name)? {
                deleted += 1;
            }
        }
        Ok(deleted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;

    #[test]
    fn test_missing_directory_reads_as_empty() {
        let temp = TempDir::new().unwrap();
        let store = SyncStore::new(&temp.path().join("nope"));

        assert!(store.read("", "system.site").unwrap().is_none());
        assert!(store.list("").unwrap().is_empty());
        assert!(store.collections().unwrap().is_empty());
    }

    #[test]
    fn test_write_read_roundtrip() {
        let temp = TempDir::new().unwrap();
        let store = SyncStore::new(temp.path());

        let data = json!({"langcode": "en", "uuid": "b5e9a8c2"});
        store.write("", "system.site", &data).unwrap();
        store.write("staging", "system.site", &data).unwrap();

        assert_eq!(store.read("", "system.site").unwrap(), Some(data.clone()));
        assert_eq!(store.read("staging", "system.site").unwrap(), Some(data));
        assert!(temp.path().join("system.site.json").is_file());
        assert!(temp.path().join("staging/system.site.json").is_file());
    }

    #[test]
    fn test_list_skips_non_entries() {
        let temp = TempDir::new().unwrap();
        let store = SyncStore::new(temp.path());

        store.write("", "b", &json!(2)).unwrap();
        store.write("", "a", &json!(1)).unwrap();
        fs::write(temp.path().join(".confsync-manifest.json"), "{}").unwrap();
        fs::write(temp.path().join("README.md"), "notes").unwrap();

        assert_eq!(store.list("").unwrap(), vec!["a".to_string(), "b".to_string()]);
    }

    #[test]
    fn test_deleting_last_entry_removes_collection_dir() {
        let temp = TempDir::new().unwrap();
        let store = SyncStore::new(temp.path());

        store.write("staging", "only", &json!(1)).unwrap();
        assert_eq!(store.collections().unwrap(), vec!["staging".to_string()]);

        assert!(store.delete("staging", "only").unwrap());
        assert!(!temp.path().join("staging").exists());
        assert!(store.collections().unwrap().is_empty());
    }

    #[test]
    fn test_delete_collection_counts_entries() {
        let temp = TempDir::new().unwrap();
        let store = SyncStore::new(temp.path());

        store.write("language.fr", "a", &json!(1)).unwrap();
        store.write("language.fr", "b", &json!(2)).unwrap();

        assert_eq!(store.delete_collection("language.fr").unwrap(), 2);
        assert!(!temp.path().join("language.fr").exists());
    }

    #[test]
    fn test_rejects_path_traversal() {
        let temp = TempDir::new().unwrap();
        let store = SyncStore::new(temp.path());

        assert!(store.write("", "../escape", &json!(1)).is_err());
        assert!(store.read("..", "name").is_err());
    }
}
