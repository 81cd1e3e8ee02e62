//! Export manifest
//!
//! Each export writes a manifest at the sync-directory root recording when
//! the export ran and a SHA-256 digest per exported entry. The manifest is
//! informational; import never requires it.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sha2::{Digest, Sha256};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use super::StorageError;
use crate::collection::DEFAULT_COLLECTION;

/// Manifest file name, dot-prefixed so it is never read as an entry
pub const MANIFEST_FILE: &str = ".confsync-manifest.json";

/// Digest record of one export
#[derive(Debug, Serialize, Deserialize)]
pub struct SyncManifest {
    /// When the export ran
    pub exported_at: DateTime<Utc>,
    /// Entry key (`collection/name`, or bare `name` for the default
    /// collection) to SHA-256 digest of the entry's pretty JSON
    pub entries: BTreeMap<String, String>,
}

impl SyncManifest {
    /// Create an empty manifest stamped with the current time
    #[must_use]
    pub fn new() -> Self {
        Self {
            exported_at: Utc::now(),
            entries: BTreeMap::new(),
        }
    }

    /// Record an exported entry
    pub fn record(&mut self, collection: &str, name: &str, data: &Value) {
        self.entries
            .insert(Self::key(collection, name), Self::digest(data));
    }

    /// Write the manifest to the sync-directory root
    ///
    /// # Errors
    /// Returns an error if the manifest cannot be serialized or written
    pub fn write(&self, root: &Path) -> Result<(), StorageError> {
        fs::create_dir_all(root).map_err(|e| StorageError::Io {
            path: root.to_path_buf(),
            message: e.to_string(),
        })?;
        let path = root.join(MANIFEST_FILE);
        let json = serde_json::to_string_pretty(self).map_err(|e| StorageError::Json {
            context: path.display().to_string(),
            message: e.to_string(),
        })?;
        fs::write(&path, json).map_err(|e| StorageError::Io {
            path,
            message: e.to_string(),
        })?;
        Ok(())
    }

    /// Load the manifest from a sync directory, `None` if absent
    ///
    /// # Errors
    /// Returns an error if the manifest exists but cannot be read or parsed
    pub fn load(root: &Path) -> Result<Option<Self>, StorageError> {
        let path = root.join(MANIFEST_FILE);
        if !path.exists() {
            return Ok(None);
        }
        let content = fs::read_to_string(&path).map_err(|e| StorageError::Io {
            path: path.clone(),
            message: e.to_string(),
        })?;
        let manifest = serde_json::from_str(&content).map_err(|e| StorageError::Json {
            context: path.display().to_string(),
            message: e.to_string(),
        })?;
        Ok(Some(manifest))
    }

    /// Manifest key for an entry
    #[must_use]
    pub fn key(collection: &str, name: &str) -> String {
        if collection == DEFAULT_COLLECTION {
            name.to_string()
        } else {
            format!("{collection}/{name}")
        }
    }

    /// SHA-256 digest of an entry's pretty-printed JSON
    #[must_use]
    pub fn digest(data: &Value) -> String {
        let pretty = serde_json::to_string_pretty(data).unwrap_or_default();
        let mut hasher = Sha256::new();
        hasher.update(pretty.as_bytes());
        hex::encode(hasher.finalize())
    }
}

impl Default for SyncManifest {
    fn default() -> Self {
        Self::new()
    }
}
