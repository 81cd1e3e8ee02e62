//! Configuration storage backends
//!
//! Two backends share the [`ConfigStorage`] interface: the active store
//! (SQLite) holding the live configuration, and the sync store (a
//! directory of JSON files) that export and import mirror it against.

mod active;
mod db;
mod manifest;
mod migrations;
mod sync;

pub use active::ActiveStore;
pub use db::Database;
pub use manifest::SyncManifest;
pub use sync::SyncStore;

use serde_json::Value;
use std::path::PathBuf;
use thiserror::Error;

use crate::collection::DEFAULT_COLLECTION;

/// Errors from storage backends
#[derive(Error, Debug)]
pub enum StorageError {
    /// SQLite error
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    /// File I/O error
    #[error("I/O error for {path}: {message}")]
    Io { path: PathBuf, message: String },

    /// JSON (de)serialization error
    #[error("JSON error for {context}: {message}")]
    Json { context: String, message: String },

    /// Entry name unusable as an identifier or file name
    #[error("Invalid entry name: '{0}'")]
    InvalidName(String),

    /// Collection name unusable as an identifier or directory name
    #[error("Invalid collection name: '{0}'")]
    InvalidCollection(String),
}

/// Read/write access to named configuration entries grouped in collections
///
/// Entries are identified by `(collection, name)`; the default collection
/// is the empty string. Implementations must report collection names
/// exactly as stored so callers can apply exclusion filtering to them.
pub trait ConfigStorage {
    /// Read an entry, `None` if absent
    fn read(&self, collection: &str, name: &str) -> Result<Option<Value>, StorageError>;

    /// Create or overwrite an entry
    fn write(&self, collection: &str, name: &str, data: &Value) -> Result<(), StorageError>;

    /// Delete an entry, returning whether it existed
    fn delete(&self, collection: &str, name: &str) -> Result<bool, StorageError>;

    /// Entry names in a collection, sorted
    fn list(&self, collection: &str) -> Result<Vec<String>, StorageError>;

    /// Named collections present (the default collection is not listed), sorted
    fn collections(&self) -> Result<Vec<String>, StorageError>;

    /// Delete every entry in a collection, returning the number removed
    fn delete_collection(&self, collection: &str) -> Result<usize, StorageError>;
}

/// Validate an entry name for storage and file-system use
///
/// # Errors
/// Returns an error if the name is empty or unsafe in a file path.
pub fn validate_entry_name(name: &str) -> Result<(), StorageError> {
    if name.is_empty()
        || name.contains('/')
        || name.contains('\\')
        || name.contains("..")
        || name.contains('\0')
        || name.starts_with('.')
    {
        return Err(StorageError::InvalidName(name.to_string()));
    }
    Ok(())
}

/// Validate a collection name for storage and file-system use
///
/// The default collection (empty string) is always valid.
///
/// # Errors
/// Returns an error if the name is unsafe in a file path.
pub fn validate_collection_name(collection: &str) -> Result<(), StorageError> {
    if collection == DEFAULT_COLLECTION {
        return Ok(());
    }
    if collection.contains('/')
        || collection.contains('\\')
        || collection.contains("..")
        || collection.contains('\0')
        || collection.starts_with('.')
    {
        return Err(StorageError::InvalidCollection(collection.to_string()));
    }
    Ok(())
}
