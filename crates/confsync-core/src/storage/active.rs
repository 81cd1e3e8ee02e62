//! Active configuration store (SQLite)

use chrono::Utc;
use rusqlite::{params, Connection, OptionalExtension};
use serde_json::Value;

use super::{validate_collection_name, validate_entry_name, ConfigStorage, StorageError};
use crate::collection::DEFAULT_COLLECTION;

/// The live configuration, backed by SQLite
///
/// Entry data is stored as compact JSON text; `updated_at` is refreshed
/// on every write.
pub struct ActiveStore<'a> {
    conn: &'a Connection,
}

impl<'a> ActiveStore<'a> {
    /// Create a store over an open database connection
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    /// Whether an entry exists
    ///
    /// # Errors
    /// Returns an error if the query fails
    pub fn exists(&self, collection: &str, name: &str) -> Result<bool, StorageError> {
        let count: i64 = self.conn.query_row(
            r"
            SELECT COUNT(*) FROM config WHERE collection = ?1 AND name = ?2
            ",
            params![collection, name],
            |row| row.get(0),
        )?;
        Ok(count > 0)
    }
}

impl ConfigStorage for ActiveStore<'_> {
    fn read(&self, collection: &str, name: &str) -> Result<Option<Value>, StorageError> {
        let json: Option<String> = self
            .conn
            .query_row(
                r"
                SELECT data FROM config WHERE collection = ?1 AND name = ?2
                ",
                params![collection, name],
                |row| row.get(0),
            )
            .optional()?;

        match json {
            Some(json) => {
                let value = serde_json::from_str(&json).map_err(|e| StorageError::Json {
                    context: format!("entry '{name}' in collection '{collection}'"),
                    message: e.to_string(),
                })?;
                Ok(Some(value))
            }
            None => Ok(None),
        }
    }

    fn write(&self, collection: &str, name: &str, data: &Value) -> Result<(), StorageError> {
        validate_collection_name(collection)?;
        validate_entry_name(name)?;

        let json = serde_json::to_string(data).map_err(|e| StorageError::Json {
            context: format!("entry '{name}' in collection '{collection}'"),
            message: e.to_string(),
        })?;

        self.conn.execute(
            r"
            INSERT INTO config (collection, name, data, updated_at)
            VALUES (?1, ?2, ?3, ?4)
            ON CONFLICT (collection, name)
            DO UPDATE SET data = excluded.data, updated_at = excluded.updated_at
            ",
            params![collection, name, json, Utc::now().to_rfc3339()],
        )?;

        Ok(())
    }

    fn delete(&self, collection: &str, name: &str) -> Result<bool, StorageError> {
        let deleted = self.conn.execute(
            r"
            DELETE FROM config WHERE collection = ?1 AND name = ?2
            ",
            params![collection, name],
        )?;
        Ok(deleted > 0)
    }

    fn list(&self, collection: &str) -> Result<Vec<String>, StorageError> {
        let mut stmt = self.conn.prepare(
            r"
            SELECT name FROM config WHERE collection = ?1 ORDER BY name
            ",
        )?;

        let rows = stmt.query_map(params![collection], |row| row.get(0))?;
        let mut names = Vec::new();
        for row in rows {
            names.push(row?);
        }
        Ok(names)
    }

    fn collections(&self) -> Result<Vec<String>, StorageError> {
        let mut stmt = self.conn.prepare(
            r"
            SELECT DISTINCT collection FROM config
            WHERE collection != ?1
            ORDER BY collection
            ",
        )?;

        let rows = stmt.query_map(params![DEFAULT_COLLECTION], |row| row.get(0))?;
        let mut names = Vec::new();
        for row in rows {
            names.push(row?);
        }
        Ok(names)
    }

    fn delete_collection(&self, collection: &str) -> Result<usize, StorageError> {
        let deleted = self.conn.execute(
            r"
            DELETE FROM config WHERE collection = ?1
            ",
            params![collection],
        )?;
        Ok(deleted)
    }
}
