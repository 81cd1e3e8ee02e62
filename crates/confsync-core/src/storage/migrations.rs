//! Database migrations

use rusqlite::Connection;

use super::StorageError;

const CURRENT_VERSION: i32 = 1;

/// Run all pending migrations
///
/// # Errors
/// Returns an error if migrations fail
pub fn run_migrations(conn: &Connection) -> Result<(), StorageError> {
    let version: i32 = conn.pragma_query_value(None, "user_version", |row| row.get(0))?;

    if version < 1 {
        migrate_v1(conn)?;
    }

    conn.pragma_update(None, "user_version", CURRENT_VERSION)?;
    Ok(())
}

fn migrate_v1(conn: &Connection) -> Result<(), StorageError> {
    conn.execute_batch(
        r"
        -- Configuration entries
        -- The default collection is stored as the empty string
        CREATE TABLE IF NOT EXISTS config (
            collection TEXT NOT NULL,
            name TEXT NOT NULL,
            data TEXT NOT NULL,
            updated_at TEXT NOT NULL,
            PRIMARY KEY (collection, name)
        );

        CREATE INDEX IF NOT EXISTS idx_config_collection ON config(collection);
        ",
    )?;

    Ok(())
}
