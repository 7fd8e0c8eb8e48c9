//! Connection bootstrap for the entry database.
//!
//! Opens file or in-memory SQLite connections and makes sure the `entries`
//! table exists before handing the store out.

use std::path::Path;
use std::time::Instant;

use rusqlite::Connection;
use tracing::{error, info};

use super::{SqliteEntryStore, StoreResult};

const SCHEMA_SQL: &str = "
CREATE TABLE IF NOT EXISTS entries (
    uuid TEXT PRIMARY KEY NOT NULL,
    text TEXT NOT NULL,
    creation_datetime INTEGER NOT NULL
);
CREATE INDEX IF NOT EXISTS idx_entries_creation_datetime
    ON entries (creation_datetime);
";

/// Opens (or creates) a SQLite database file and returns a ready store.
pub fn open(path: impl AsRef<Path>) -> StoreResult<SqliteEntryStore> {
    bootstrap("file", || Connection::open(path))
}

/// Opens a private in-memory database and returns a ready store.
pub fn open_in_memory() -> StoreResult<SqliteEntryStore> {
    bootstrap("memory", Connection::open_in_memory)
}

fn bootstrap(
    mode: &'static str,
    connect: impl FnOnce() -> rusqlite::Result<Connection>,
) -> StoreResult<SqliteEntryStore> {
    let started_at = Instant::now();
    info!(event = "db_open", mode, status = "start");

    let result = connect().and_then(|conn| {
        conn.execute_batch(SCHEMA_SQL)?;
        Ok(conn)
    });

    match result {
        Ok(conn) => {
            info!(
                event = "db_open",
                mode,
                status = "ok",
                duration_ms = started_at.elapsed().as_millis() as u64
            );
            Ok(SqliteEntryStore::new(conn))
        }
        Err(err) => {
            error!(
                event = "db_open",
                mode,
                status = "error",
                duration_ms = started_at.elapsed().as_millis() as u64,
                error = %err
            );
            Err(err.into())
        }
    }
}
