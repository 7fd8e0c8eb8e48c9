//! Entry repository contract and its SQLite implementation.
//!
//! Every operation is a single SQL statement, so each call is atomic on its
//! own. Listings follow insertion order (`rowid`).

use std::sync::{Mutex, MutexGuard};

use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, Params, Row};
use uuid::Uuid;

use super::{StoreError, StoreResult};
use crate::models::Entry;

const ENTRY_SELECT_SQL: &str = "SELECT uuid, text, creation_datetime FROM entries";

// == Entry Store Trait ==
/// Data-access interface over the entries table.
pub trait EntryStore: Send + Sync {
    /// Inserts a new entry. Fails if the id already exists.
    fn insert(&self, entry: &Entry) -> StoreResult<()>;

    /// Point lookup by id.
    fn get(&self, id: Uuid) -> StoreResult<Option<Entry>>;

    /// Every entry, in insertion order.
    fn list_all(&self) -> StoreResult<Vec<Entry>>;

    /// Up to `limit` entries starting at `offset`, in insertion order.
    fn list(&self, limit: u64, offset: u64) -> StoreResult<Vec<Entry>>;

    /// Entries created at or before `end`, and at or after `start` when given.
    fn list_created_between(
        &self,
        start: Option<DateTime<Utc>>,
        end: DateTime<Utc>,
    ) -> StoreResult<Vec<Entry>>;

    /// Replaces the text of an entry. Returns the number of rows changed.
    fn update_text(&self, id: Uuid, text: &str) -> StoreResult<usize>;

    /// Removes an entry. Returns the number of rows removed.
    fn delete(&self, id: Uuid) -> StoreResult<usize>;
}

// == SQLite Entry Store ==
/// SQLite-backed entry store sharing one connection behind a mutex.
#[derive(Debug)]
pub struct SqliteEntryStore {
    conn: Mutex<Connection>,
}

impl SqliteEntryStore {
    /// Wraps a connection whose schema is already in place.
    pub fn new(conn: Connection) -> Self {
        Self {
            conn: Mutex::new(conn),
        }
    }

    fn conn(&self) -> StoreResult<MutexGuard<'_, Connection>> {
        self.conn.lock().map_err(|_| StoreError::LockPoisoned)
    }

    fn query_entries<P: Params>(&self, sql: &str, params: P) -> StoreResult<Vec<Entry>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(sql)?;
        let rows = stmt.query_map(params, read_row)?;

        let mut entries = Vec::new();
        for row in rows {
            entries.push(decode_row(row?)?);
        }
        Ok(entries)
    }
}

impl EntryStore for SqliteEntryStore {
    fn insert(&self, entry: &Entry) -> StoreResult<()> {
        self.conn()?.execute(
            "INSERT INTO entries (uuid, text, creation_datetime) VALUES (?1, ?2, ?3)",
            params![
                entry.uuid.to_string(),
                entry.text,
                entry.creation_datetime.timestamp_micros()
            ],
        )?;
        Ok(())
    }

    fn get(&self, id: Uuid) -> StoreResult<Option<Entry>> {
        let sql = format!("{ENTRY_SELECT_SQL} WHERE uuid = ?1");
        let mut entries = self.query_entries(&sql, params![id.to_string()])?;
        Ok(entries.pop())
    }

    fn list_all(&self) -> StoreResult<Vec<Entry>> {
        let sql = format!("{ENTRY_SELECT_SQL} ORDER BY rowid");
        self.query_entries(&sql, params![])
    }

    fn list(&self, limit: u64, offset: u64) -> StoreResult<Vec<Entry>> {
        let sql = format!("{ENTRY_SELECT_SQL} ORDER BY rowid LIMIT ?1 OFFSET ?2");
        self.query_entries(&sql, params![clamp_i64(limit), clamp_i64(offset)])
    }

    fn list_created_between(
        &self,
        start: Option<DateTime<Utc>>,
        end: DateTime<Utc>,
    ) -> StoreResult<Vec<Entry>> {
        let end = end.timestamp_micros();
        match start {
            None => {
                let sql = format!("{ENTRY_SELECT_SQL} WHERE creation_datetime <= ?1 ORDER BY rowid");
                self.query_entries(&sql, params![end])
            }
            Some(start) => {
                let sql = format!(
                    "{ENTRY_SELECT_SQL} WHERE creation_datetime <= ?1 AND creation_datetime >= ?2 ORDER BY rowid"
                );
                self.query_entries(&sql, params![end, start.timestamp_micros()])
            }
        }
    }

    fn update_text(&self, id: Uuid, text: &str) -> StoreResult<usize> {
        let changed = self.conn()?.execute(
            "UPDATE entries SET text = ?1 WHERE uuid = ?2",
            params![text, id.to_string()],
        )?;
        Ok(changed)
    }

    fn delete(&self, id: Uuid) -> StoreResult<usize> {
        let removed = self
            .conn()?
            .execute("DELETE FROM entries WHERE uuid = ?1", params![id.to_string()])?;
        Ok(removed)
    }
}

// == Row Decoding ==
type RawEntry = (String, String, i64);

fn read_row(row: &Row<'_>) -> rusqlite::Result<RawEntry> {
    Ok((row.get(0)?, row.get(1)?, row.get(2)?))
}

fn decode_row((uuid, text, micros): RawEntry) -> StoreResult<Entry> {
    let uuid = Uuid::parse_str(&uuid)
        .map_err(|err| StoreError::InvalidData(format!("uuid `{uuid}`: {err}")))?;
    let creation_datetime = DateTime::from_timestamp_micros(micros)
        .ok_or_else(|| StoreError::InvalidData(format!("creation_datetime `{micros}`")))?;

    Ok(Entry {
        uuid,
        text,
        creation_datetime,
    })
}

/// SQLite integers are signed; very large limits behave as "no limit".
fn clamp_i64(value: u64) -> i64 {
    i64::try_from(value).unwrap_or(i64::MAX)
}
