//! Entry Store
//!
//! SQLite persistence for entries behind the `EntryStore` trait.

mod entry_store;
mod open;

pub use entry_store::{EntryStore, SqliteEntryStore};
pub use open::{open, open_in_memory};

use thiserror::Error;

// == Store Error Enum ==
/// Errors raised by the persistence layer.
#[derive(Error, Debug)]
pub enum StoreError {
    /// Underlying SQLite failure
    #[error("database error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    /// A persisted row could not be decoded
    #[error("invalid persisted entry: {0}")]
    InvalidData(String),

    /// Another thread panicked while holding the connection
    #[error("database connection lock poisoned")]
    LockPoisoned,
}

/// Convenience Result type for store operations.
pub type StoreResult<T> = std::result::Result<T, StoreError>;
