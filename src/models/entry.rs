//! Entry domain model
//!
//! The single persisted record type served by the API.

use chrono::{DateTime, Utc};
use uuid::Uuid;

// == Entry ==
/// A stored text record.
///
/// `uuid` and `creation_datetime` are fixed at creation; only `text`
/// changes afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    /// Primary key, generated when the entry is created
    pub uuid: Uuid,
    /// Free-form text
    pub text: String,
    /// Insertion time (UTC)
    pub creation_datetime: DateTime<Utc>,
}

impl Entry {
    // == Constructor ==
    /// Creates a new entry with a fresh v4 id stamped with the current time.
    pub fn new(text: impl Into<String>) -> Self {
        Self::with_timestamp(text, Utc::now())
    }

    /// Creates a new entry with a fresh v4 id and an explicit creation time.
    pub fn with_timestamp(text: impl Into<String>, creation_datetime: DateTime<Utc>) -> Self {
        Self {
            uuid: Uuid::new_v4(),
            text: text.into(),
            creation_datetime,
        }
    }
}
