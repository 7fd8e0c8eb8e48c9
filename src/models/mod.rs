//! Domain model and DTOs for the entry API
//!
//! `Entry` is the persisted record; the request and response types define
//! the JSON bodies exchanged over HTTP.

pub mod entry;
pub mod requests;
pub mod responses;

// Re-export commonly used types
pub use entry::Entry;
pub use requests::{CreateEntryRequest, EntryFilterParams, EntryPayload, ListParams, UpdateEntryRequest};
pub use responses::{EntryView, ErrorResponse};
