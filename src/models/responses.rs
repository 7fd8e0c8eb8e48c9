//! Response DTOs for the entry API
//!
//! Defines the structure of outgoing HTTP response bodies.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::Entry;

/// Public view of an entry: id and text.
///
/// Also deserializable so the load generator can read list responses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntryView {
    pub uuid: Uuid,
    pub text: String,
}

impl From<Entry> for EntryView {
    fn from(entry: Entry) -> Self {
        Self {
            uuid: entry.uuid,
            text: entry.text,
        }
    }
}

/// Error response body for all error conditions
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    /// Error message describing what went wrong
    pub error: String,
}

impl ErrorResponse {
    /// Creates a new ErrorResponse
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entry_view_hides_timestamp() {
        let entry = Entry::new("visible");
        let id = entry.uuid;
        let json = serde_json::to_value(EntryView::from(entry)).unwrap();
        assert_eq!(json["uuid"], id.to_string());
        assert_eq!(json["text"], "visible");
        assert!(json.get("creation_datetime").is_none());
    }

    #[test]
    fn test_error_response_serialize() {
        let resp = ErrorResponse::new("Something went wrong");
        let json = serde_json::to_string(&resp).unwrap();
        assert!(json.contains("error"));
        assert!(json.contains("Something went wrong"));
    }
}
