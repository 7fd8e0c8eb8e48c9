//! Request DTOs for the entry API
//!
//! Defines the structure of incoming HTTP request bodies and query strings.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::Deserialize;
use uuid::Uuid;

/// Naive timestamp layouts accepted in query strings, read as UTC.
const NAIVE_DATETIME_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];

/// Request body for POST /new
#[derive(Debug, Clone, Deserialize)]
pub struct CreateEntryRequest {
    /// Text of the new entry
    pub text: String,
}

/// Entry object embedded in the update body.
///
/// The id in the body is accepted for compatibility but the id in the path
/// decides which row is updated.
#[derive(Debug, Clone, Deserialize)]
pub struct EntryPayload {
    #[serde(default)]
    pub uuid: Option<Uuid>,
    pub text: String,
}

/// Request body for PUT /update/:uuid
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateEntryRequest {
    pub entry: EntryPayload,
}

/// Query string for GET /entries/:count
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListParams {
    #[serde(default)]
    pub offset: Option<i64>,
}

impl ListParams {
    /// Returns the offset to apply, or a message if it is negative.
    pub fn offset(&self) -> Result<u64, String> {
        let offset = self.offset.unwrap_or(0);
        u64::try_from(offset).map_err(|_| format!("offset must be non-negative, got {offset}"))
    }
}

/// Query string for GET /by_filters
#[derive(Debug, Clone, Default, Deserialize)]
pub struct EntryFilterParams {
    #[serde(default)]
    pub start_datetime: Option<String>,
    #[serde(default)]
    pub end_datetime: Option<String>,
}

/// Parsed, not yet defaulted, bounds of a date filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub start: Option<DateTime<Utc>>,
    pub end: Option<DateTime<Utc>>,
}

impl EntryFilterParams {
    /// Parses both bounds. Empty values count as absent.
    pub fn parse(&self) -> Result<DateRange, String> {
        Ok(DateRange {
            start: parse_optional(self.start_datetime.as_deref(), "start_datetime")?,
            end: parse_optional(self.end_datetime.as_deref(), "end_datetime")?,
        })
    }
}

fn parse_optional(raw: Option<&str>, field: &str) -> Result<Option<DateTime<Utc>>, String> {
    match raw.map(str::trim) {
        None | Some("") => Ok(None),
        Some(value) => parse_timestamp(value)
            .map(Some)
            .ok_or_else(|| format!("{field} is not a valid datetime: {value}")),
    }
}

// == Timestamp Parsing ==
/// Parses an RFC 3339 timestamp, or a naive date/datetime taken as UTC.
pub fn parse_timestamp(value: &str) -> Option<DateTime<Utc>> {
    if let Ok(parsed) = DateTime::parse_from_rfc3339(value) {
        return Some(parsed.with_timezone(&Utc));
    }

    for format in NAIVE_DATETIME_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(value, format) {
            return Some(naive.and_utc());
        }
    }

    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}
