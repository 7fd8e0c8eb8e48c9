//! Cache key definitions.
//!
//! A key names the endpoint plus its normalized parameters, so two requests
//! that ask for the same thing share one cached body.

use std::fmt;

use chrono::{DateTime, Utc};

/// Identifies a cacheable list response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CacheKey {
    /// GET /all
    AllEntries,
    /// GET /by_filters, bounds as UTC microseconds. An absent `end` means
    /// "now" at the time the body was computed.
    ByFilters { start: Option<i64>, end: Option<i64> },
}

impl CacheKey {
    pub fn by_filters(start: Option<DateTime<Utc>>, end: Option<DateTime<Utc>>) -> Self {
        Self::ByFilters {
            start: start.map(|dt| dt.timestamp_micros()),
            end: end.map(|dt| dt.timestamp_micros()),
        }
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AllEntries => write!(f, "entries:all"),
            Self::ByFilters { start, end } => {
                write!(f, "entries:by_filters:start=")?;
                match start {
                    Some(micros) => write!(f, "{micros}")?,
                    None => write!(f, "none")?,
                }
                write!(f, ";end=")?;
                match end {
                    Some(micros) => write!(f, "{micros}"),
                    None => write!(f, "now"),
                }
            }
        }
    }
}
