//! Response Cache Module
//!
//! In-memory, time-expiring cache for the list endpoints.

mod entry;
mod keys;
mod stats;
mod store;


// Re-export public types
pub use entry::CachedResponse;
pub use keys::CacheKey;
pub use stats::CacheStats;
pub use store::ResponseCache;

// == Public Constants ==
/// Default freshness window for cached list responses, in seconds
pub const DEFAULT_TTL_SECS: u64 = 30;
