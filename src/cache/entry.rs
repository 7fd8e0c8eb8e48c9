//! Cached Response Module
//!
//! A serialized response body together with its expiry deadline.

use std::time::{Duration, Instant};

// == Cached Response ==
/// A response body held in the cache until its TTL elapses.
#[derive(Debug, Clone)]
pub struct CachedResponse {
    /// Serialized JSON body
    pub body: String,
    /// Deadline after which the body is stale
    pub expires_at: Instant,
}

impl CachedResponse {
    // == Constructor ==
    /// Wraps a body that stays fresh for `ttl`.
    pub fn new(body: String, ttl: Duration) -> Self {
        Self {
            body,
            expires_at: Instant::now() + ttl,
        }
    }

    // == Is Expired ==
    /// Checks if the body has expired.
    ///
    /// Boundary condition: the body is expired as soon as the current instant
    /// reaches the deadline, so a zero TTL is never served.
    pub fn is_expired(&self) -> bool {
        Instant::now() >= self.expires_at
    }

    // == Time To Live ==
    /// Remaining freshness, zero once expired.
    pub fn ttl_remaining(&self) -> Duration {
        self.expires_at.saturating_duration_since(Instant::now())
    }
}
