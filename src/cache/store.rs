//! Response Cache Module
//!
//! HashMap-backed storage of serialized list responses with a fixed TTL.

use std::collections::HashMap;
use std::time::Duration;

use tracing::trace;

use crate::cache::{CacheKey, CacheStats, CachedResponse};

// == Response Cache ==
/// Time-expiring cache of response bodies.
///
/// Writes to the entry store never invalidate it; a body is served until
/// its TTL elapses.
#[derive(Debug)]
pub struct ResponseCache {
    /// Cached bodies by key
    entries: HashMap<CacheKey, CachedResponse>,
    /// Performance statistics
    stats: CacheStats,
    /// Freshness window applied to every stored body
    ttl: Duration,
}

impl ResponseCache {
    // == Constructor ==
    /// Creates an empty cache whose bodies expire after `ttl`.
    pub fn new(ttl: Duration) -> Self {
        Self {
            entries: HashMap::new(),
            stats: CacheStats::new(),
            ttl,
        }
    }

    // == Get ==
    /// Returns the cached body for `key` if present and fresh.
    ///
    /// An expired body is dropped and the lookup counts as a miss.
    pub fn get(&mut self, key: &CacheKey) -> Option<String> {
        let expired = match self.entries.get(key) {
            Some(cached) if !cached.is_expired() => {
                let body = cached.body.clone();
                trace!(
                    key = %key,
                    ttl_remaining_ms = cached.ttl_remaining().as_millis() as u64,
                    "Cache hit"
                );
                self.stats.record_hit();
                return Some(body);
            }
            Some(_) => true,
            None => false,
        };

        if expired {
            self.entries.remove(key);
            self.stats.record_expirations(1);
            self.stats.set_total_entries(self.entries.len());
        }
        self.stats.record_miss();
        None
    }

    // == Put ==
    /// Stores `body` under `key`, replacing any previous body and resetting its TTL.
    pub fn put(&mut self, key: CacheKey, body: String) {
        self.entries.insert(key, CachedResponse::new(body, self.ttl));
        self.stats.set_total_entries(self.entries.len());
    }

    // == Stats ==
    /// Returns current cache statistics.
    pub fn stats(&self) -> CacheStats {
        let mut stats = self.stats.clone();
        stats.set_total_entries(self.entries.len());
        stats
    }

    // == Cleanup Expired ==
    /// Removes all expired bodies. Returns the number removed.
    pub fn cleanup_expired(&mut self) -> usize {
        let before = self.entries.len();
        self.entries.retain(|_, cached| !cached.is_expired());
        let removed = before - self.entries.len();

        self.stats.record_expirations(removed);
        self.stats.set_total_entries(self.entries.len());
        removed
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
