//! Configuration Module
//!
//! Handles loading server and load-generator configuration from environment
//! variables.

use std::env;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use crate::cache::DEFAULT_TTL_SECS;

/// Reads `name` from the environment, falling back to `default` when the
/// variable is unset or does not parse.
fn env_or<T: FromStr>(name: &str, default: T) -> T {
    env::var(name)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

/// Server configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// Interface to bind
    pub server_host: String,
    /// HTTP server port
    pub server_port: u16,
    /// SQLite database file
    pub database_path: PathBuf,
    /// Freshness window for cached list responses, in seconds
    pub cache_ttl: u64,
    /// Background cache sweep interval in seconds
    pub cache_cleanup_interval: u64,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `SERVER_HOST` - Bind address (default: 0.0.0.0)
    /// - `SERVER_PORT` - HTTP server port (default: 8000)
    /// - `DATABASE_PATH` - SQLite file (default: entries.db)
    /// - `CACHE_TTL` - Cached response lifetime in seconds (default: 30)
    /// - `CACHE_CLEANUP_INTERVAL` - Sweep frequency in seconds (default: 60)
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            server_host: env_or("SERVER_HOST", defaults.server_host),
            server_port: env_or("SERVER_PORT", defaults.server_port),
            database_path: env_or("DATABASE_PATH", defaults.database_path),
            cache_ttl: env_or("CACHE_TTL", defaults.cache_ttl),
            cache_cleanup_interval: env_or(
                "CACHE_CLEANUP_INTERVAL",
                defaults.cache_cleanup_interval,
            ),
        }
    }

    /// Address string for the listener, e.g. `0.0.0.0:8000`.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server_host, self.server_port)
    }

    pub fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache_ttl)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_host: "0.0.0.0".to_string(),
            server_port: 8000,
            database_path: PathBuf::from("entries.db"),
            cache_ttl: DEFAULT_TTL_SECS,
            cache_cleanup_interval: 60,
        }
    }
}

/// Load generator configuration.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL of the entry server
    pub base_url: String,
    /// Smallest batch the producer creates at once
    pub min_new_entries: usize,
    /// Largest batch the producer creates at once
    pub max_new_entries: usize,
    /// Length of each generated text
    pub text_length: usize,
    /// How many entries the consumer fetches per round
    pub get_entries_limit: u64,
    /// Seconds between counter reports
    pub print_delay: u64,
    /// Milliseconds between readiness probes
    pub readiness_poll_ms: u64,
}

impl ClientConfig {
    /// Loads the load generator configuration.
    ///
    /// # Environment Variables
    /// - `BASE_URL` (default: http://server:8000)
    /// - `MIN_NEW_ENTRIES` / `MAX_NEW_ENTRIES` (default: 10 / 100)
    /// - `TEXT_LENGTH` (default: 16)
    /// - `GET_ENTRIES_LIMIT` (default: 10)
    /// - `PRINT_DELAY` seconds (default: 10)
    /// - `READINESS_POLL_MS` (default: 200)
    pub fn from_env() -> Self {
        let defaults = Self::default();
        let mut config = Self {
            base_url: env_or("BASE_URL", defaults.base_url),
            min_new_entries: env_or("MIN_NEW_ENTRIES", defaults.min_new_entries),
            max_new_entries: env_or("MAX_NEW_ENTRIES", defaults.max_new_entries),
            text_length: env_or("TEXT_LENGTH", defaults.text_length),
            get_entries_limit: env_or("GET_ENTRIES_LIMIT", defaults.get_entries_limit),
            print_delay: env_or("PRINT_DELAY", defaults.print_delay),
            readiness_poll_ms: env_or("READINESS_POLL_MS", defaults.readiness_poll_ms),
        };
        if config.max_new_entries < config.min_new_entries {
            config.max_new_entries = config.min_new_entries;
        }
        config
    }

    pub fn print_delay(&self) -> Duration {
        Duration::from_secs(self.print_delay)
    }

    pub fn readiness_poll(&self) -> Duration {
        Duration::from_millis(self.readiness_poll_ms)
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: "http://server:8000".to_string(),
            min_new_entries: 10,
            max_new_entries: 100,
            text_length: 16,
            get_entries_limit: 10,
            print_delay: 10,
            readiness_poll_ms: 200,
        }
    }
}
