//! Entry Service - a CRUD server for text entries and a load generator
//!
//! The server keeps entries in SQLite and caches its list endpoints for a
//! fixed TTL. The client continuously creates and deletes entries against it.

pub mod api;
pub mod cache;
pub mod client;
pub mod config;
pub mod error;
pub mod models;
pub mod store;
pub mod tasks;

pub use api::AppState;
pub use config::{ClientConfig, Config};
pub use tasks::spawn_cleanup_task;

/// Installs the fmt subscriber with an env filter, defaulting to `default_filter`
/// when `RUST_LOG` is unset.
pub fn init_tracing(default_filter: &str) {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}
