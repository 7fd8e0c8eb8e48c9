//! The producer, consumer, and reporter loops.
//!
//! All three share one `EntryClient` (one connection pool). The deletion
//! counter is the only shared mutable state.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use reqwest::StatusCode;
use tracing::{info, warn};

use super::{random_batch, server_addr, wait_for_server, ClientResult, EntryClient};
use crate::config::ClientConfig;

// == Deletion Counter ==
/// Number of deletes the server acknowledged, shared between tasks.
#[derive(Debug, Clone, Default)]
pub struct DeletionCounter(Arc<AtomicU64>);

impl DeletionCounter {
    /// Adds one and returns the new total.
    pub fn increment(&self) -> u64 {
        self.0.fetch_add(1, Ordering::Relaxed) + 1
    }

    pub fn get(&self) -> u64 {
        self.0.load(Ordering::Relaxed)
    }
}

// == Producer ==
/// Creates one entry per text, sequentially. Returns how many were
/// answered with 201; other answers are logged and skipped.
pub async fn produce_batch(client: &EntryClient, texts: &[String]) -> ClientResult<usize> {
    let mut created = 0;
    for text in texts {
        let response = client.create(text).await?;
        let status = response.status();
        if status == StatusCode::CREATED {
            created += 1;
        } else {
            let body = response.text().await.unwrap_or_default();
            warn!(%status, body = %body, "Unexpected response to entry creation");
        }
    }
    Ok(created)
}

/// Creates random batches forever.
pub async fn producer_loop(client: EntryClient, config: &ClientConfig) -> ClientResult<()> {
    loop {
        let texts = {
            let mut rng = rand::thread_rng();
            random_batch(
                &mut rng,
                config.min_new_entries,
                config.max_new_entries,
                config.text_length,
            )
        };
        produce_batch(&client, &texts).await?;
    }
}

// == Consumer ==
/// Fetches up to `limit` entries and deletes each one. Returns the number of
/// deletes the server acknowledged; each also bumps `counter`.
pub async fn drain_once(
    client: &EntryClient,
    limit: u64,
    counter: &DeletionCounter,
) -> ClientResult<u64> {
    let entries = client.list(limit).await?;

    let mut deleted = 0;
    for entry in entries {
        let status = client.delete(entry.uuid).await?;
        if status.is_success() {
            counter.increment();
            deleted += 1;
        } else {
            warn!(uuid = %entry.uuid, %status, "Unexpected response to entry deletion");
        }
    }
    Ok(deleted)
}

/// Lists and deletes entries forever.
pub async fn consumer_loop(
    client: EntryClient,
    limit: u64,
    counter: DeletionCounter,
) -> ClientResult<()> {
    loop {
        drain_once(&client, limit, &counter).await?;
    }
}

// == Reporter ==
/// Logs the deletion counter every `interval`, forever.
pub async fn reporter_loop(counter: DeletionCounter, interval: Duration) -> ClientResult<()> {
    loop {
        tokio::time::sleep(interval).await;
        info!(deleted = counter.get(), "Deleted entries so far");
    }
}

// == Run ==
/// Waits for the server, then runs all three loops until one of them fails.
pub async fn run(config: ClientConfig) -> ClientResult<()> {
    let addr = server_addr(&config.base_url)?;
    info!(addr = %addr, "Waiting for entry server");
    wait_for_server(&addr, config.readiness_poll()).await;

    let client = EntryClient::new(config.base_url.as_str());
    let counter = DeletionCounter::default();

    tokio::try_join!(
        producer_loop(client.clone(), &config),
        consumer_loop(client.clone(), config.get_entries_limit, counter.clone()),
        reporter_loop(counter, config.print_delay()),
    )?;
    Ok(())
}
