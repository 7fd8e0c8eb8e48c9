//! Entry Load Generator - creates and deletes entries against the server forever

use anyhow::Context;
use tracing::info;

use entry_service::{client, init_tracing, ClientConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing("entry_service=info,entry_loadgen=info");

    let config = ClientConfig::from_env();
    info!(
        "Load generator configured: base_url={}, batch={}..={}, fetch_limit={}, report_every={}s",
        config.base_url,
        config.min_new_entries,
        config.max_new_entries,
        config.get_entries_limit,
        config.print_delay
    );

    client::run(config).await.context("load generator stopped")
}
