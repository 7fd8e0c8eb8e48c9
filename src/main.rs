//! Entry Server - CRUD endpoints over SQLite with a TTL response cache

use anyhow::Context;
use tokio::signal;
use tracing::{info, warn};

use entry_service::{api::create_router, init_tracing, spawn_cleanup_task, AppState, Config};

/// Main entry point for the entry server.
///
/// # Startup Sequence
/// 1. Initialize tracing subscriber for logging
/// 2. Load configuration from environment variables
/// 3. Open the entry database and create the response cache
/// 4. Start the background cache sweep task
/// 5. Create Axum router with all endpoints
/// 6. Serve until SIGINT/SIGTERM
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing("entry_service=info,entry_server=info,tower_http=info");

    info!("Starting entry server");

    let config = Config::from_env();
    info!(
        "Configuration loaded: bind={}, database={}, cache_ttl={}s, cache_cleanup_interval={}s",
        config.bind_addr(),
        config.database_path.display(),
        config.cache_ttl,
        config.cache_cleanup_interval
    );

    let state = AppState::from_config(&config)
        .with_context(|| format!("opening database {}", config.database_path.display()))?;

    let sweep_handle = spawn_cleanup_task(
        state.cache.clone(),
        std::time::Duration::from_secs(config.cache_cleanup_interval),
    );

    let app = create_router(state);

    let addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("binding {addr}"))?;
    info!("Server listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(sweep_handle))
        .await
        .context("serving HTTP")?;

    info!("Server shutdown complete");
    Ok(())
}

/// Waits for shutdown signal (Ctrl+C or SIGTERM), then stops the sweep task.
async fn shutdown_signal(sweep_handle: tokio::task::JoinHandle<()>) {
    let ctrl_c = async {
        if let Err(err) = signal::ctrl_c().await {
            warn!("Failed to listen for Ctrl+C: {}", err);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(err) => {
                warn!("Failed to install SIGTERM handler: {}", err);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, initiating shutdown...");
        }
        _ = terminate => {
            info!("Received SIGTERM, initiating shutdown...");
        }
    }

    sweep_handle.abort();
    warn!("Cache sweep task aborted");
}
