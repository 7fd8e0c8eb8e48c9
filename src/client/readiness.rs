//! Startup gate: wait until the server accepts TCP connections.

use std::time::Duration;

use reqwest::Url;
use tokio::net::TcpStream;
use tracing::{debug, info};

use super::{ClientError, ClientResult};

/// `host:port` that `base_url` points at, using the scheme's default port
/// when none is given.
pub fn server_addr(base_url: &str) -> ClientResult<String> {
    let invalid = |reason: &str| ClientError::InvalidBaseUrl {
        url: base_url.to_string(),
        reason: reason.to_string(),
    };

    let url = Url::parse(base_url).map_err(|err| invalid(&err.to_string()))?;
    let host = url.host_str().ok_or_else(|| invalid("missing host"))?;
    let port = url
        .port_or_known_default()
        .ok_or_else(|| invalid("missing port"))?;

    Ok(format!("{host}:{port}"))
}

/// Polls `addr` every `poll` until a TCP connection succeeds.
pub async fn wait_for_server(addr: &str, poll: Duration) {
    let mut attempts: u64 = 0;
    loop {
        attempts += 1;
        match TcpStream::connect(addr).await {
            Ok(_) => {
                info!(addr, attempts, "Server is accepting connections");
                return;
            }
            Err(err) => {
                debug!(addr, attempts, error = %err, "Server not ready yet");
                tokio::time::sleep(poll).await;
            }
        }
    }
}
