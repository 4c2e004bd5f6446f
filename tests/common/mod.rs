//! Shared utilities for integration testing.

use std::net::SocketAddr;

use tokio::net::TcpListener;
use webhook_relay::{HttpServer, RelayConfig, Shutdown};

/// Spawn a relay on an ephemeral port.
///
/// Returns the bound address and the shutdown handle; trigger it at the end
/// of the test to stop the server task.
pub async fn spawn_relay(config: RelayConfig) -> (SocketAddr, Shutdown) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();
    let server = HttpServer::new(config);

    tokio::spawn(async move {
        let _ = server.run(listener, server_shutdown).await;
    });

    (addr, shutdown)
}
