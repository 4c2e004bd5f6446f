//! Webhook relay binary entry point.

use std::path::PathBuf;

use tokio::net::TcpListener;

use webhook_relay::config::loader::load_config;
use webhook_relay::lifecycle::signals;
use webhook_relay::observability::{logging, metrics};
use webhook_relay::{HttpServer, RelayConfig, Shutdown};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Optional config file path as the only argument; defaults otherwise.
    let config = match std::env::args().nth(1) {
        Some(path) => load_config(&PathBuf::from(path))?,
        None => RelayConfig::default(),
    };

    logging::init_logging(&config.observability.log_level);

    tracing::info!("webhook-relay v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        bind_address = %config.listener.bind_address,
        history_capacity = config.history.capacity,
        request_timeout_secs = config.timeouts.request_secs,
        "configuration loaded"
    );

    if config.observability.metrics_enabled {
        match config.observability.metrics_address.parse() {
            Ok(addr) => metrics::init_metrics(addr),
            Err(_) => tracing::error!(
                metrics_address = %config.observability.metrics_address,
                "failed to parse metrics address"
            ),
        }
    }

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    tracing::info!(address = %listener.local_addr()?, "listening for connections");

    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();
    tokio::spawn(signals::shutdown_on_signal(shutdown));

    let server = HttpServer::new(config);
    server.run(listener, server_shutdown).await?;

    tracing::info!("shutdown complete");
    Ok(())
}
