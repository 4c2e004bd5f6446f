//! OS signal handling.

use crate::lifecycle::shutdown::Shutdown;

/// Wait for Ctrl+C and trigger shutdown.
///
/// If the signal handler cannot be installed, shutdown is triggered
/// immediately rather than leaving the process unkillable.
pub async fn shutdown_on_signal(shutdown: Shutdown) {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to install Ctrl+C handler");
    } else {
        tracing::info!("shutdown signal received");
    }
    shutdown.trigger();
}
