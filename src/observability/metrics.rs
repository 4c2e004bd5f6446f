//! Metrics collection and exposition.
//!
//! # Metrics
//! - `relay_captures_total` (counter): captures by method
//! - `relay_broadcast_deliveries_total` (counter): events delivered to viewers
//! - `relay_viewers` (gauge): currently connected viewers
//! - `relay_history_size` (gauge): entries held in the history buffer
//! - `relay_override_events_total` (counter): override set/clear actions

use std::net::SocketAddr;

use metrics::{counter, gauge};
use metrics_exporter_prometheus::PrometheusBuilder;

/// Install the Prometheus exporter on `addr`.
///
/// Must run inside the tokio runtime. Failure to bind is logged, not fatal:
/// the relay keeps working without exposition.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "metrics exporter listening"),
        Err(e) => tracing::error!(error = %e, "failed to install metrics exporter"),
    }
}

/// Count one recorded capture.
pub fn record_capture(method: &str) {
    counter!("relay_captures_total", "method" => method.to_string()).increment(1);
}

/// Count deliveries from one publish call.
pub fn record_broadcast(delivered: usize) {
    counter!("relay_broadcast_deliveries_total").increment(delivered as u64);
}

/// Track the connected-viewer count.
pub fn record_viewer_count(count: usize) {
    gauge!("relay_viewers").set(count as f64);
}

/// Track the history buffer size.
pub fn record_history_size(len: usize) {
    gauge!("relay_history_size").set(len as f64);
}

/// Count an override state change (`"set"` or `"clear"`).
pub fn record_override_event(action: &'static str) {
    counter!("relay_override_events_total", "action" => action).increment(1);
}
