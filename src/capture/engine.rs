//! Capture orchestration.
//!
//! # Responsibilities
//! - Normalize inbound requests into [`CapturedRequest`] values
//! - Append captures to history and publish them to live viewers
//! - Build the outbound response, honoring the operator override
//!
//! # Design Decisions
//! - Body normalization never fails: unparseable JSON degrades to raw text
//! - Append + publish happen under one guard, so history order and
//!   broadcast order always agree; viewer attachment takes the same guard,
//!   so a capture lands in a viewer's replay or its live queue, never both
//! - JSON overrides are re-parsed at response time even though they were
//!   validated at set-time; a body that stopped parsing is wrapped under a
//!   `response` field instead of failing the capture

use std::sync::{Arc, Mutex};

use chrono::Local;
use serde_json::{json, Value};
use tokio::sync::mpsc;

use crate::broadcast::{Broadcaster, ViewerId};
use crate::capture::history::HistoryStore;
use crate::capture::response_override::{OverrideKind, OverrideStore};
use crate::capture::types::{CapturedBody, CapturedRequest, ResponseDescriptor};
use crate::observability::metrics;

/// Acknowledgment message returned when no override is active.
pub const DEFAULT_ACK_MESSAGE: &str = "Datos recibidos";

const TIMESTAMP_FORMAT: &str = "%d/%m/%Y, %H:%M:%S";

/// Orchestrates the capture path: record, store, fan out, respond.
pub struct CaptureEngine {
    history: Arc<HistoryStore>,
    broadcaster: Arc<Broadcaster>,
    overrides: Arc<OverrideStore>,
    /// Serializes append + publish so captures form a single dispatch point.
    record_guard: Mutex<()>,
}

impl CaptureEngine {
    pub fn new(
        history: Arc<HistoryStore>,
        broadcaster: Arc<Broadcaster>,
        overrides: Arc<OverrideStore>,
    ) -> Self {
        Self {
            history,
            broadcaster,
            overrides,
            record_guard: Mutex::new(()),
        }
    }

    /// Record one inbound request: normalize the body, stamp the capture
    /// time, append to history and publish to all live viewers.
    ///
    /// Never fails; a body that does not parse as JSON is kept as raw text.
    pub fn record(
        &self,
        method: &str,
        url: &str,
        body: String,
        content_type: Option<&str>,
    ) -> CapturedRequest {
        let captured = CapturedRequest {
            method: method.to_string(),
            url: url.to_string(),
            body: normalize_body(body, content_type),
            timestamp: Local::now().format(TIMESTAMP_FORMAT).to_string(),
        };

        tracing::debug!(
            method = %captured.method,
            url = %captured.url,
            "capture recorded"
        );
        metrics::record_capture(&captured.method);

        let _guard = self.record_guard.lock().unwrap_or_else(|e| e.into_inner());
        self.history.append(captured.clone());
        self.broadcaster.publish(&captured);

        captured
    }

    /// Register a live viewer and snapshot history as one atomic step with
    /// respect to [`record`](Self::record).
    ///
    /// Without the shared guard a capture could slip between the snapshot
    /// and the registration and reach the viewer twice: once in the replay
    /// and once as a live event. Returns the viewer id, its event queue and
    /// the snapshot to replay (newest first, as
    /// [`HistoryStore::snapshot`] returns it).
    pub fn attach_viewer(
        &self,
    ) -> (ViewerId, mpsc::UnboundedReceiver<String>, Vec<CapturedRequest>) {
        let _guard = self.record_guard.lock().unwrap_or_else(|e| e.into_inner());
        let snapshot = self.history.snapshot();
        let (viewer_id, events) = self.broadcaster.register();
        (viewer_id, events, snapshot)
    }

    /// Build the response descriptor for a capture, consulting the override.
    pub fn build_response(&self, captured: &CapturedRequest) -> ResponseDescriptor {
        let Some(active) = self.overrides.resolve() else {
            return ResponseDescriptor::Json(json!({
                "message": DEFAULT_ACK_MESSAGE,
                "data": serde_json::to_value(captured).unwrap_or(Value::Null),
            }));
        };

        match active.kind {
            OverrideKind::Text => ResponseDescriptor::Text(active.body),
            OverrideKind::Json => match serde_json::from_str::<Value>(&active.body) {
                Ok(value) => ResponseDescriptor::Json(value),
                // Validated at set-time, so this is unreachable in practice.
                Err(_) => ResponseDescriptor::Json(json!({ "response": active.body })),
            },
        }
    }

    /// History store backing this engine.
    pub fn history(&self) -> &Arc<HistoryStore> {
        &self.history
    }
}

/// Decide the captured body representation once, at capture time.
///
/// Plain-text payloads stay raw; everything else gets a best-effort JSON
/// parse with a silent fallback to the raw string.
fn normalize_body(body: String, content_type: Option<&str>) -> CapturedBody {
    let is_plain_text = content_type
        .map(|ct| ct.trim().to_ascii_lowercase().starts_with("text/plain"))
        .unwrap_or(false);

    if is_plain_text {
        return CapturedBody::Raw(body);
    }

    match serde_json::from_str::<Value>(&body) {
        Ok(value) => CapturedBody::Structured(value),
        Err(_) => CapturedBody::Raw(body),
    }
}
