//! Viewer registry and event fan-out.
//!
//! # Responsibilities
//! - Track the set of live viewer connections
//! - Serialize each capture once and deliver it to every open viewer
//! - Drop viewers whose receiving side has gone away

use dashmap::DashMap;
use tokio::sync::mpsc;
use uuid::Uuid;

use crate::capture::CapturedRequest;
use crate::observability::metrics;

/// Identifier for a registered viewer connection.
pub type ViewerId = Uuid;

/// Fan-out hub for live viewers.
///
/// Each viewer gets its own unbounded queue, so `publish` never blocks and
/// events reach each viewer in publish order. Registration and removal are
/// concurrent-safe; `publish` iterates a snapshot of the set, so a viewer
/// disconnecting mid-broadcast cannot corrupt iteration.
#[derive(Default)]
pub struct Broadcaster {
    viewers: DashMap<ViewerId, mpsc::UnboundedSender<String>>,
}

impl Broadcaster {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a viewer to the active set. Returns its id and the receiving end
    /// of its event queue.
    pub fn register(&self) -> (ViewerId, mpsc::UnboundedReceiver<String>) {
        let id = Uuid::new_v4();
        let (tx, rx) = mpsc::unbounded_channel();
        self.viewers.insert(id, tx);
        metrics::record_viewer_count(self.viewers.len());
        tracing::info!(viewer = %id, viewers = self.viewers.len(), "viewer registered");
        (id, rx)
    }

    /// Remove a viewer from the active set. Safe to call twice.
    pub fn unregister(&self, id: ViewerId) {
        if self.viewers.remove(&id).is_some() {
            metrics::record_viewer_count(self.viewers.len());
            tracing::info!(viewer = %id, viewers = self.viewers.len(), "viewer unregistered");
        }
    }

    /// Serialize `event` once and deliver it to every open viewer.
    ///
    /// Viewers whose queue has been closed are pruned; delivery failure is
    /// normal connection churn, not an error.
    pub fn publish(&self, event: &CapturedRequest) {
        let payload = match serde_json::to_string(event) {
            Ok(payload) => payload,
            Err(e) => {
                tracing::warn!(error = %e, "failed to serialize capture event");
                return;
            }
        };

        let snapshot: Vec<(ViewerId, mpsc::UnboundedSender<String>)> = self
            .viewers
            .iter()
            .map(|entry| (*entry.key(), entry.value().clone()))
            .collect();

        let mut delivered = 0usize;
        let mut dead = Vec::new();
        for (id, tx) in snapshot {
            if tx.send(payload.clone()).is_ok() {
                delivered += 1;
            } else {
                dead.push(id);
            }
        }
        // Prune through unregister so the viewer gauge stays accurate.
        for id in dead {
            self.unregister(id);
        }
        metrics::record_broadcast(delivered);
    }

    /// Number of currently registered viewers.
    pub fn viewer_count(&self) -> usize {
        self.viewers.len()
    }
}
