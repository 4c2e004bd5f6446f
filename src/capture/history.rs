//! Bounded request history.
//!
//! # Responsibilities
//! - Keep the last N captured requests (FIFO eviction on overflow)
//! - Serve read-only snapshots in newest-first order
//! - Support operator-triggered clearing

use std::collections::VecDeque;
use std::sync::Mutex;

use crate::capture::CapturedRequest;
use crate::observability::metrics;

/// Fixed-capacity ring buffer of captured requests.
///
/// All operations are total: appending to a full store evicts the oldest
/// entry, and snapshots are detached copies that never expose internal state.
/// Mutations are serialized behind a mutex so the store is safe to share
/// across the multi-threaded runtime.
pub struct HistoryStore {
    entries: Mutex<VecDeque<CapturedRequest>>,
    capacity: usize,
}

impl HistoryStore {
    /// Create an empty store holding at most `capacity` entries.
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: Mutex::new(VecDeque::with_capacity(capacity)),
            capacity,
        }
    }

    /// Insert at the newest end, evicting the oldest entry on overflow.
    pub fn append(&self, item: CapturedRequest) {
        let mut entries = self.entries.lock().unwrap_or_else(|e| e.into_inner());
        entries.push_back(item);
        if entries.len() > self.capacity {
            entries.pop_front();
        }
        metrics::record_history_size(entries.len());
    }

    /// Current contents, newest first. The returned vector is a copy;
    /// mutating it does not affect the store.
    pub fn snapshot(&self) -> Vec<CapturedRequest> {
        let entries = self.entries.lock().unwrap_or_else(|e| e.into_inner());
        entries.iter().rev().cloned().collect()
    }

    /// Remove all entries.
    pub fn clear(&self) {
        let mut entries = self.entries.lock().unwrap_or_else(|e| e.into_inner());
        entries.clear();
        metrics::record_history_size(0);
    }

    /// Number of entries currently held.
    pub fn len(&self) -> usize {
        self.entries.lock().unwrap_or_else(|e| e.into_inner()).len()
    }

    /// Whether the store holds no entries.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Configured maximum size.
    pub fn capacity(&self) -> usize {
        self.capacity
    }
}
