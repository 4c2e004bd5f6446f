//! Operator-configured response override.
//!
//! # Responsibilities
//! - Hold at most one active override (kind + body)
//! - Sanitize and validate override bodies at set-time
//! - Expose the current override to the capture engine
//!
//! # Design Decisions
//! - JSON bodies are validated once when set; a set that fails validation
//!   leaves the previous override untouched
//! - Setting replaces any prior override atomically; clearing is
//!   unconditional

use std::sync::Mutex;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::capture::sanitize::sanitize;
use crate::observability::metrics;

/// How the override body should be served.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OverrideKind {
    /// Body is JSON text, served as the entire response payload.
    Json,
    /// Body is served verbatim as plain text.
    Text,
}

/// An active response override.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResponseOverride {
    pub kind: OverrideKind,
    /// Sanitized body text.
    pub body: String,
}

/// Errors raised when configuring an override.
#[derive(Debug, Error)]
pub enum OverrideError {
    /// The body for a JSON override is not syntactically valid JSON.
    #[error("invalid override body: {0}")]
    InvalidOverrideBody(String),
}

/// Holder for the single optional override.
///
/// States are `Default` (no override) and `Overridden`; `set` moves either
/// state to `Overridden`, `clear` moves any state back to `Default`.
#[derive(Default)]
pub struct OverrideStore {
    current: Mutex<Option<ResponseOverride>>,
}

impl OverrideStore {
    /// Create a store in the `Default` state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sanitize `raw_body` and install it as the active override.
    ///
    /// For [`OverrideKind::Json`] the sanitized body must parse as JSON;
    /// on failure the previous override (if any) is left unchanged.
    pub fn set(&self, kind: OverrideKind, raw_body: &str) -> Result<(), OverrideError> {
        let body = sanitize(raw_body);

        if kind == OverrideKind::Json {
            serde_json::from_str::<serde_json::Value>(&body)
                .map_err(|e| OverrideError::InvalidOverrideBody(e.to_string()))?;
        }

        let mut current = self.current.lock().unwrap_or_else(|e| e.into_inner());
        *current = Some(ResponseOverride { kind, body });
        metrics::record_override_event("set");
        Ok(())
    }

    /// Reset to the `Default` state.
    pub fn clear(&self) {
        let mut current = self.current.lock().unwrap_or_else(|e| e.into_inner());
        *current = None;
        metrics::record_override_event("clear");
    }

    /// Current override, or `None` in the `Default` state. Pure read.
    pub fn resolve(&self) -> Option<ResponseOverride> {
        self.current.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }
}
