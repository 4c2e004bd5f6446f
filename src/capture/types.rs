//! Capture value types shared across the relay.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Body of a captured request, decided once at capture time.
///
/// Inbound JSON is parsed eagerly; anything that is not JSON (or that was
/// declared plain text) is stored as the raw string. Downstream code never
/// re-attempts the parse.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CapturedBody {
    /// Parsed JSON value.
    Structured(Value),
    /// Raw text, kept verbatim.
    Raw(String),
}

/// One normalized inbound request. Immutable once created; ordering is
/// solely by arrival order, so there is no identity field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CapturedRequest {
    /// HTTP verb (or whatever string the transport handed us).
    pub method: String,
    /// Original request target, including the query string.
    pub url: String,
    pub body: CapturedBody,
    /// Locale-formatted capture time.
    pub timestamp: String,
}

/// What the HTTP layer should send back for a capture.
#[derive(Debug, Clone, PartialEq)]
pub enum ResponseDescriptor {
    /// Structured payload, served as `application/json`.
    Json(Value),
    /// Verbatim body, served as `text/plain`.
    Text(String),
}
