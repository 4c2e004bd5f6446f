//! Capture subsystem: the relay's core state and orchestration.
//!
//! # Data Flow
//! ```text
//! inbound request (method, url, body, content type)
//!     → engine.rs (normalize body, stamp timestamp)
//!     → history.rs (bounded append, FIFO eviction)
//!     → broadcast hub (fan out to live viewers)
//!     → engine.rs build_response (consults response_override.rs)
//!     → response descriptor back to the HTTP layer
//! ```
//!
//! # Design Decisions
//! - All state is memory-resident; nothing survives a restart
//! - Stores are owned `Arc`s handed to the engine and HTTP layer, never
//!   ambient globals, so tests can run isolated instances

pub mod engine;
pub mod history;
pub mod response_override;
pub mod sanitize;
pub mod types;

pub use engine::{CaptureEngine, DEFAULT_ACK_MESSAGE};
pub use history::HistoryStore;
pub use response_override::{OverrideError, OverrideKind, OverrideStore, ResponseOverride};
pub use types::{CapturedBody, CapturedRequest, ResponseDescriptor};
