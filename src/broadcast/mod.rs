//! Live fan-out subsystem.
//!
//! # Data Flow
//! ```text
//! CaptureEngine.record()
//!     → hub.rs publish (serialize once)
//!     → per-viewer queue (unbounded, non-blocking)
//!     → WebSocket task drains queue → frame to client
//! ```
//!
//! # Design Decisions
//! - Delivery is best-effort, at-most-once per viewer, no retries
//! - A slow or dead viewer only affects its own queue, never the publisher
//!   or other viewers

pub mod hub;

pub use hub::{Broadcaster, ViewerId};
