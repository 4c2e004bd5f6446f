//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! All subsystems produce:
//!     → logging.rs (structured tracing events)
//!     → metrics.rs (counters, gauges)
//!
//! Consumers:
//!     → stdout log output (level via config or RUST_LOG)
//!     → Prometheus scrape endpoint (optional)
//! ```
//!
//! # Design Decisions
//! - Metric updates are cheap atomic operations on the capture path
//! - The exporter is optional; recording without it installed is a no-op

pub mod logging;
pub mod metrics;
