//! Webhook inspection relay.
//!
//! Accepts arbitrary inbound HTTP requests on a capture endpoint, keeps a
//! bounded history of them, fans each one out live to connected WebSocket
//! viewers, and lets an operator override the response served to future
//! captures.
//!
//! # Architecture Overview
//!
//! ```text
//!  Inbound webhook ──▶ http::server ──▶ capture::engine ──┬─▶ capture::history
//!                                            │            └─▶ broadcast::hub ──▶ viewers (/ws)
//!                                            ▼
//!                                  capture::response_override
//!                                            │
//!  Response ◀────────────────────────────────┘
//!
//!  Operator (/api, relay-cli) ──▶ history.clear / override.set / override.clear
//!
//!  Cross-cutting: config, observability (tracing + metrics), lifecycle
//! ```

// Core subsystems
pub mod broadcast;
pub mod capture;
pub mod config;
pub mod http;

// Cross-cutting concerns
pub mod lifecycle;
pub mod observability;

pub use config::RelayConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
