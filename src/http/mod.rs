//! HTTP surface of the relay.
//!
//! # Data Flow
//! ```text
//! inbound connection
//!     → server.rs (Axum router, middleware, capture + operator handlers)
//!     → capture engine (record, build response)
//!     → websocket.rs (viewer upgrade, replay, live frames)
//!     → dashboard.rs (embedded monitor page)
//! ```

pub mod dashboard;
pub mod server;
pub mod websocket;

pub use server::HttpServer;
