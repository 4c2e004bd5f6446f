//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Shutdown (shutdown.rs):
//!     Signal received → stop accepting → in-flight requests drain → exit
//!
//! Signals (signals.rs):
//!     SIGINT/Ctrl+C → trigger graceful shutdown
//! ```

pub mod shutdown;
pub mod signals;

pub use shutdown::{Shutdown, ShutdownListener};
