//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (capacity > 0, parseable addresses)
//!
//! # Design Decisions
//! - Returns all validation errors, not just the first
//! - Validation is a pure function: RelayConfig → Result<(), Vec<ValidationError>>

use std::net::SocketAddr;

use crate::config::schema::RelayConfig;

/// A single semantic validation failure.
#[derive(Debug)]
pub enum ValidationError {
    /// Bind address does not parse as a socket address.
    InvalidBindAddress(String),
    /// Metrics address does not parse as a socket address.
    InvalidMetricsAddress(String),
    /// History capacity must hold at least one entry.
    ZeroHistoryCapacity,
    /// Body limit of zero would reject every capture.
    ZeroBodyLimit,
    /// Request timeout of zero would cancel every request.
    ZeroRequestTimeout,
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValidationError::InvalidBindAddress(addr) => {
                write!(f, "invalid listener bind address: {}", addr)
            }
            ValidationError::InvalidMetricsAddress(addr) => {
                write!(f, "invalid metrics address: {}", addr)
            }
            ValidationError::ZeroHistoryCapacity => write!(f, "history capacity must be > 0"),
            ValidationError::ZeroBodyLimit => write!(f, "max body size must be > 0"),
            ValidationError::ZeroRequestTimeout => write!(f, "request timeout must be > 0"),
        }
    }
}

/// Run all semantic checks, collecting every failure.
pub fn validate_config(config: &RelayConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::InvalidBindAddress(
            config.listener.bind_address.clone(),
        ));
    }

    if config.observability.metrics_enabled
        && config
            .observability
            .metrics_address
            .parse::<SocketAddr>()
            .is_err()
    {
        errors.push(ValidationError::InvalidMetricsAddress(
            config.observability.metrics_address.clone(),
        ));
    }

    if config.history.capacity == 0 {
        errors.push(ValidationError::ZeroHistoryCapacity);
    }

    if config.security.max_body_size == 0 {
        errors.push(ValidationError::ZeroBodyLimit);
    }

    if config.timeouts.request_secs == 0 {
        errors.push(ValidationError::ZeroRequestTimeout);
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
