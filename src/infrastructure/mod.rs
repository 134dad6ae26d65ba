//! Infrastructure Layer
//!
//! Contains process-local implementations backing the service:
//! - Presence table and sweeper (in memory)
//! - Prometheus metrics registry

pub mod metrics;
pub mod presence;
