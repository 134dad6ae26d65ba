//! # Domain Value Objects
//!
//! Immutable value types that represent domain concepts without identity.
//!
//! - **PresenceConfig**: validated heartbeat TTL and sweep interval

mod presence_config;

pub use presence_config::*;
