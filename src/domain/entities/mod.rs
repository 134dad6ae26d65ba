//! # Domain Entities
//!
//! - **PresenceEntry**: last heartbeat of a single user
//! - **TrackerState**: lifecycle state of the presence sweeper

mod presence;

pub use presence::{PresenceEntry, TrackerState, UserId};
