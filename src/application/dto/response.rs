//! Response DTOs
//!
//! Data structures for API response bodies.

use serde::{Deserialize, Serialize};
use tokio::time::Instant;

use crate::domain::{PresenceEntry, UserId};

/// Heartbeat acknowledgement
#[derive(Debug, Serialize, Deserialize)]
pub struct HeartbeatResponse {
    pub user_id: UserId,
    pub online: bool,
    /// How often the client should send the next heartbeat
    pub heartbeat_interval_secs: u64,
    /// Silence after which the user is reported offline
    pub ttl_secs: u64,
    pub server_time: String,
}

/// Aggregate "logged in now" metric for dashboards
#[derive(Debug, Serialize, Deserialize)]
pub struct OnlineCountResponse {
    pub online_count: usize,
}

/// Reachability of a single user
#[derive(Debug, Serialize, Deserialize)]
pub struct PresenceStatusResponse {
    pub user_id: UserId,
    pub online: bool,
}

/// One online user in a listing
#[derive(Debug, Serialize, Deserialize)]
pub struct OnlineUserResponse {
    pub user_id: UserId,
    /// Whole seconds since the last heartbeat
    pub idle_secs: u64,
}

impl OnlineUserResponse {
    pub fn from_entry(entry: &PresenceEntry, now: Instant) -> Self {
        Self {
            user_id: entry.user_id,
            idle_secs: entry.age(now).as_secs(),
        }
    }
}

/// Online users listing
#[derive(Debug, Serialize, Deserialize)]
pub struct OnlineUsersResponse {
    pub online_count: usize,
    pub users: Vec<OnlineUserResponse>,
}

impl OnlineUsersResponse {
    pub fn from_entries(entries: &[PresenceEntry], now: Instant) -> Self {
        Self {
            online_count: entries.len(),
            users: entries
                .iter()
                .map(|entry| OnlineUserResponse::from_entry(entry, now))
                .collect(),
        }
    }
}
