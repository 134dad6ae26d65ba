//! Presence entry entity.
//!
//! A presence entry records the most recent heartbeat of a single user.
//! Entries live only in process memory and are never persisted.

use std::time::Duration;

use tokio::time::Instant;

/// Opaque user identity supplied by the authentication layer.
///
/// The presence subsystem never generates or validates identities; any value
/// handed to it is tracked as-is.
pub type UserId = i64;

/// The last-seen record of one user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PresenceEntry {
    /// User this entry belongs to
    pub user_id: UserId,

    /// Monotonic timestamp of the most recent heartbeat
    pub last_seen_at: Instant,
}

impl PresenceEntry {
    /// Create an entry for a heartbeat observed at `last_seen_at`.
    pub fn new(user_id: UserId, last_seen_at: Instant) -> Self {
        Self {
            user_id,
            last_seen_at,
        }
    }

    /// Time elapsed since the last heartbeat, as observed at `now`.
    ///
    /// Saturates to zero if `now` precedes the heartbeat.
    pub fn age(&self, now: Instant) -> Duration {
        now.saturating_duration_since(self.last_seen_at)
    }

    /// Whether the entry still counts as online under `ttl`.
    ///
    /// An entry whose age has reached the TTL is offline.
    pub fn is_live(&self, now: Instant, ttl: Duration) -> bool {
        self.age(now) < ttl
    }
}

/// Lifecycle state of the background sweeper.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TrackerState {
    #[default]
    Stopped,
    Running,
}

impl TrackerState {
    /// String representation used in health reports and logs.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Stopped => "stopped",
            Self::Running => "running",
        }
    }
}

impl std::fmt::Display for TrackerState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
