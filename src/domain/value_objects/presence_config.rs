//! Presence timing configuration.

use std::time::Duration;

/// Default time after which a silent user is considered offline.
pub const DEFAULT_HEARTBEAT_TTL: Duration = Duration::from_secs(120);

/// Default period between eviction passes.
pub const DEFAULT_SWEEP_INTERVAL: Duration = Duration::from_secs(60);

/// Upper bound on the heartbeat TTL, and so on the sweep interval too.
pub const MAX_HEARTBEAT_TTL: Duration = Duration::from_secs(24 * 60 * 60);

/// Rejected presence timing combinations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PresenceConfigError {
    #[error("heartbeat TTL must be greater than zero")]
    ZeroTtl,

    #[error("sweep interval must be greater than zero")]
    ZeroSweepInterval,

    #[error("heartbeat TTL ({heartbeat_ttl:?}) must not exceed {max:?}")]
    TtlTooLong { heartbeat_ttl: Duration, max: Duration },

    #[error(
        "sweep interval ({sweep_interval:?}) must not exceed heartbeat TTL ({heartbeat_ttl:?})"
    )]
    SweepExceedsTtl {
        heartbeat_ttl: Duration,
        sweep_interval: Duration,
    },
}

/// Timing parameters of the presence tracker.
///
/// The sweep interval never exceeds the TTL, which bounds how long an
/// expired entry can linger in the table to `heartbeat_ttl + sweep_interval`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PresenceConfig {
    heartbeat_ttl: Duration,
    sweep_interval: Duration,
}

impl PresenceConfig {
    /// Build a validated configuration.
    ///
    /// # Errors
    ///
    /// Returns `PresenceConfigError` if either duration is zero, the TTL is
    /// above `MAX_HEARTBEAT_TTL`, or the sweep interval is longer than the TTL.
    pub fn new(
        heartbeat_ttl: Duration,
        sweep_interval: Duration,
    ) -> Result<Self, PresenceConfigError> {
        if heartbeat_ttl.is_zero() {
            return Err(PresenceConfigError::ZeroTtl);
        }
        if sweep_interval.is_zero() {
            return Err(PresenceConfigError::ZeroSweepInterval);
        }
        if heartbeat_ttl > MAX_HEARTBEAT_TTL {
            return Err(PresenceConfigError::TtlTooLong {
                heartbeat_ttl,
                max: MAX_HEARTBEAT_TTL,
            });
        }
        if sweep_interval > heartbeat_ttl {
            return Err(PresenceConfigError::SweepExceedsTtl {
                heartbeat_ttl,
                sweep_interval,
            });
        }

        Ok(Self {
            heartbeat_ttl,
            sweep_interval,
        })
    }

    /// Build a configuration from whole seconds.
    pub fn from_secs(
        heartbeat_ttl_secs: u64,
        sweep_interval_secs: u64,
    ) -> Result<Self, PresenceConfigError> {
        Self::new(
            Duration::from_secs(heartbeat_ttl_secs),
            Duration::from_secs(sweep_interval_secs),
        )
    }

    pub fn heartbeat_ttl(&self) -> Duration {
        self.heartbeat_ttl
    }

    pub fn sweep_interval(&self) -> Duration {
        self.sweep_interval
    }

    /// Longest time an expired entry may remain in the table.
    pub fn max_staleness(&self) -> Duration {
        self.heartbeat_ttl + self.sweep_interval
    }
}

impl Default for PresenceConfig {
    fn default() -> Self {
        Self {
            heartbeat_ttl: DEFAULT_HEARTBEAT_TTL,
            sweep_interval: DEFAULT_SWEEP_INTERVAL,
        }
    }
}
