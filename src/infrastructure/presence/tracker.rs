//! Presence Tracker
//!
//! Owns the presence table and the background task that evicts stale
//! entries from it.
//!
//! # Lifecycle
//!
//! ```text
//! Stopped --start()--> Running --stop()--> Stopped
//! ```
//!
//! Heartbeats and queries work in both states. While stopped the table is
//! simply not cleaned; queries still filter expired entries by age.

use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tokio_util::sync::CancellationToken;

use super::table::PresenceTable;
use crate::domain::{PresenceConfig, PresenceEntry, TrackerState, UserId};
use crate::infrastructure::metrics;

/// Handle to the running sweeper task.
struct Sweeper {
    cancel: CancellationToken,
    handle: JoinHandle<()>,
}

/// Heartbeat-based online presence tracker.
///
/// Shared across request handlers behind an `Arc`. All operations are total:
/// nothing here returns an error to the caller.
pub struct PresenceTracker {
    table: Arc<PresenceTable>,
    config: PresenceConfig,
    sweeper: Mutex<Option<Sweeper>>,
}

impl PresenceTracker {
    /// Create a stopped tracker with an empty table.
    pub fn new(config: PresenceConfig) -> Self {
        Self {
            table: Arc::new(PresenceTable::new()),
            config,
            sweeper: Mutex::new(None),
        }
    }

    pub fn config(&self) -> &PresenceConfig {
        &self.config
    }

    /// Record a heartbeat for `user_id` at the current instant.
    ///
    /// Any number of calls for the same user collapse into one entry.
    pub fn register_heartbeat(&self, user_id: UserId) {
        let first_seen = self.table.touch(user_id, Instant::now());
        metrics::record_heartbeat();

        if first_seen {
            tracing::debug!(user_id = user_id, "User came online");
        }
    }

    /// Number of users whose last heartbeat is younger than the TTL.
    pub fn online_count(&self) -> usize {
        self.table
            .count_online(Instant::now(), self.config.heartbeat_ttl())
    }

    /// Whether `user_id` has a heartbeat younger than the TTL.
    ///
    /// `false` means the user cannot currently be reached, not that the user
    /// does not exist.
    pub fn is_online(&self, user_id: UserId) -> bool {
        self.table
            .is_online(user_id, Instant::now(), self.config.heartbeat_ttl())
    }

    /// Snapshot of online users, least recently seen first.
    pub fn online_users(&self) -> Vec<PresenceEntry> {
        self.table
            .online_entries(Instant::now(), self.config.heartbeat_ttl())
    }

    /// Last heartbeat of `user_id` still held in the table.
    pub fn last_seen(&self, user_id: UserId) -> Option<Instant> {
        self.table.last_seen(user_id)
    }

    /// Number of entries held in the table, including expired ones not yet swept.
    pub fn tracked_len(&self) -> usize {
        self.table.entry_count()
    }

    /// Evict every entry whose age has reached the TTL.
    ///
    /// Normally driven by the background sweeper. Returns the number of
    /// evicted entries.
    pub fn sweep(&self) -> usize {
        sweep_table(&self.table, self.config.heartbeat_ttl())
    }

    /// Current lifecycle state.
    pub fn state(&self) -> TrackerState {
        match self.sweeper.lock().as_ref() {
            Some(sweeper) if !sweeper.handle.is_finished() => TrackerState::Running,
            _ => TrackerState::Stopped,
        }
    }

    /// Start the recurring sweep.
    ///
    /// Must be called from within a tokio runtime. Returns `false` without
    /// spawning anything if the sweeper is already running.
    pub fn start(&self) -> bool {
        let mut slot = self.sweeper.lock();
        if slot.as_ref().is_some_and(|s| !s.handle.is_finished()) {
            tracing::warn!("Presence sweeper already running, ignoring start");
            return false;
        }

        let cancel = CancellationToken::new();
        let handle = tokio::spawn(run_sweeper(
            Arc::clone(&self.table),
            self.config.heartbeat_ttl(),
            self.config.sweep_interval(),
            cancel.clone(),
        ));
        *slot = Some(Sweeper { cancel, handle });

        tracing::info!(
            heartbeat_ttl_secs = self.config.heartbeat_ttl().as_secs(),
            sweep_interval_secs = self.config.sweep_interval().as_secs(),
            max_staleness_secs = self.config.max_staleness().as_secs(),
            "Presence sweeper started"
        );
        true
    }

    /// Cancel the recurring sweep and wait for the task to finish.
    ///
    /// The table stays usable afterwards. Returns `false` if the sweeper was
    /// not running.
    pub async fn stop(&self) -> bool {
        let sweeper = self.sweeper.lock().take();
        let Some(sweeper) = sweeper else {
            return false;
        };

        sweeper.cancel.cancel();
        if let Err(e) = sweeper.handle.await {
            if !e.is_cancelled() {
                tracing::error!("Presence sweeper task failed: {}", e);
            }
        }

        tracing::info!(tracked = self.table.entry_count(), "Presence sweeper stopped");
        true
    }
}

impl Drop for PresenceTracker {
    fn drop(&mut self) {
        if let Some(sweeper) = self.sweeper.get_mut().take() {
            sweeper.cancel.cancel();
        }
    }
}

/// One eviction pass with metrics and logging.
fn sweep_table(table: &PresenceTable, ttl: Duration) -> usize {
    let started = std::time::Instant::now();
    let (evicted, remaining) = table.sweep(Instant::now(), ttl);
    metrics::record_sweep(evicted, remaining, started.elapsed().as_secs_f64());

    tracing::debug!(evicted = evicted, remaining = remaining, "Presence sweep complete");
    evicted
}

/// Sweeper loop: one pass per `period` until cancelled.
///
/// The first pass runs one full period after start.
async fn run_sweeper(
    table: Arc<PresenceTable>,
    ttl: Duration,
    period: Duration,
    cancel: CancellationToken,
) {
    let mut ticker = interval_at(Instant::now() + period, period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

    loop {
        tokio::select! {
            biased;
            _ = cancel.cancelled() => break,
            _ = ticker.tick() => {
                sweep_table(&table, ttl);
            }
        }
    }
}
