//! Presence Table
//!
//! The shared map from user identity to last-seen timestamp.
//!
//! Every operation takes the table lock exactly once and holds it for the
//! whole operation, so a scan never observes a half-swept table and a sweep
//! never interleaves with an insert. No operation awaits while holding the
//! lock.

use std::collections::HashMap;
use std::time::Duration;

use parking_lot::Mutex;
use tokio::time::Instant;

use crate::domain::{PresenceEntry, UserId};

/// Mutex-guarded map of `user_id -> last_seen_at`.
#[derive(Debug, Default)]
pub struct PresenceTable {
    entries: Mutex<HashMap<UserId, Instant>>,
}

impl PresenceTable {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a heartbeat for `user_id` observed at `now`.
    ///
    /// Overwrites any previous timestamp. Returns `true` when the user had
    /// no entry before this call.
    pub fn touch(&self, user_id: UserId, now: Instant) -> bool {
        self.entries.lock().insert(user_id, now).is_none()
    }

    /// Last heartbeat of `user_id`, if an entry exists (live or not yet swept).
    pub fn last_seen(&self, user_id: UserId) -> Option<Instant> {
        self.entries.lock().get(&user_id).copied()
    }

    /// Whether `user_id` has an entry younger than `ttl` at `now`.
    pub fn is_online(&self, user_id: UserId, now: Instant, ttl: Duration) -> bool {
        self.entries
            .lock()
            .get(&user_id)
            .map(|last_seen| PresenceEntry::new(user_id, *last_seen).is_live(now, ttl))
            .unwrap_or(false)
    }

    /// Number of entries younger than `ttl` at `now`.
    ///
    /// Expired entries that have not been swept yet are not counted.
    pub fn count_online(&self, now: Instant, ttl: Duration) -> usize {
        self.entries
            .lock()
            .iter()
            .filter(|(user_id, last_seen)| {
                PresenceEntry::new(**user_id, **last_seen).is_live(now, ttl)
            })
            .count()
    }

    /// Snapshot of every entry younger than `ttl` at `now`, oldest first.
    pub fn online_entries(&self, now: Instant, ttl: Duration) -> Vec<PresenceEntry> {
        let mut live: Vec<PresenceEntry> = self
            .entries
            .lock()
            .iter()
            .map(|(user_id, last_seen)| PresenceEntry::new(*user_id, *last_seen))
            .filter(|entry| entry.is_live(now, ttl))
            .collect();

        live.sort_by_key(|entry| (entry.last_seen_at, entry.user_id));
        live
    }

    /// Remove every entry whose age at `now` has reached `ttl`.
    ///
    /// Returns `(evicted, remaining)`.
    pub fn sweep(&self, now: Instant, ttl: Duration) -> (usize, usize) {
        let mut entries = self.entries.lock();
        let before = entries.len();

        entries.retain(|user_id, last_seen| {
            PresenceEntry::new(*user_id, *last_seen).is_live(now, ttl)
        });

        let remaining = entries.len();
        (before - remaining, remaining)
    }

    /// Number of entries currently stored, expired or not.
    pub fn entry_count(&self) -> usize {
        self.entries.lock().len()
    }
}
