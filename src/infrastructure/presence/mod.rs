//! In-memory presence tracking.
//!
//! - `table`: the lock-guarded `user_id -> last_seen_at` map
//! - `tracker`: the public tracker and its background sweeper

mod table;
mod tracker;

pub use table::PresenceTable;
pub use tracker::PresenceTracker;
