//! Presence Tracker Tests
//!
//! Concurrency and lifecycle behavior of the tracker used as a library.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use pretty_assertions::assert_eq;
use tokio::sync::Barrier;
use tokio::time::Instant;

use presence_service::domain::{PresenceConfig, TrackerState};
use presence_service::infrastructure::presence::{PresenceTable, PresenceTracker};

fn shared_tracker() -> Arc<PresenceTracker> {
    Arc::new(PresenceTracker::new(PresenceConfig::default()))
}

const TTL: Duration = Duration::from_secs(120);

/// Sweeps evicting stale entries while 1000 fresh users heartbeat leave
/// exactly the fresh users behind
#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_heartbeats_interleaved_with_sweeps() {
    let table = Arc::new(PresenceTable::new());
    let t0 = Instant::now();
    let now = t0 + Duration::from_secs(200);

    // Half the stale users are present up front, the rest arrive alongside
    // the fresh ones so sweeps keep finding something to evict
    for user_id in 1000..1500_i64 {
        table.touch(user_id, t0);
    }

    let start = Arc::new(Barrier::new(1001));
    let writers_done = Arc::new(AtomicBool::new(false));

    let sweeper = {
        let table = Arc::clone(&table);
        let start = Arc::clone(&start);
        let writers_done = Arc::clone(&writers_done);
        tokio::spawn(async move {
            start.wait().await;
            let mut evicted = 0;
            while !writers_done.load(Ordering::Acquire) {
                evicted += table.sweep(now, TTL).0;
                tokio::task::yield_now().await;
            }
            evicted + table.sweep(now, TTL).0
        })
    };

    let writers: Vec<_> = (0..1000_i64)
        .map(|user_id| {
            let table = Arc::clone(&table);
            let start = Arc::clone(&start);
            tokio::spawn(async move {
                start.wait().await;
                table.touch(user_id, now);
                if user_id % 2 == 0 {
                    table.touch(1500 + user_id / 2, t0);
                }
            })
        })
        .collect();

    for writer in writers {
        writer.await.unwrap();
    }
    writers_done.store(true, Ordering::Release);
    let evicted = sweeper.await.unwrap();

    assert_eq!(evicted, 1000);
    assert_eq!(table.entry_count(), 1000);
    assert_eq!(table.count_online(now, TTL), 1000);
    assert!((0..1000).all(|user_id| table.is_online(user_id, now, TTL)));
    assert!((1000..2000).all(|user_id| table.last_seen(user_id).is_none()));
}

/// 1000 distinct users heartbeating through the tracker leave exactly 1000 entries
#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_heartbeats_distinct_users() {
    let tracker = shared_tracker();

    let tasks: Vec<_> = (0..1000_i64)
        .map(|user_id| {
            let tracker = Arc::clone(&tracker);
            tokio::spawn(async move { tracker.register_heartbeat(user_id) })
        })
        .collect();

    for task in tasks {
        task.await.unwrap();
    }

    assert_eq!(tracker.tracked_len(), 1000);
    assert_eq!(tracker.online_count(), 1000);
    assert!((0..1000).all(|user_id| tracker.is_online(user_id)));
}

/// Many concurrent heartbeats for one user never produce more than one entry
#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_heartbeats_same_user() {
    let tracker = shared_tracker();

    let tasks: Vec<_> = (0..200)
        .map(|_| {
            let tracker = Arc::clone(&tracker);
            tokio::spawn(async move { tracker.register_heartbeat(42) })
        })
        .collect();

    for task in tasks {
        task.await.unwrap();
    }

    assert_eq!(tracker.tracked_len(), 1);
    assert_eq!(tracker.online_count(), 1);
}

/// Count always agrees with per-user liveness at the same instant
#[tokio::test(start_paused = true)]
async fn test_count_consistent_with_is_online() {
    let tracker = shared_tracker();

    for user_id in 0..30_i64 {
        tracker.register_heartbeat(user_id);
        tokio::time::advance(Duration::from_secs(5)).await;
    }

    // Now t=150s: users registered at or before t=30s have reached the TTL
    let online = (0..30).filter(|user_id| tracker.is_online(*user_id)).count();
    assert_eq!(tracker.online_count(), online);
    assert_eq!(online, 23);
}

/// The sweeper keeps running across heartbeats and only evicts silent users
#[tokio::test(start_paused = true)]
async fn test_sweeper_evicts_only_silent_users() {
    let tracker = shared_tracker();
    tracker.start();

    tracker.register_heartbeat(1);
    tracker.register_heartbeat(2);

    // User 2 keeps heartbeating every 60 seconds, user 1 goes silent
    for _ in 0..4 {
        tokio::time::sleep(Duration::from_secs(60)).await;
        tracker.register_heartbeat(2);
    }

    assert_eq!(tracker.tracked_len(), 1);
    assert!(tracker.is_online(2));
    assert!(!tracker.is_online(1));
    assert_eq!(tracker.last_seen(1), None);

    tracker.stop().await;
    assert_eq!(tracker.state(), TrackerState::Stopped);
}
