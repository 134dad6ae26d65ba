//! Health Check Handlers
//!
//! Provides health check endpoints for Kubernetes-style liveness and readiness probes.
//!
//! # Endpoints
//! - `GET /health` - Basic health check
//! - `GET /health/live` - Liveness probe (is the server running?)
//! - `GET /health/ready` - Readiness probe (is presence tracking active?)

use axum::{extract::State, Json};
use chrono::{DateTime, Utc};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::domain::TrackerState;
use crate::startup::AppState;

/// Server start time for uptime calculation
static SERVER_START: Lazy<Instant> = Lazy::new(Instant::now);
static SERVER_START_TIME: Lazy<DateTime<Utc>> = Lazy::new(Utc::now);

/// Initialize the server start time (call during startup)
pub fn init_server_start() {
    Lazy::force(&SERVER_START);
    Lazy::force(&SERVER_START_TIME);
}

/// Basic health response
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

/// Detailed readiness response
#[derive(Debug, Serialize, Deserialize)]
pub struct ReadinessResponse {
    pub status: HealthStatus,
    pub version: String,
    pub uptime_seconds: u64,
    pub started_at: String,
    pub presence: PresenceHealth,
}

/// Presence tracker health
#[derive(Debug, Serialize, Deserialize)]
pub struct PresenceHealth {
    pub status: HealthStatus,
    pub sweeper: String,
    pub online_users: usize,
    pub tracked_entries: usize,
}

/// Overall health status
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    Healthy,
    Degraded,
}

/// Simple liveness response
#[derive(Debug, Serialize, Deserialize)]
pub struct LivenessResponse {
    pub status: String,
}

/// Basic health check endpoint
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".into(),
        version: env!("CARGO_PKG_VERSION").into(),
    })
}

/// Liveness probe - checks if the server is running
pub async fn liveness() -> Json<LivenessResponse> {
    Json(LivenessResponse {
        status: "alive".into(),
    })
}

/// Readiness probe - reports sweeper state and current presence figures
///
/// A stopped sweeper still serves queries, so it is reported as degraded
/// rather than failing the probe.
pub async fn readiness(State(state): State<AppState>) -> Json<ReadinessResponse> {
    let sweeper = state.presence.state();
    let status = sweeper_health(sweeper);

    Json(ReadinessResponse {
        status,
        version: env!("CARGO_PKG_VERSION").into(),
        uptime_seconds: SERVER_START.elapsed().as_secs(),
        started_at: SERVER_START_TIME.to_rfc3339(),
        presence: PresenceHealth {
            status,
            sweeper: sweeper.to_string(),
            online_users: state.presence.online_count(),
            tracked_entries: state.presence.tracked_len(),
        },
    })
}

fn sweeper_health(state: TrackerState) -> HealthStatus {
    match state {
        TrackerState::Running => HealthStatus::Healthy,
        TrackerState::Stopped => HealthStatus::Degraded,
    }
}
