//! Presence Handlers
//!
//! Thin adapters from HTTP to the presence tracker.
//!
//! # Endpoints
//! - `POST /api/v1/presence/heartbeat` - Register a heartbeat for the caller
//! - `GET /api/v1/presence/online-count` - Number of users online now
//! - `GET /api/v1/presence/users` - Online users, least recently seen first
//! - `GET /api/v1/presence/users/{user_id}` - Whether one user is reachable

use axum::{
    extract::{rejection::PathRejection, Path, State},
    Extension, Json,
};
use tokio::time::Instant;

use crate::application::dto::{
    HeartbeatResponse, OnlineCountResponse, OnlineUsersResponse, PresenceStatusResponse,
};
use crate::domain::UserId;
use crate::presentation::middleware::AuthUser;
use crate::shared::error::AppError;
use crate::startup::AppState;

/// Register a heartbeat for the authenticated caller
pub async fn heartbeat(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
) -> Json<HeartbeatResponse> {
    state.presence.register_heartbeat(auth.user_id);

    Json(HeartbeatResponse {
        user_id: auth.user_id,
        online: true,
        heartbeat_interval_secs: state.settings.presence.client_heartbeat_interval_secs,
        ttl_secs: state.presence.config().heartbeat_ttl().as_secs(),
        server_time: chrono::Utc::now().to_rfc3339(),
    })
}

/// Aggregate online count for dashboards
pub async fn online_count(State(state): State<AppState>) -> Json<OnlineCountResponse> {
    Json(OnlineCountResponse {
        online_count: state.presence.online_count(),
    })
}

/// Snapshot of online users
pub async fn online_users(State(state): State<AppState>) -> Json<OnlineUsersResponse> {
    let entries = state.presence.online_users();
    Json(OnlineUsersResponse::from_entries(&entries, Instant::now()))
}

/// Reachability check used before routing a call invitation
pub async fn user_status(
    State(state): State<AppState>,
    user_id: Result<Path<UserId>, PathRejection>,
) -> Result<Json<PresenceStatusResponse>, AppError> {
    let Path(user_id) = user_id
        .map_err(|_| AppError::BadRequest("user_id must be an integer".into()))?;

    Ok(Json(PresenceStatusResponse {
        user_id,
        online: state.presence.is_online(user_id),
    }))
}
