//! Presence API Tests

use axum::http::StatusCode;
use pretty_assertions::assert_eq;
use test_case::test_case;

use presence_service::application::dto::{
    HeartbeatResponse, OnlineCountResponse, OnlineUsersResponse, PresenceStatusResponse,
};
use presence_service::shared::error::ErrorResponse;

use crate::common::{json_body, token_for, token_with_subject, TestApp};

#[tokio::test]
async fn test_heartbeat_marks_caller_online() {
    let app = TestApp::new();

    let body: HeartbeatResponse = json_body(
        app.post_auth("/api/v1/presence/heartbeat", &token_for(42)).await,
        StatusCode::OK,
    )
    .await;

    assert_eq!(body.user_id, 42);
    assert!(body.online);
    assert_eq!(body.heartbeat_interval_secs, 60);
    assert_eq!(body.ttl_secs, 120);
    assert!(app.presence.is_online(42));
}

#[tokio::test]
async fn test_multiple_sessions_count_once() {
    let app = TestApp::new();
    let token = token_for(7);

    // Several tabs of the same user
    for _ in 0..3 {
        let response = app.post_auth("/api/v1/presence/heartbeat", &token).await;
        assert_eq!(response.status(), StatusCode::OK);
    }

    let body: OnlineCountResponse = json_body(
        app.get_auth("/api/v1/presence/online-count", &token).await,
        StatusCode::OK,
    )
    .await;

    assert_eq!(body.online_count, 1);
}

#[tokio::test]
async fn test_online_count_across_users() {
    let app = TestApp::new();
    for user_id in [1, 2, 3] {
        app.post_auth("/api/v1/presence/heartbeat", &token_for(user_id))
            .await;
    }

    let body: OnlineCountResponse = json_body(
        app.get_auth("/api/v1/presence/online-count", &token_for(1)).await,
        StatusCode::OK,
    )
    .await;

    assert_eq!(body.online_count, 3);
}

#[tokio::test]
async fn test_user_status_online_and_offline() {
    let app = TestApp::new();
    app.presence.register_heartbeat(42);
    let token = token_for(1);

    let online: PresenceStatusResponse = json_body(
        app.get_auth("/api/v1/presence/users/42", &token).await,
        StatusCode::OK,
    )
    .await;
    assert_eq!(online.user_id, 42);
    assert!(online.online);

    // Unknown users are unreachable, not missing
    let offline: PresenceStatusResponse = json_body(
        app.get_auth("/api/v1/presence/users/99", &token).await,
        StatusCode::OK,
    )
    .await;
    assert_eq!(offline.user_id, 99);
    assert!(!offline.online);
}

#[tokio::test]
async fn test_user_status_rejects_non_integer_id() {
    let app = TestApp::new();

    let body: ErrorResponse = json_body(
        app.get_auth("/api/v1/presence/users/abc", &token_for(1)).await,
        StatusCode::BAD_REQUEST,
    )
    .await;

    assert_eq!(body.code, 10002);
}

#[tokio::test]
async fn test_online_users_listing() {
    let app = TestApp::new();
    app.presence.register_heartbeat(10);
    app.presence.register_heartbeat(20);

    let body: OnlineUsersResponse = json_body(
        app.get_auth("/api/v1/presence/users", &token_for(10)).await,
        StatusCode::OK,
    )
    .await;

    assert_eq!(body.online_count, 2);
    let mut users: Vec<i64> = body.users.iter().map(|u| u.user_id).collect();
    users.sort();
    assert_eq!(users, vec![10, 20]);
}

#[test_case("/api/v1/presence/online-count" ; "online count")]
#[test_case("/api/v1/presence/users" ; "online users")]
#[test_case("/api/v1/presence/users/1" ; "user status")]
#[tokio::test]
async fn test_presence_routes_require_token(uri: &str) {
    let app = TestApp::new();

    let response = app.get(uri).await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_heartbeat_rejects_bad_tokens() {
    let app = TestApp::new();

    let expired = app
        .post_auth("/api/v1/presence/heartbeat", &token_with_subject("42", -3600))
        .await;
    let body: ErrorResponse = json_body(expired, StatusCode::UNAUTHORIZED).await;
    assert_eq!(body.message, "Token expired");

    let garbage = app.post_auth("/api/v1/presence/heartbeat", "not-a-jwt").await;
    assert_eq!(garbage.status(), StatusCode::UNAUTHORIZED);

    let bad_subject = app
        .post_auth("/api/v1/presence/heartbeat", &token_with_subject("alice", 3600))
        .await;
    assert_eq!(bad_subject.status(), StatusCode::UNAUTHORIZED);

    assert_eq!(app.presence.tracked_len(), 0);
}
