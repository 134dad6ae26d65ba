//! Common Test Utilities
//!
//! Shared helpers, fixtures, and test infrastructure.

use std::sync::Arc;

use axum::{
    body::{to_bytes, Body},
    http::{Request, StatusCode},
    Router,
};
use jsonwebtoken::{encode, EncodingKey, Header};
use serde::de::DeserializeOwned;
use tower::ServiceExt;

use presence_service::config::{
    CorsSettings, JwtSettings, LogFormat, PresenceSettings, ServerSettings, Settings,
};
use presence_service::domain::PresenceConfig;
use presence_service::infrastructure::presence::PresenceTracker;
use presence_service::presentation::middleware::Claims;
use presence_service::startup::{build_router, AppState};

pub const TEST_JWT_SECRET: &str = "test-secret-test-secret-test-secret!";

/// Test application builder
pub struct TestApp {
    pub router: Router,
    pub presence: Arc<PresenceTracker>,
}

impl TestApp {
    /// Create a test application around a fresh, stopped tracker
    pub fn new() -> Self {
        let settings = test_settings();
        let config = settings
            .presence
            .to_config()
            .expect("test presence settings are valid");
        let presence = Arc::new(PresenceTracker::new(config));
        let router = build_router(AppState::new(Arc::clone(&presence), settings));

        Self { router, presence }
    }

    /// Make a GET request to the application
    pub async fn get(&self, uri: &str) -> axum::response::Response {
        self.request("GET", uri, None).await
    }

    /// Make an authenticated GET request
    pub async fn get_auth(&self, uri: &str, token: &str) -> axum::response::Response {
        self.request("GET", uri, Some(token)).await
    }

    /// Make an authenticated POST request with an empty body
    pub async fn post_auth(&self, uri: &str, token: &str) -> axum::response::Response {
        self.request("POST", uri, Some(token)).await
    }

    async fn request(
        &self,
        method: &str,
        uri: &str,
        token: Option<&str>,
    ) -> axum::response::Response {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header("Authorization", format!("Bearer {}", token));
        }

        self.router
            .clone()
            .oneshot(builder.body(Body::empty()).unwrap())
            .await
            .unwrap()
    }
}

/// Settings with default presence timings and a known JWT secret
pub fn test_settings() -> Settings {
    Settings {
        server: ServerSettings {
            host: "127.0.0.1".into(),
            port: 0,
        },
        jwt: JwtSettings {
            secret: TEST_JWT_SECRET.into(),
        },
        presence: PresenceSettings {
            heartbeat_ttl_secs: PresenceConfig::default().heartbeat_ttl().as_secs(),
            sweep_interval_secs: PresenceConfig::default().sweep_interval().as_secs(),
            client_heartbeat_interval_secs: 60,
        },
        cors: CorsSettings {
            allowed_origins: vec!["http://localhost:3000".into()],
        },
        environment: "test".into(),
        log_format: LogFormat::Pretty,
    }
}

/// Mint a valid access token for `user_id`
pub fn token_for(user_id: i64) -> String {
    token_with_subject(&user_id.to_string(), 3600)
}

/// Mint a token with an arbitrary subject, expiring `ttl_secs` from now
pub fn token_with_subject(sub: &str, ttl_secs: i64) -> String {
    let now = chrono::Utc::now().timestamp();
    let claims = Claims {
        sub: sub.to_string(),
        exp: now + ttl_secs,
        iat: now,
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(TEST_JWT_SECRET.as_bytes()),
    )
    .unwrap()
}

/// Assert the status and decode the JSON body
pub async fn json_body<T: DeserializeOwned>(
    response: axum::response::Response,
    expected: StatusCode,
) -> T {
    assert_eq!(response.status(), expected);
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}
