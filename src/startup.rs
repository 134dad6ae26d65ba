//! Application Startup
//!
//! Application building, server initialization, and shutdown ordering.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use axum::Router;
use tokio::net::TcpListener;

use crate::config::Settings;
use crate::infrastructure::presence::PresenceTracker;
use crate::presentation::http::{handlers, routes};
use crate::presentation::middleware::{cors, logging};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub presence: Arc<PresenceTracker>,
    pub settings: Arc<Settings>,
}

impl AppState {
    pub fn new(presence: Arc<PresenceTracker>, settings: Settings) -> Self {
        Self {
            presence,
            settings: Arc::new(settings),
        }
    }
}

/// Build the full router with middleware
pub fn build_router(state: AppState) -> Router {
    let cors = cors::create_cors_layer(&state.settings.cors);

    routes::create_router(state)
        .layer(logging::create_trace_layer())
        .layer(cors)
}

/// Application instance
pub struct Application {
    listener: TcpListener,
    router: Router,
    presence: Arc<PresenceTracker>,
}

impl Application {
    /// Build the application from settings
    ///
    /// Starts the presence sweeper; it runs until `run_until_stopped` returns.
    pub async fn build(settings: Settings) -> Result<Self> {
        handlers::health::init_server_start();

        let presence_config = settings.presence.to_config()?;
        let presence = Arc::new(PresenceTracker::new(presence_config));
        presence.start();

        let addr: SocketAddr = settings.server.socket_addr()?;
        let state = AppState::new(Arc::clone(&presence), settings);
        let router = build_router(state);

        // Bind to address
        let listener = TcpListener::bind(addr).await?;
        tracing::info!("Listening on {}", listener.local_addr()?);

        Ok(Self {
            listener,
            router,
            presence,
        })
    }

    /// Run the server until a shutdown signal arrives, then stop the sweeper
    pub async fn run_until_stopped(self) -> Result<()> {
        let served = axum::serve(self.listener, self.router)
            .with_graceful_shutdown(shutdown_signal())
            .await;

        // Stop the sweeper even if serving failed
        self.presence.stop().await;
        tracing::info!(
            online_users = self.presence.online_count(),
            "Presence tracker shut down"
        );

        served?;
        Ok(())
    }

    /// Get the bound address
    pub fn local_addr(&self) -> std::io::Result<SocketAddr> {
        self.listener.local_addr()
    }

    /// The tracker owned by this application
    pub fn presence(&self) -> Arc<PresenceTracker> {
        Arc::clone(&self.presence)
    }
}

/// Resolve on Ctrl-C or SIGTERM
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl-C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
