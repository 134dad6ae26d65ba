//! # Presence Service Library
//!
//! Tracks which users of the language exchange platform are online, based on
//! periodic client heartbeats:
//! - In-memory presence table with TTL-based liveness
//! - Background sweeper evicting expired entries, with explicit start/stop
//! - HTTP endpoints for heartbeats, online counts, and reachability checks
//!
//! ## Module Structure
//!
//! ```text
//! presence_service/
//! +-- config/         Configuration management
//! +-- domain/         Presence entries and timing configuration
//! +-- application/    Response DTOs
//! +-- infrastructure/ Presence table, tracker, metrics
//! +-- presentation/   HTTP routes and middleware
//! +-- shared/         Common utilities (errors)
//! ```
//!
//! ## Embedding the tracker
//!
//! ```rust,ignore
//! use presence_service::domain::PresenceConfig;
//! use presence_service::infrastructure::presence::PresenceTracker;
//!
//! let tracker = PresenceTracker::new(PresenceConfig::default());
//! tracker.start();
//! tracker.register_heartbeat(42);
//! assert!(tracker.is_online(42));
//! tracker.stop().await;
//! ```

// Configuration module
pub mod config;

// Domain layer - Presence concepts
pub mod domain;

// Application layer - DTOs
pub mod application;

// Infrastructure layer - Presence tracking and metrics
pub mod infrastructure;

// Presentation layer - HTTP handlers
pub mod presentation;

// Shared utilities
pub mod shared;

// Application startup and state management
pub mod startup;

// Telemetry and observability
pub mod telemetry;
