//! # Configuration Module
//!
//! This module handles application configuration loading and management.
//! Configuration can be loaded from:
//! - Environment variables (prefixed with APP__)
//! - Configuration files (config/default.toml, config/{environment}.toml)
//! - .env files (via dotenvy)
//!
//! ## Usage
//!
//! ```rust,ignore
//! use presence_service::config::Settings;
//!
//! let settings = Settings::load()?;
//! let presence = settings.presence.to_config()?;
//! println!("Users go offline after {:?}", presence.heartbeat_ttl());
//! ```

mod settings;

pub use settings::*;
