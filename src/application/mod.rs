//! Application Layer
//!
//! Data transfer objects shaping what the presence endpoints return.

pub mod dto;
