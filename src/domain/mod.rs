//! # Domain Layer
//!
//! Core presence concepts, independent of the HTTP surface and of how the
//! table is stored.
//!
//! ## Structure
//!
//! - **entities**: Presence entries and tracker lifecycle state
//! - **value_objects**: Presence timing configuration

pub mod entities;
pub mod value_objects;

// Re-export commonly used types
pub use entities::*;
pub use value_objects::*;
