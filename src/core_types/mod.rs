//! Core types shared across layers
//!
//! ## Organization
//! - `port` - The `Port` record and its validation rules

pub mod port;

// Re-export commonly used types
pub use port::{Port, ValidationError};
