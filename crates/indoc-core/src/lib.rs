//! inDoc Core Library
//!
//! This crate provides core domain models, error types, configuration, and the
//! content fingerprint function shared across all inDoc components.

pub mod config;
pub mod error;
pub mod fingerprint;
pub mod models;

// Re-export commonly used types
pub use config::Config;
pub use error::{AppError, ErrorMetadata, LogLevel};
pub use fingerprint::content_fingerprint;
