//! Shared utilities and common types for the PortalHub server
//!
//! This crate provides functionality used across all server modules:
//! - Configuration types loaded once at process startup
//! - Configuration error types
//! - Common response structures

pub mod config;
pub mod errors;
pub mod types;

// Re-export commonly used items at crate root
pub use config::{AppConfig, DatabaseConfig, JwtConfig, ServerConfig};
pub use errors::ConfigError;
pub use types::response::ErrorResponse;
