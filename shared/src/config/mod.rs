//! Configuration module with business-specific sub-modules
//!
//! Configuration is read from the environment exactly once at process
//! startup. A missing signing secret is a fatal startup error, never a
//! per-request failure.

pub mod auth;
pub mod database;
pub mod server;

use serde::{Deserialize, Serialize};

use crate::errors::ConfigError;

pub use auth::JwtConfig;
pub use database::DatabaseConfig;
pub use server::ServerConfig;

/// Complete application configuration combining all sub-configurations
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AppConfig {
    /// HTTP server configuration
    pub server: ServerConfig,

    /// Database configuration
    pub database: DatabaseConfig,

    /// JWT signing configuration
    pub jwt: JwtConfig,
}

impl AppConfig {
    /// Load the full configuration from environment variables.
    ///
    /// Fails when a required variable (the JWT signing secret) is absent;
    /// callers are expected to abort startup on error.
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            server: ServerConfig::from_env(),
            database: DatabaseConfig::from_env(),
            jwt: JwtConfig::from_env()?,
        })
    }
}
