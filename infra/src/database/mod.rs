//! Database connection management and repository implementations.

pub mod mysql;

use sqlx::mysql::{MySqlPool, MySqlPoolOptions};
use std::time::Duration;

use ph_shared::config::DatabaseConfig;

pub use mysql::{MySqlClientRepository, MySqlPrincipalRepository};

/// Creates a MySQL connection pool from the startup configuration
pub async fn create_pool(config: &DatabaseConfig) -> Result<MySqlPool, sqlx::Error> {
    tracing::info!(
        max_connections = config.max_connections,
        "connecting to database"
    );

    MySqlPoolOptions::new()
        .max_connections(config.max_connections)
        .acquire_timeout(Duration::from_secs(config.connect_timeout))
        .connect(&config.url)
        .await
}
