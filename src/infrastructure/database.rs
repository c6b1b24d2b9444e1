//! PostgreSQL connection pool and schema migrations

use sqlx::postgres::{PgPool, PgPoolOptions};
use std::time::Duration;
use tracing::info;

use crate::config::DatabaseConfig;
use crate::domain::StoreError;

const ACQUIRE_TIMEOUT: Duration = Duration::from_secs(30);

/// Connect to PostgreSQL and apply the bundled migrations
pub async fn connect(url: &str, config: &DatabaseConfig) -> Result<PgPool, StoreError> {
    let pool = PgPoolOptions::new()
        .max_connections(config.max_connections)
        .acquire_timeout(ACQUIRE_TIMEOUT)
        .connect(url)
        .await
        .map_err(|e| StoreError::storage(format!("Failed to connect to PostgreSQL: {}", e)))?;

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .map_err(|e| StoreError::storage(format!("Failed to run migrations: {}", e)))?;

    info!(max_connections = config.max_connections, "PostgreSQL pool ready");

    Ok(pool)
}
