//! Database connection pool management
//!
//! Uses sqlx PgPool with explicit connection limits. The pool is created
//! once by the caller and handed to [`crate::PgStore`]; nothing in this
//! crate holds a global pool.

use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;

use crate::config::DbConfig;
use crate::error::Result;

/// Create a PostgreSQL connection pool from configuration.
///
/// # Errors
///
/// Returns an error if the configuration is invalid or the connection fails.
///
/// # Example
///
/// ```ignore
/// let pool = create_pool(&DbConfig::load()?).await?;
/// ```
pub async fn create_pool(config: &DbConfig) -> Result<PgPool> {
    create_pool_with_options(config, config.max_connections).await
}

/// Create a PostgreSQL connection pool with a custom connection limit.
pub async fn create_pool_with_options(config: &DbConfig, max_connections: u32) -> Result<PgPool> {
    let options = config.connect_options()?;

    tracing::debug!(
        host = options.get_host(),
        database = options.get_database().unwrap_or_default(),
        max_connections,
        "connecting to postgres"
    );

    let pool = PgPoolOptions::new()
        .max_connections(max_connections)
        .acquire_timeout(config.acquire_timeout())
        .connect_with(options)
        .await?;
    Ok(pool)
}
