//! # Roster DB
//!
//! PostgreSQL connection pool for the Roster API.
//!
//! # Example
//!
//! ```ignore
//! use roster_config::DatabaseConfig;
//! use roster_db::init_db_pool;
//!
//! let pool = init_db_pool(&DatabaseConfig::from_env()?).await?;
//! ```

use sqlx::postgres::PgPoolOptions;

use roster_config::DatabaseConfig;

/// Opens the connection pool shared by every handler and DAO call.
///
/// The returned pool is cheaply cloneable and belongs in application state.
pub async fn init_db_pool(config: &DatabaseConfig) -> Result<PgPool, sqlx::Error> {
    let pool = PgPoolOptions::new()
        .max_connections(config.max_connections)
        .connect(&config.url)
        .await?;

    tracing::info!(
        max_connections = config.max_connections,
        "Database pool initialized"
    );

    Ok(pool)
}

pub use sqlx::PgPool;
