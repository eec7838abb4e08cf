use std::str::FromStr;
use std::time::Duration;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
pub use sqlx::SqlitePool as Pool;

use crate::configuration::ApplicationConfiguration;
use crate::services::ServiceError;

/// Build the SQLite connection pool and bring the schema up to date
pub async fn init_sqlite_connection(
    configuration: &ApplicationConfiguration,
) -> Result<Pool, ServiceError> {
    let options = SqliteConnectOptions::from_str(&configuration.database_url)?;

    let pool = SqlitePoolOptions::new()
        .max_connections(configuration.database_max_connections)
        .connect_with(options)
        .await?;

    migrate(&pool).await?;

    Ok(pool)
}

/// Apply the pending migrations
#[tracing::instrument(skip(pool))]
pub async fn migrate(pool: &Pool) -> Result<(), ServiceError> {
    sqlx::migrate!("./migrations").run(pool).await?;

    Ok(())
}

/// An empty, migrated, in-memory database.
///
/// Each SQLite memory connection is its own database, so the pool is pinned to a
/// single connection that is never recycled.
pub async fn init_memory_connection() -> Result<Pool, ServiceError> {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .min_connections(1)
        .idle_timeout(None::<Duration>)
        .max_lifetime(None::<Duration>)
        .connect("sqlite::memory:")
        .await?;

    migrate(&pool).await?;

    Ok(pool)
}
