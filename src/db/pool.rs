//! Async database connection pool implementation.
//!
//! Uses the bb8 connection pool manager with diesel_async for PostgreSQL
//! connections. Migrations are embedded into the binary and run over a
//! short-lived synchronous connection.

use std::time::Duration;

use diesel_async::AsyncPgConnection;
use diesel_async::pooled_connection::AsyncDieselConnectionManager;
use diesel_async::pooled_connection::bb8::Pool;
use diesel_migrations::{EmbeddedMigrations, embed_migrations};

use crate::config::DatabaseConfig;
use crate::error::AppError;

/// Async connection pool type alias.
///
/// bb8::Pool internally uses Arc, so Clone is cheap. Structures holding
/// AsyncDbPool can derive Clone without additional Arc wrapping.
pub type AsyncDbPool = Pool<AsyncPgConnection>;

/// Migrations compiled into the binary from the `migrations/` directory.
pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

/// Creates an async database connection pool sized from configuration.
///
/// # Errors
///
/// Returns `AppError::ConnectionPool` if the pool cannot be built or the
/// initial connections cannot be established.
pub async fn establish_async_connection_pool(
    config: &DatabaseConfig,
) -> Result<AsyncDbPool, AppError> {
    let manager = AsyncDieselConnectionManager::<AsyncPgConnection>::new(&config.url);

    Pool::builder()
        .max_size(config.max_connections)
        .min_idle(Some(config.min_connections))
        .connection_timeout(Duration::from_secs(config.connection_timeout))
        .build(manager)
        .await
        .map_err(|e| AppError::ConnectionPool {
            source: anyhow::Error::from(e),
        })
}

/// Runs all pending migrations against the configured database.
///
/// diesel_migrations drives a synchronous connection, so the work is moved
/// onto a blocking thread.
pub async fn run_pending_migrations(database_url: &str) -> Result<usize, AppError> {
    let database_url = database_url.to_string();

    tokio::task::spawn_blocking(move || {
        use diesel::Connection;
        use diesel::pg::PgConnection;
        use diesel_migrations::MigrationHarness;

        let mut conn =
            PgConnection::establish(&database_url).map_err(|e| AppError::Database {
                operation: "establish connection for migrations".to_string(),
                source: anyhow::anyhow!("Connection error: {}", e),
            })?;

        let applied = conn
            .run_pending_migrations(MIGRATIONS)
            .map_err(|e| AppError::Database {
                operation: "run pending migrations".to_string(),
                source: anyhow::anyhow!("Migration error: {}", e),
            })?;

        Ok(applied.len())
    })
    .await
    .map_err(|e| AppError::Internal {
        source: anyhow::anyhow!("Migration task panicked: {}", e),
    })?
}
