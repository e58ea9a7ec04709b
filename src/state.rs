//! Application state for the Axum web framework.
//!
//! Shared services and resources accessible across all request handlers.

use crate::config::JwtConfig;
use crate::db::AsyncDbPool;
use crate::repositories::Repositories;
use crate::services::Services;

/// Application state used with Axum's State extractor.
///
/// Cloning is cheap: repositories, services, and the pool all share one
/// `Arc`-backed bb8 pool underneath.
#[derive(Clone)]
pub struct AppState {
    /// Business logic services (user accounts)
    pub services: Services,
    /// Direct repository access for the plain data-access endpoints
    pub repos: Repositories,
    /// Database connection pool, used by health checks
    pub db_pool: AsyncDbPool,
    /// JWT configuration for token generation and validation
    pub jwt_config: JwtConfig,
}

impl AppState {
    /// Creates a new AppState from a database connection pool and JWT config.
    pub fn new(pool: AsyncDbPool, jwt_config: JwtConfig) -> Self {
        let repos = Repositories::new(pool.clone());
        let services = Services::new(&repos);
        Self {
            services,
            repos,
            db_pool: pool,
            jwt_config,
        }
    }
}
