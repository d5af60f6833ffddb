use std::time::Duration;

use sqlx::{postgres::PgPoolOptions, PgPool};
use thiserror::Error;
use tracing::info;

use crate::config::{AppConfig, Environment};

/// Errors from DatabaseManager
#[derive(Debug, Error)]
pub enum DatabaseError {
    #[error("Invalid database URL: {0}")]
    InvalidDatabaseUrl(String),

    #[error(transparent)]
    Sqlx(#[from] sqlx::Error),
}

/// Builds and checks the shared connection pool
pub struct DatabaseManager;

impl DatabaseManager {
    /// Name of the database used when running under the test environment
    const TEST_DB_NAME: &'static str = "jobly_test";

    /// Create the pool without connecting; connections are opened on first use
    pub fn connect_lazy(config: &AppConfig) -> Result<PgPool, DatabaseError> {
        let url = Self::database_url(config)?;
        let pool = PgPoolOptions::new()
            .max_connections(config.database.max_connections)
            .acquire_timeout(Duration::from_secs(config.database.connection_timeout))
            .connect_lazy(&url)?;

        info!(
            "Configured database pool (max {} connections)",
            config.database.max_connections
        );
        Ok(pool)
    }

    /// Resolve the connection string, swapping in the test database name
    /// when running under the test environment
    pub fn database_url(config: &AppConfig) -> Result<String, DatabaseError> {
        let base = &config.database.url;
        if !matches!(config.environment, Environment::Test) {
            return Ok(base.clone());
        }

        let mut url = url::Url::parse(base)
            .map_err(|e| DatabaseError::InvalidDatabaseUrl(e.to_string()))?;
        url.set_path(&format!("/{}", Self::TEST_DB_NAME));
        Ok(url.into())
    }

    /// Pings the pool to ensure connectivity
    pub async fn health_check(pool: &PgPool) -> Result<(), DatabaseError> {
        sqlx::query("SELECT 1").execute(pool).await?;
        Ok(())
    }
}
