//! MySQL connection pool, schema bootstrap and health reporting

use log::LevelFilter;
use serde::Serialize;
use sqlx::{
    mysql::{MySqlConnectOptions, MySqlPoolOptions},
    ConnectOptions, MySqlPool,
};
use std::fmt;
use std::str::FromStr;
use std::time::Duration;
use tg_shared::DatabaseConfig;
use tracing::{debug, error, info};

use super::schema;
use crate::InfrastructureError;

/// Shared pool plus the settings it was opened with
#[derive(Clone)]
pub struct DatabasePool {
    pool: MySqlPool,
    config: DatabaseConfig,
}

impl DatabasePool {
    /// Open the pool and verify one connection
    ///
    /// Statements are logged at debug level through sqlx's `log` output,
    /// slower ones at warn.
    pub async fn new(config: DatabaseConfig) -> Result<Self, InfrastructureError> {
        let options = MySqlConnectOptions::from_str(&config.url)
            .map_err(|e| InfrastructureError::Config(format!("Invalid database URL: {}", e)))?
            .log_statements(LevelFilter::Debug)
            .log_slow_statements(
                LevelFilter::Warn,
                Duration::from_millis(config.slow_query_threshold),
            );

        let pool = MySqlPoolOptions::new()
            .max_connections(config.max_connections)
            .min_connections(1)
            .acquire_timeout(Duration::from_secs(config.connect_timeout))
            .idle_timeout(Duration::from_secs(config.idle_timeout))
            .max_lifetime(Duration::from_secs(config.max_lifetime))
            .test_before_acquire(true)
            .connect_with(options)
            .await
            .map_err(|e| failed("connect", e))?;

        info!(
            max_connections = config.max_connections,
            "Database connection pool ready"
        );
        Ok(Self { pool, config })
    }

    pub fn get_pool(&self) -> &MySqlPool {
        &self.pool
    }

    pub fn config(&self) -> &DatabaseConfig {
        &self.config
    }

    /// Run every `CREATE TABLE IF NOT EXISTS` statement; safe to repeat
    pub async fn migrate(&self) -> Result<(), InfrastructureError> {
        for statement in schema::ALL {
            sqlx::query(statement)
                .execute(&self.pool)
                .await
                .map_err(|e| failed("migrate", e))?;
        }

        info!(tables = schema::ALL.len(), "Database schema ensured");
        Ok(())
    }

    /// Round-trip a trivial query
    pub async fn health_check(&self) -> Result<bool, InfrastructureError> {
        let value: i64 = sqlx::query_scalar("SELECT 1")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| failed("health_check", e))?;

        debug!("Database health check passed");
        Ok(value == 1)
    }

    pub fn get_statistics(&self) -> PoolStatistics {
        PoolStatistics {
            connections: self.pool.size(),
            idle_connections: self.pool.num_idle(),
            max_connections: self.pool.options().get_max_connections(),
        }
    }

    /// Wait for checked-out connections to return, then close them all
    pub async fn close(&self) {
        self.pool.close().await;
        info!("Database connection pool closed");
    }
}

fn failed(operation: &'static str, e: sqlx::Error) -> InfrastructureError {
    error!(operation, error = %e, "Database pool operation failed");
    InfrastructureError::Database(e)
}

/// Snapshot of pool usage, reported by the health endpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PoolStatistics {
    pub connections: u32,
    pub idle_connections: usize,
    pub max_connections: u32,
}

impl fmt::Display for PoolStatistics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}/{} connections ({} idle)",
            self.connections, self.max_connections, self.idle_connections
        )
    }
}
