//! # Infrastructure Layer
//!
//! Concrete implementations of the repository traits defined in `tg_core`:
//!
//! - **Database**: MySQL connection pool, schema bootstrap and repositories using SQLx
//! - **Storage**: disk-backed object store for uploaded file payloads

use tg_core::DomainError;

/// Database module - MySQL implementations using SQLx
pub mod database;

/// Storage module - object store backends
pub mod storage;

pub use database::{
    DatabasePool, MySqlFileRepository, MySqlRefreshTokenLedger, MySqlRevocationList,
    MySqlUserRepository, PoolStatistics,
};
pub use storage::DiskObjectStore;

/// Infrastructure-specific error types
#[derive(Debug, thiserror::Error)]
pub enum InfrastructureError {
    /// Database connection error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Filesystem error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<InfrastructureError> for DomainError {
    fn from(err: InfrastructureError) -> Self {
        match err {
            InfrastructureError::Config(message) => DomainError::Internal { message },
            other => DomainError::storage(other),
        }
    }
}
