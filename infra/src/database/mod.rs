//! Database module - MySQL implementations using SQLx
//!
//! - Connection pool management
//! - Idempotent schema bootstrap
//! - Repository implementations

pub mod connection;
pub mod mysql;
pub mod schema;


// Re-export commonly used types
pub use connection::{DatabasePool, PoolStatistics};
pub use mysql::{
    MySqlFileRepository, MySqlRefreshTokenLedger, MySqlRevocationList, MySqlUserRepository,
};
