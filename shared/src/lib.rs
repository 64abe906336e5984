//! Shared configuration and common types for the Tollgate server
//!
//! This crate provides functionality used across all server crates:
//! - Configuration types loaded from the environment
//! - The error response body returned by every endpoint
//! - Pagination parameters for list endpoints

pub mod config;
pub mod errors;
pub mod types;

// Re-export commonly used items at crate root
pub use config::{
    AppConfig, AuthConfig, CleanupConfig, DatabaseConfig, Environment, JwtConfig, LogFormat,
    LoggingConfig, ServerConfig, StorageConfig,
};
pub use errors::{error_codes, ErrorResponse};
pub use types::{PaginatedResponse, Pagination};
