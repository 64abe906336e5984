//! MySQL repository implementations

mod file_repository_impl;
mod refresh_token_ledger_impl;
mod revocation_list_impl;
mod user_repository_impl;

pub use file_repository_impl::MySqlFileRepository;
pub use refresh_token_ledger_impl::MySqlRefreshTokenLedger;
pub use revocation_list_impl::MySqlRevocationList;
pub use user_repository_impl::MySqlUserRepository;

use tg_core::DomainError;

/// Map a failed query to a storage error, keeping the operation for context
pub(crate) fn query_error(operation: &str, err: sqlx::Error) -> DomainError {
    tracing::error!(operation, error = %err, "Database query failed");
    DomainError::storage(format!("{}: {}", operation, err))
}

/// Map a column decoding failure to an internal error
pub(crate) fn column_error(column: &str, err: sqlx::Error) -> DomainError {
    DomainError::internal(format!("Failed to read column {}: {}", column, err))
}
