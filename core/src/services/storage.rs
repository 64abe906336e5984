//! Deadline for storage round trips made on the request path.

use std::future::Future;
use std::time::Duration;
use tracing::warn;

use crate::errors::{DomainError, DomainResult};

/// Await a storage call, mapping an elapsed deadline to [`DomainError::Storage`].
pub(crate) async fn bounded<T, F>(limit: Duration, operation: &'static str, call: F) -> DomainResult<T>
where
    F: Future<Output = DomainResult<T>>,
{
    match tokio::time::timeout(limit, call).await {
        Ok(result) => result,
        Err(_) => {
            warn!(
                operation,
                timeout_ms = limit.as_millis() as u64,
                "Storage call timed out"
            );
            Err(DomainError::storage(format!(
                "{} timed out after {}ms",
                operation,
                limit.as_millis()
            )))
        }
    }
}
