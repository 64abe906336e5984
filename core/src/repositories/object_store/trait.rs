//! Durable store for binary payloads keyed by a generated id.

use async_trait::async_trait;

use crate::errors::DomainError;

#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Write (or overwrite) the payload under `key`
    async fn put(&self, key: &str, bytes: Vec<u8>) -> Result<(), DomainError>;

    /// Read the payload under `key`, `Ok(None)` if there is none
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>, DomainError>;

    /// Remove the payload under `key`; `Ok(false)` if there was none
    async fn delete(&self, key: &str) -> Result<bool, DomainError>;
}
