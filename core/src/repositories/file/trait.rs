//! File metadata repository

use async_trait::async_trait;
use tg_shared::Pagination;
use uuid::Uuid;

use crate::domain::entities::file::FileRecord;
use crate::errors::DomainError;

#[async_trait]
pub trait FileRepository: Send + Sync {
    async fn create(&self, record: FileRecord) -> Result<FileRecord, DomainError>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<FileRecord>, DomainError>;

    /// One page of records, newest first, plus the total record count
    async fn list(&self, pagination: &Pagination) -> Result<(Vec<FileRecord>, u64), DomainError>;

    /// Overwrite an existing record. `Ok(false)` if it does not exist.
    async fn update(&self, record: &FileRecord) -> Result<bool, DomainError>;

    /// `Ok(false)` if it does not exist.
    async fn delete(&self, id: Uuid) -> Result<bool, DomainError>;
}
