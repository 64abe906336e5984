//! In-memory file metadata repository

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tg_shared::Pagination;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::entities::file::FileRecord;
use crate::errors::DomainError;

use super::r#trait::FileRepository;

#[derive(Clone, Default)]
pub struct InMemoryFileRepository {
    files: Arc<RwLock<HashMap<Uuid, FileRecord>>>,
}

impl InMemoryFileRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl FileRepository for InMemoryFileRepository {
    async fn create(&self, record: FileRecord) -> Result<FileRecord, DomainError> {
        let mut files = self.files.write().await;

        if files.contains_key(&record.id) {
            return Err(DomainError::storage(format!("duplicate file id {}", record.id)));
        }

        files.insert(record.id, record.clone());
        Ok(record)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<FileRecord>, DomainError> {
        Ok(self.files.read().await.get(&id).cloned())
    }

    async fn list(&self, pagination: &Pagination) -> Result<(Vec<FileRecord>, u64), DomainError> {
        let files = self.files.read().await;

        let mut all: Vec<&FileRecord> = files.values().collect();
        all.sort_by(|a, b| {
            b.uploaded_at
                .cmp(&a.uploaded_at)
                .then_with(|| b.id.cmp(&a.id))
        });

        let page = all
            .into_iter()
            .skip(pagination.offset() as usize)
            .take(pagination.limit() as usize)
            .cloned()
            .collect();

        Ok((page, files.len() as u64))
    }

    async fn update(&self, record: &FileRecord) -> Result<bool, DomainError> {
        let mut files = self.files.write().await;
        match files.get_mut(&record.id) {
            Some(existing) => {
                *existing = record.clone();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete(&self, id: Uuid) -> Result<bool, DomainError> {
        Ok(self.files.write().await.remove(&id).is_some())
    }
}
