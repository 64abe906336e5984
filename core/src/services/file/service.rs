//! File upload, listing, download, replacement and deletion

use std::sync::Arc;
use std::time::Duration;
use tg_shared::{PaginatedResponse, Pagination};
use tracing::{info, warn};
use uuid::Uuid;

use crate::clock::Clock;
use crate::domain::entities::file::FileRecord;
use crate::errors::{DomainError, DomainResult};
use crate::repositories::{FileRepository, ObjectStore};
use crate::services::storage::bounded;

/// An incoming payload with its metadata
#[derive(Debug, Clone)]
pub struct FileUpload {
    pub name: String,
    pub mime_type: Option<String>,
    pub bytes: Vec<u8>,
}

impl FileUpload {
    pub fn new(name: impl Into<String>, mime_type: Option<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            mime_type,
            bytes,
        }
    }

    fn validate(&self) -> DomainResult<()> {
        if self.bytes.is_empty() {
            return Err(DomainError::validation("No file uploaded"));
        }
        if self.name.trim().is_empty() {
            return Err(DomainError::validation("File name is required"));
        }
        Ok(())
    }
}

pub struct FileService {
    files: Arc<dyn FileRepository>,
    store: Arc<dyn ObjectStore>,
    clock: Arc<dyn Clock>,
    storage_timeout: Duration,
}

impl FileService {
    pub fn new(
        files: Arc<dyn FileRepository>,
        store: Arc<dyn ObjectStore>,
        clock: Arc<dyn Clock>,
        storage_timeout: Duration,
    ) -> Self {
        Self {
            files,
            store,
            clock,
            storage_timeout,
        }
    }

    /// Record the metadata, then write the payload under `{id}.{ext}`
    pub async fn upload(&self, upload: FileUpload) -> DomainResult<FileRecord> {
        upload.validate()?;

        let record = FileRecord::new(
            upload.name,
            upload.mime_type,
            upload.bytes.len() as u64,
            self.clock.now(),
        );
        let record = bounded(self.storage_timeout, "files.create", self.files.create(record)).await?;

        let stored = bounded(
            self.storage_timeout,
            "objects.put",
            self.store.put(&record.storage_key(), upload.bytes),
        )
        .await;
        if let Err(e) = stored {
            // Without a payload the record is useless; drop it again.
            if let Err(cleanup) =
                bounded(self.storage_timeout, "files.delete", self.files.delete(record.id)).await
            {
                warn!(
                    file_id = %record.id,
                    error = %cleanup,
                    "Failed to remove record of failed upload"
                );
            }
            return Err(e);
        }

        info!(file_id = %record.id, size = record.size, "File uploaded");
        Ok(record)
    }

    /// Newest first
    pub async fn list(&self, pagination: Pagination) -> DomainResult<PaginatedResponse<FileRecord>> {
        let (items, total) =
            bounded(self.storage_timeout, "files.list", self.files.list(&pagination)).await?;
        Ok(PaginatedResponse::new(items, pagination, total))
    }

    pub async fn get(&self, id: Uuid) -> DomainResult<FileRecord> {
        bounded(self.storage_timeout, "files.find_by_id", self.files.find_by_id(id))
            .await?
            .ok_or_else(|| DomainError::not_found(format!("file {}", id)))
    }

    /// Metadata and payload; `NotFound` if either is missing
    pub async fn download(&self, id: Uuid) -> DomainResult<(FileRecord, Vec<u8>)> {
        let record = self.get(id).await?;

        let bytes = bounded(
            self.storage_timeout,
            "objects.get",
            self.store.get(&record.storage_key()),
        )
        .await?
        .ok_or_else(|| {
            warn!(file_id = %id, "File record has no payload");
            DomainError::not_found(format!("file {} payload", id))
        })?;

        Ok((record, bytes))
    }

    /// Swap the payload and metadata of an existing file, keeping its id
    pub async fn replace(&self, id: Uuid, upload: FileUpload) -> DomainResult<FileRecord> {
        upload.validate()?;
        let mut record = self.get(id).await?;

        self.remove_payload(&record).await;

        record.replace_content(
            upload.name,
            upload.mime_type,
            upload.bytes.len() as u64,
            self.clock.now(),
        );

        let updated = bounded(self.storage_timeout, "files.update", self.files.update(&record)).await?;
        if !updated {
            return Err(DomainError::not_found(format!("file {}", id)));
        }

        bounded(
            self.storage_timeout,
            "objects.put",
            self.store.put(&record.storage_key(), upload.bytes),
        )
        .await?;

        info!(file_id = %id, size = record.size, "File replaced");
        Ok(record)
    }

    pub async fn delete(&self, id: Uuid) -> DomainResult<()> {
        let record = self.get(id).await?;

        self.remove_payload(&record).await;

        let deleted = bounded(self.storage_timeout, "files.delete", self.files.delete(id)).await?;
        if !deleted {
            return Err(DomainError::not_found(format!("file {}", id)));
        }

        info!(file_id = %id, "File deleted");
        Ok(())
    }

    /// Best effort: a missing or undeletable payload is only logged
    async fn remove_payload(&self, record: &FileRecord) {
        let key = record.storage_key();
        match bounded(self.storage_timeout, "objects.delete", self.store.delete(&key)).await {
            Ok(true) => {}
            Ok(false) => warn!(file_id = %record.id, "No payload to delete"),
            Err(e) => warn!(file_id = %record.id, error = %e, "Failed to delete payload"),
        }
    }
}
