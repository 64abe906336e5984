use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use tg_core::FileRecord;
use tg_shared::Pagination;

/// `?name=` on upload and update
#[derive(Debug, Clone, Deserialize)]
pub struct FileNameQuery {
    pub name: Option<String>,
}

/// `?page=&list_size=` on listing
#[derive(Debug, Clone, Deserialize)]
pub struct FileListQuery {
    pub page: Option<u32>,
    pub list_size: Option<u32>,
}

impl FileListQuery {
    pub fn pagination(&self) -> Pagination {
        Pagination::from_query(self.page, self.list_size)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileResponse {
    pub id: Uuid,
    pub name: String,
    pub extension: String,
    pub mime_type: Option<String>,
    pub size: u64,
    pub uploaded_at: DateTime<Utc>,
}

impl From<FileRecord> for FileResponse {
    fn from(record: FileRecord) -> Self {
        Self {
            id: record.id,
            name: record.name,
            extension: record.extension,
            mime_type: record.mime_type,
            size: record.size,
            uploaded_at: record.uploaded_at,
        }
    }
}

/// Upload and update result
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileActionResponse {
    pub message: String,
    pub file: FileResponse,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileDetailResponse {
    pub file: FileResponse,
}
