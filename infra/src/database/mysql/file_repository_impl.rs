//! MySQL implementation of the file metadata repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{mysql::MySqlRow, MySqlPool, Row};
use tg_shared::Pagination;
use uuid::Uuid;

use tg_core::{DomainError, FileRecord, FileRepository};

use super::{column_error, query_error};

const SELECT_COLUMNS: &str = "id, name, extension, mime_type, size, uploaded_at";

/// MySQL implementation of [`FileRepository`]
pub struct MySqlFileRepository {
    pool: MySqlPool,
}

impl MySqlFileRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    fn row_to_record(row: &MySqlRow) -> Result<FileRecord, DomainError> {
        let id: String = row.try_get("id").map_err(|e| column_error("id", e))?;
        let size: i64 = row.try_get("size").map_err(|e| column_error("size", e))?;

        Ok(FileRecord {
            id: Uuid::parse_str(&id)
                .map_err(|e| DomainError::internal(format!("Invalid file UUID: {}", e)))?,
            name: row.try_get("name").map_err(|e| column_error("name", e))?,
            extension: row.try_get("extension").map_err(|e| column_error("extension", e))?,
            mime_type: row.try_get("mime_type").map_err(|e| column_error("mime_type", e))?,
            size: size.max(0) as u64,
            uploaded_at: row
                .try_get::<DateTime<Utc>, _>("uploaded_at")
                .map_err(|e| column_error("uploaded_at", e))?,
        })
    }
}

#[async_trait]
impl FileRepository for MySqlFileRepository {
    async fn create(&self, record: FileRecord) -> Result<FileRecord, DomainError> {
        let query = r#"
            INSERT INTO files (id, name, extension, mime_type, size, uploaded_at)
            VALUES (?, ?, ?, ?, ?, ?)
        "#;

        sqlx::query(query)
            .bind(record.id.to_string())
            .bind(&record.name)
            .bind(&record.extension)
            .bind(&record.mime_type)
            .bind(record.size as i64)
            .bind(record.uploaded_at)
            .execute(&self.pool)
            .await
            .map_err(|e| query_error("create file", e))?;

        Ok(record)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<FileRecord>, DomainError> {
        let query = format!("SELECT {} FROM files WHERE id = ? LIMIT 1", SELECT_COLUMNS);

        let row = sqlx::query(&query)
            .bind(id.to_string())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| query_error("find file", e))?;

        row.as_ref().map(Self::row_to_record).transpose()
    }

    async fn list(&self, pagination: &Pagination) -> Result<(Vec<FileRecord>, u64), DomainError> {
        let query = format!(
            "SELECT {} FROM files ORDER BY uploaded_at DESC, id DESC LIMIT ? OFFSET ?",
            SELECT_COLUMNS
        );

        let rows = sqlx::query(&query)
            .bind(pagination.limit())
            .bind(pagination.offset())
            .fetch_all(&self.pool)
            .await
            .map_err(|e| query_error("list files", e))?;

        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM files")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| query_error("count files", e))?;

        let records = rows
            .iter()
            .map(Self::row_to_record)
            .collect::<Result<Vec<_>, _>>()?;

        Ok((records, total.max(0) as u64))
    }

    async fn update(&self, record: &FileRecord) -> Result<bool, DomainError> {
        let query = r#"
            UPDATE files
            SET name = ?, extension = ?, mime_type = ?, size = ?, uploaded_at = ?
            WHERE id = ?
        "#;

        let result = sqlx::query(query)
            .bind(&record.name)
            .bind(&record.extension)
            .bind(&record.mime_type)
            .bind(record.size as i64)
            .bind(record.uploaded_at)
            .bind(record.id.to_string())
            .execute(&self.pool)
            .await
            .map_err(|e| query_error("update file", e))?;

        Ok(result.rows_affected() > 0)
    }

    async fn delete(&self, id: Uuid) -> Result<bool, DomainError> {
        let result = sqlx::query("DELETE FROM files WHERE id = ?")
            .bind(id.to_string())
            .execute(&self.pool)
            .await
            .map_err(|e| query_error("delete file", e))?;

        Ok(result.rows_affected() > 0)
    }
}
