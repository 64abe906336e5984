//! MySQL implementation of the refresh token ledger.
//!
//! Compare-and-set is expressed as `UPDATE ... WHERE revoked = FALSE`: InnoDB
//! row locking serializes concurrent updates of one row, and `rows_affected`
//! tells the caller whether it won.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{mysql::MySqlRow, MySqlPool, Row};

use tg_core::{DomainError, RefreshTokenEntry, RefreshTokenLedger};

use super::{column_error, query_error};

const INSERT_ENTRY: &str = r#"
    INSERT INTO refresh_tokens (
        token_id, subject, device_tag, revoked, expires_at, created_at
    ) VALUES (?, ?, ?, ?, ?, ?)
"#;

const REVOKE_IF_ACTIVE: &str = r#"
    UPDATE refresh_tokens
    SET revoked = TRUE
    WHERE token_id = ? AND revoked = FALSE
"#;

/// MySQL implementation of [`RefreshTokenLedger`]
pub struct MySqlRefreshTokenLedger {
    pool: MySqlPool,
}

impl MySqlRefreshTokenLedger {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    fn row_to_entry(row: &MySqlRow) -> Result<RefreshTokenEntry, DomainError> {
        Ok(RefreshTokenEntry {
            token_id: row.try_get("token_id").map_err(|e| column_error("token_id", e))?,
            subject: row.try_get("subject").map_err(|e| column_error("subject", e))?,
            device_tag: row.try_get("device_tag").map_err(|e| column_error("device_tag", e))?,
            revoked: row.try_get("revoked").map_err(|e| column_error("revoked", e))?,
            expires_at: row
                .try_get::<DateTime<Utc>, _>("expires_at")
                .map_err(|e| column_error("expires_at", e))?,
            created_at: row
                .try_get::<DateTime<Utc>, _>("created_at")
                .map_err(|e| column_error("created_at", e))?,
        })
    }
}

#[async_trait]
impl RefreshTokenLedger for MySqlRefreshTokenLedger {
    async fn insert(&self, entry: RefreshTokenEntry) -> Result<(), DomainError> {
        sqlx::query(INSERT_ENTRY)
            .bind(&entry.token_id)
            .bind(&entry.subject)
            .bind(&entry.device_tag)
            .bind(entry.revoked)
            .bind(entry.expires_at)
            .bind(entry.created_at)
            .execute(&self.pool)
            .await
            .map_err(|e| query_error("insert refresh token", e))?;

        Ok(())
    }

    async fn find(&self, token_id: &str) -> Result<Option<RefreshTokenEntry>, DomainError> {
        let query = r#"
            SELECT token_id, subject, device_tag, revoked, expires_at, created_at
            FROM refresh_tokens
            WHERE token_id = ?
            LIMIT 1
        "#;

        let row = sqlx::query(query)
            .bind(token_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| query_error("find refresh token", e))?;

        row.as_ref().map(Self::row_to_entry).transpose()
    }

    async fn revoke(&self, token_id: &str) -> Result<bool, DomainError> {
        let result = sqlx::query(REVOKE_IF_ACTIVE)
            .bind(token_id)
            .execute(&self.pool)
            .await
            .map_err(|e| query_error("revoke refresh token", e))?;

        Ok(result.rows_affected() > 0)
    }

    async fn rotate(
        &self,
        old_token_id: &str,
        replacement: RefreshTokenEntry,
    ) -> Result<bool, DomainError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| query_error("begin rotation", e))?;

        let revoked = sqlx::query(REVOKE_IF_ACTIVE)
            .bind(old_token_id)
            .execute(&mut *tx)
            .await
            .map_err(|e| query_error("retire rotated refresh token", e))?;

        if revoked.rows_affected() == 0 {
            tx.rollback()
                .await
                .map_err(|e| query_error("roll back rotation", e))?;
            return Ok(false);
        }

        sqlx::query(INSERT_ENTRY)
            .bind(&replacement.token_id)
            .bind(&replacement.subject)
            .bind(&replacement.device_tag)
            .bind(replacement.revoked)
            .bind(replacement.expires_at)
            .bind(replacement.created_at)
            .execute(&mut *tx)
            .await
            .map_err(|e| query_error("insert replacement refresh token", e))?;

        tx.commit()
            .await
            .map_err(|e| query_error("commit rotation", e))?;

        Ok(true)
    }

    async fn find_by_subject(&self, subject: &str) -> Result<Vec<RefreshTokenEntry>, DomainError> {
        let query = r#"
            SELECT token_id, subject, device_tag, revoked, expires_at, created_at
            FROM refresh_tokens
            WHERE subject = ?
            ORDER BY created_at DESC
        "#;

        let rows = sqlx::query(query)
            .bind(subject)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| query_error("find refresh tokens by subject", e))?;

        rows.iter().map(Self::row_to_entry).collect()
    }

    async fn revoke_all_for_subject(&self, subject: &str) -> Result<u64, DomainError> {
        let query = r#"
            UPDATE refresh_tokens
            SET revoked = TRUE
            WHERE subject = ? AND revoked = FALSE
        "#;

        let result = sqlx::query(query)
            .bind(subject)
            .execute(&self.pool)
            .await
            .map_err(|e| query_error("revoke refresh tokens by subject", e))?;

        Ok(result.rows_affected())
    }

    async fn purge_expired(&self, expired_before: DateTime<Utc>) -> Result<u64, DomainError> {
        let result = sqlx::query("DELETE FROM refresh_tokens WHERE expires_at < ?")
            .bind(expired_before)
            .execute(&self.pool)
            .await
            .map_err(|e| query_error("purge refresh tokens", e))?;

        Ok(result.rows_affected())
    }
}
