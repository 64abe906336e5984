//! MySQL implementation of the access token revocation list.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::MySqlPool;

use tg_core::{DomainError, RevocationList, RevokedAccessToken};

use super::query_error;

/// MySQL implementation of [`RevocationList`]
pub struct MySqlRevocationList {
    pool: MySqlPool,
}

impl MySqlRevocationList {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RevocationList for MySqlRevocationList {
    async fn insert(&self, entry: RevokedAccessToken) -> Result<(), DomainError> {
        // A repeated logout keeps the first entry untouched.
        let query = r#"
            INSERT INTO revoked_access_tokens (token_id, subject, expires_at, revoked_at)
            VALUES (?, ?, ?, ?)
            ON DUPLICATE KEY UPDATE token_id = token_id
        "#;

        sqlx::query(query)
            .bind(&entry.token_id)
            .bind(&entry.subject)
            .bind(entry.expires_at)
            .bind(entry.revoked_at)
            .execute(&self.pool)
            .await
            .map_err(|e| query_error("insert revoked access token", e))?;

        Ok(())
    }

    async fn contains(&self, token_id: &str) -> Result<bool, DomainError> {
        let found: Option<i64> = sqlx::query_scalar(
            "SELECT 1 FROM revoked_access_tokens WHERE token_id = ? LIMIT 1",
        )
        .bind(token_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| query_error("check revoked access token", e))?;

        Ok(found.is_some())
    }

    async fn purge_expired(&self, now: DateTime<Utc>) -> Result<u64, DomainError> {
        let result = sqlx::query("DELETE FROM revoked_access_tokens WHERE expires_at <= ?")
            .bind(now)
            .execute(&self.pool)
            .await
            .map_err(|e| query_error("purge revoked access tokens", e))?;

        Ok(result.rows_affected())
    }
}
