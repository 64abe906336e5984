//! Refresh token ledger: the durable record used to detect refresh token reuse.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::entities::token::RefreshTokenEntry;
use crate::errors::DomainError;

/// Persistence contract for refresh token state
///
/// One entry per `token_id`. `revoked = true` is terminal: no operation may
/// flip it back. Entries are never deleted on the request path, only by
/// [`purge_expired`](RefreshTokenLedger::purge_expired).
#[async_trait]
pub trait RefreshTokenLedger: Send + Sync {
    /// Insert a new entry
    ///
    /// # Returns
    /// * `Err(DomainError::Storage)` - duplicate `token_id` or store failure
    async fn insert(&self, entry: RefreshTokenEntry) -> Result<(), DomainError>;

    /// Look up an entry by token id
    async fn find(&self, token_id: &str) -> Result<Option<RefreshTokenEntry>, DomainError>;

    /// Compare-and-set revoke
    ///
    /// # Returns
    /// * `Ok(true)` - this call flipped `revoked` from false to true
    /// * `Ok(false)` - the entry is absent or was already revoked
    async fn revoke(&self, token_id: &str) -> Result<bool, DomainError>;

    /// Retire `old_token_id` and record `replacement` as one atomic step
    ///
    /// Of any number of concurrent calls for the same `old_token_id`, at most
    /// one returns `Ok(true)`. When the compare-and-set loses, nothing is
    /// inserted and `Ok(false)` is returned.
    async fn rotate(
        &self,
        old_token_id: &str,
        replacement: RefreshTokenEntry,
    ) -> Result<bool, DomainError>;

    /// Every entry of a subject, revoked or not, newest first
    async fn find_by_subject(&self, subject: &str) -> Result<Vec<RefreshTokenEntry>, DomainError>;

    /// Revoke every non-revoked entry of a subject
    ///
    /// # Returns
    /// Number of entries this call flipped
    async fn revoke_all_for_subject(&self, subject: &str) -> Result<u64, DomainError>;

    /// Delete entries whose `expires_at` is before `expired_before`
    async fn purge_expired(&self, expired_before: DateTime<Utc>) -> Result<u64, DomainError>;
}
