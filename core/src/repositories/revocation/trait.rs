//! Revocation list: access token ids invalidated before their natural expiry.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::entities::token::RevokedAccessToken;
use crate::errors::DomainError;

/// Persistence contract for revoked access tokens
///
/// Entries are written on logout and never mutated. An entry only matters
/// until the token's own expiry, after which the codec rejects the token
/// anyway and the entry may be purged.
#[async_trait]
pub trait RevocationList: Send + Sync {
    /// Record a revoked access token. Inserting an id that is already present
    /// succeeds and leaves the existing entry unchanged.
    async fn insert(&self, entry: RevokedAccessToken) -> Result<(), DomainError>;

    /// Whether the token id has been revoked
    async fn contains(&self, token_id: &str) -> Result<bool, DomainError>;

    /// Delete entries whose `expires_at` is not after `now`
    async fn purge_expired(&self, now: DateTime<Utc>) -> Result<u64, DomainError>;
}
