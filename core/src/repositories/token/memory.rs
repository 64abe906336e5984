//! In-memory refresh token ledger

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::entities::token::RefreshTokenEntry;
use crate::errors::DomainError;

use super::r#trait::RefreshTokenLedger;

/// Ledger held in a map behind one lock. Compare-and-set operations take the
/// write lock for their whole duration.
#[derive(Clone, Default)]
pub struct InMemoryRefreshTokenLedger {
    entries: Arc<RwLock<HashMap<String, RefreshTokenEntry>>>,
}

impl InMemoryRefreshTokenLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }
}

#[async_trait]
impl RefreshTokenLedger for InMemoryRefreshTokenLedger {
    async fn insert(&self, entry: RefreshTokenEntry) -> Result<(), DomainError> {
        let mut entries = self.entries.write().await;

        if entries.contains_key(&entry.token_id) {
            return Err(DomainError::storage(format!(
                "duplicate refresh token id {}",
                entry.token_id
            )));
        }

        entries.insert(entry.token_id.clone(), entry);
        Ok(())
    }

    async fn find(&self, token_id: &str) -> Result<Option<RefreshTokenEntry>, DomainError> {
        let entries = self.entries.read().await;
        Ok(entries.get(token_id).cloned())
    }

    async fn revoke(&self, token_id: &str) -> Result<bool, DomainError> {
        let mut entries = self.entries.write().await;
        match entries.get_mut(token_id) {
            Some(entry) if !entry.revoked => {
                entry.revoked = true;
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    async fn rotate(
        &self,
        old_token_id: &str,
        replacement: RefreshTokenEntry,
    ) -> Result<bool, DomainError> {
        let mut entries = self.entries.write().await;

        if entries.contains_key(&replacement.token_id) {
            return Err(DomainError::storage(format!(
                "duplicate refresh token id {}",
                replacement.token_id
            )));
        }

        match entries.get_mut(old_token_id) {
            Some(entry) if !entry.revoked => entry.revoked = true,
            _ => return Ok(false),
        }

        entries.insert(replacement.token_id.clone(), replacement);
        Ok(true)
    }

    async fn find_by_subject(&self, subject: &str) -> Result<Vec<RefreshTokenEntry>, DomainError> {
        let entries = self.entries.read().await;
        let mut owned: Vec<RefreshTokenEntry> = entries
            .values()
            .filter(|e| e.subject == subject)
            .cloned()
            .collect();
        owned.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(owned)
    }

    async fn revoke_all_for_subject(&self, subject: &str) -> Result<u64, DomainError> {
        let mut entries = self.entries.write().await;
        let mut count = 0;

        for entry in entries.values_mut() {
            if entry.subject == subject && !entry.revoked {
                entry.revoked = true;
                count += 1;
            }
        }

        Ok(count)
    }

    async fn purge_expired(&self, expired_before: DateTime<Utc>) -> Result<u64, DomainError> {
        let mut entries = self.entries.write().await;
        let before = entries.len();

        entries.retain(|_, e| e.expires_at >= expired_before);

        Ok((before - entries.len()) as u64)
    }
}
