//! In-memory revocation list

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::entities::token::RevokedAccessToken;
use crate::errors::DomainError;

use super::r#trait::RevocationList;

#[derive(Clone, Default)]
pub struct InMemoryRevocationList {
    entries: Arc<RwLock<HashMap<String, RevokedAccessToken>>>,
}

impl InMemoryRevocationList {
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
impl RevocationList for InMemoryRevocationList {
    async fn insert(&self, entry: RevokedAccessToken) -> Result<(), DomainError> {
        let mut entries = self.entries.write().await;
        entries.entry(entry.token_id.clone()).or_insert(entry);
        Ok(())
    }

    async fn contains(&self, token_id: &str) -> Result<bool, DomainError> {
        Ok(self.entries.read().await.contains_key(token_id))
    }

    async fn purge_expired(&self, now: DateTime<Utc>) -> Result<u64, DomainError> {
        let mut entries = self.entries.write().await;
        let before = entries.len();

        entries.retain(|_, e| !e.is_expired_at(now));

        Ok((before - entries.len()) as u64)
    }
}
