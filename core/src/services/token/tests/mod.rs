//! Shared fixtures for token service tests

mod guard_tests;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use std::time::Duration;

use crate::clock::ManualClock;
use crate::domain::entities::token::{RefreshTokenEntry, RevokedAccessToken};
use crate::domain::entities::user::User;
use crate::errors::DomainError;
use crate::repositories::{
    InMemoryRefreshTokenLedger, InMemoryRevocationList, InMemoryUserRepository,
    RefreshTokenLedger, RevocationList, UserRepository,
};

use super::{AccessGuard, SessionManager, TokenCodec, TokenServiceConfig};

pub(super) const SUBJECT: &str = "alice@example.com";

pub(super) fn test_config() -> TokenServiceConfig {
    TokenServiceConfig::default()
        .with_secret("test-secret-for-token-services")
        .with_storage_timeout(Duration::from_millis(200))
}

/// Everything wired against in-memory stores and a manual clock
pub(super) struct Harness {
    pub clock: Arc<ManualClock>,
    pub codec: Arc<TokenCodec>,
    pub ledger: Arc<InMemoryRefreshTokenLedger>,
    pub revocations: Arc<InMemoryRevocationList>,
    pub users: Arc<InMemoryUserRepository>,
    pub sessions: Arc<SessionManager>,
    pub guard: AccessGuard,
}

impl Harness {
    pub async fn new() -> Self {
        let clock = Arc::new(ManualClock::starting_now());
        let codec = Arc::new(TokenCodec::new(test_config(), clock.clone()).unwrap());
        let ledger = Arc::new(InMemoryRefreshTokenLedger::new());
        let revocations = Arc::new(InMemoryRevocationList::new());
        let users = Arc::new(InMemoryUserRepository::new());

        users
            .create(User::new(SUBJECT.to_string(), "hash".to_string(), Utc::now()))
            .await
            .unwrap();

        let sessions = Arc::new(SessionManager::new(
            codec.clone(),
            ledger.clone(),
            revocations.clone(),
            users.clone(),
        ));
        let guard = AccessGuard::new(codec.clone(), revocations.clone());

        Self {
            clock,
            codec,
            ledger,
            revocations,
            users,
            sessions,
            guard,
        }
    }
}

pub(super) fn bearer(token: &str) -> String {
    format!("Bearer {}", token)
}

/// Store whose every call hangs, to exercise storage deadlines
pub(super) struct StalledStore;

async fn stall<T>() -> Result<T, DomainError> {
    tokio::time::sleep(Duration::from_secs(3600)).await;
    Err(DomainError::internal("unreachable"))
}

#[async_trait]
impl RefreshTokenLedger for StalledStore {
    async fn insert(&self, _entry: RefreshTokenEntry) -> Result<(), DomainError> {
        stall().await
    }
    async fn find(&self, _token_id: &str) -> Result<Option<RefreshTokenEntry>, DomainError> {
        stall().await
    }
    async fn revoke(&self, _token_id: &str) -> Result<bool, DomainError> {
        stall().await
    }
    async fn rotate(&self, _old: &str, _new: RefreshTokenEntry) -> Result<bool, DomainError> {
        stall().await
    }
    async fn find_by_subject(&self, _subject: &str) -> Result<Vec<RefreshTokenEntry>, DomainError> {
        stall().await
    }
    async fn revoke_all_for_subject(&self, _subject: &str) -> Result<u64, DomainError> {
        stall().await
    }
    async fn purge_expired(&self, _before: DateTime<Utc>) -> Result<u64, DomainError> {
        stall().await
    }
}

#[async_trait]
impl RevocationList for StalledStore {
    async fn insert(&self, _entry: RevokedAccessToken) -> Result<(), DomainError> {
        stall().await
    }
    async fn contains(&self, _token_id: &str) -> Result<bool, DomainError> {
        stall().await
    }
    async fn purge_expired(&self, _now: DateTime<Utc>) -> Result<u64, DomainError> {
        stall().await
    }
}

/// Store whose every call fails immediately
pub(super) struct BrokenStore;

#[async_trait]
impl RefreshTokenLedger for BrokenStore {
    async fn insert(&self, _entry: RefreshTokenEntry) -> Result<(), DomainError> {
        Err(DomainError::storage("connection refused"))
    }
    async fn find(&self, _token_id: &str) -> Result<Option<RefreshTokenEntry>, DomainError> {
        Err(DomainError::storage("connection refused"))
    }
    async fn revoke(&self, _token_id: &str) -> Result<bool, DomainError> {
        Err(DomainError::storage("connection refused"))
    }
    async fn rotate(&self, _old: &str, _new: RefreshTokenEntry) -> Result<bool, DomainError> {
        Err(DomainError::storage("connection refused"))
    }
    async fn find_by_subject(&self, _subject: &str) -> Result<Vec<RefreshTokenEntry>, DomainError> {
        Err(DomainError::storage("connection refused"))
    }
    async fn revoke_all_for_subject(&self, _subject: &str) -> Result<u64, DomainError> {
        Err(DomainError::storage("connection refused"))
    }
    async fn purge_expired(&self, _before: DateTime<Utc>) -> Result<u64, DomainError> {
        Err(DomainError::storage("connection refused"))
    }
}
