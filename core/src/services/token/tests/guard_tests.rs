//! Unit tests for the access guard

use chrono::Duration;
use std::sync::Arc;

use crate::clock::Clock;
use crate::domain::entities::token::{RevokedAccessToken, TokenKind};
use crate::errors::{DomainError, TokenError};
use crate::repositories::RevocationList;
use crate::services::token::AccessGuard;

use super::{bearer, Harness, StalledStore, SUBJECT};

async fn authorize_err(guard: &AccessGuard, header: Option<&str>) -> DomainError {
    guard.authorize(header).await.unwrap_err()
}

#[tokio::test]
async fn test_missing_or_malformed_header() {
    let h = Harness::new().await;

    for header in [None, Some(""), Some("Bearer "), Some("Token abc"), Some("abc")] {
        let err = authorize_err(&h.guard, header).await;
        assert!(
            matches!(err, DomainError::Token(TokenError::MissingToken)),
            "header {:?} gave {:?}",
            header,
            err
        );
    }
}

#[tokio::test]
async fn test_refresh_token_is_not_an_access_token() {
    let h = Harness::new().await;
    let pair = h.sessions.issue(SUBJECT, None).await.unwrap();

    let err = authorize_err(&h.guard, Some(&bearer(pair.refresh_token()))).await;

    assert!(matches!(err, DomainError::Token(TokenError::InvalidToken)));
}

#[tokio::test]
async fn test_revoked_access_token() {
    let h = Harness::new().await;
    let access = h.codec.issue(SUBJECT, TokenKind::Access).unwrap();
    let claims = h.codec.parse(&access.token).unwrap();
    h.revocations
        .insert(RevokedAccessToken::from_claims(&claims, h.clock.now()))
        .await
        .unwrap();

    let err = authorize_err(&h.guard, Some(&bearer(&access.token))).await;

    assert!(matches!(err, DomainError::Token(TokenError::TokenRevoked)));
}

#[tokio::test]
async fn test_revocation_of_other_token_does_not_leak() {
    let h = Harness::new().await;
    let first = h.sessions.issue(SUBJECT, None).await.unwrap();
    let second = h.sessions.issue(SUBJECT, None).await.unwrap();

    h.sessions.revoke(None, Some(first.access_token())).await.unwrap();

    let ctx = h
        .guard
        .authorize(Some(&bearer(second.access_token())))
        .await
        .unwrap();
    assert_eq!(ctx.token_id, second.access.token_id);
}

#[tokio::test]
async fn test_context_carries_expiry() {
    let h = Harness::new().await;
    let pair = h.sessions.issue(SUBJECT, None).await.unwrap();

    let ctx = h
        .guard
        .authorize_token(pair.access_token())
        .await
        .unwrap();

    assert_eq!(ctx.expires_at, h.clock.now() + Duration::minutes(10));
}

#[tokio::test(start_paused = true)]
async fn test_invalid_token_rejected_before_storage() {
    let h = Harness::new().await;
    let guard = AccessGuard::new(h.codec.clone(), Arc::new(StalledStore));

    let err = authorize_err(&guard, Some("Bearer not.a.token")).await;
    assert!(matches!(err, DomainError::Token(TokenError::InvalidToken)));

    let pair = h.sessions.issue(SUBJECT, None).await.unwrap();
    let err = authorize_err(&guard, Some(&bearer(pair.access_token()))).await;
    assert!(matches!(err, DomainError::Storage { .. }));
}
