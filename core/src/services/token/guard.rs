//! Request authorization against access tokens

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

use crate::domain::entities::token::TokenKind;
use crate::errors::{DomainResult, TokenError};
use crate::repositories::RevocationList;
use crate::services::storage::bounded;

use super::codec::TokenCodec;

/// Identity established for one request
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AuthorizedSubject {
    pub subject: String,
    /// `jti` of the presented access token
    pub token_id: String,
    pub expires_at: DateTime<Utc>,
}

/// Validates bearer access tokens. Only reads the revocation list.
pub struct AccessGuard {
    codec: Arc<TokenCodec>,
    revocations: Arc<dyn RevocationList>,
    storage_timeout: Duration,
}

impl AccessGuard {
    pub fn new(codec: Arc<TokenCodec>, revocations: Arc<dyn RevocationList>) -> Self {
        let storage_timeout = codec.config().storage_timeout;
        Self {
            codec,
            revocations,
            storage_timeout,
        }
    }

    /// Authorize a request from its `Authorization` header value
    ///
    /// Checks run cheapest first:
    /// 1. `Bearer <token>` present, else `MissingToken`
    /// 2. token parses as an unexpired access token, else `InvalidToken`
    /// 3. token id not on the revocation list, else `TokenRevoked`
    pub async fn authorize(&self, authorization: Option<&str>) -> DomainResult<AuthorizedSubject> {
        let token = authorization
            .and_then(extract_bearer_token)
            .ok_or(TokenError::MissingToken)?;

        self.authorize_token(token).await
    }

    /// Authorize an already extracted token (steps 2 and 3 of [`authorize`](Self::authorize))
    pub async fn authorize_token(&self, token: &str) -> DomainResult<AuthorizedSubject> {
        let claims = self.codec.parse_kind(token, TokenKind::Access)?;

        let revoked = bounded(
            self.storage_timeout,
            "revocations.contains",
            self.revocations.contains(&claims.jti),
        )
        .await?;

        if revoked {
            debug!(token_id = %claims.jti, "Rejected revoked access token");
            return Err(TokenError::TokenRevoked.into());
        }

        let expires_at = claims.expires_at();
        Ok(AuthorizedSubject {
            subject: claims.sub,
            token_id: claims.jti,
            expires_at,
        })
    }
}

/// Extract the token from a `Bearer <token>` header value
pub fn extract_bearer_token(header: &str) -> Option<&str> {
    let token = header.strip_prefix("Bearer ")?.trim();
    if token.is_empty() || token.contains(char::is_whitespace) {
        return None;
    }
    Some(token)
}
