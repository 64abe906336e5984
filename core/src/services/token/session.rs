//! Session lifecycle: issue, rotate and revoke token pairs

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};

use crate::domain::entities::token::{
    RefreshTokenEntry, RevocationOutcome, RevokedAccessToken, TokenKind, TokenPair,
};
use crate::errors::{AuthError, DomainError, DomainResult, TokenError};
use crate::repositories::{RefreshTokenLedger, RevocationList, UserRepository};
use crate::services::storage::bounded;

use super::codec::TokenCodec;

/// Owns the refresh token ledger and the revocation list
///
/// The manager keeps no mutable state of its own; everything that changes
/// lives behind the repositories, so one instance is shared across workers.
pub struct SessionManager {
    codec: Arc<TokenCodec>,
    ledger: Arc<dyn RefreshTokenLedger>,
    revocations: Arc<dyn RevocationList>,
    users: Arc<dyn UserRepository>,
    storage_timeout: Duration,
}

impl SessionManager {
    pub fn new(
        codec: Arc<TokenCodec>,
        ledger: Arc<dyn RefreshTokenLedger>,
        revocations: Arc<dyn RevocationList>,
        users: Arc<dyn UserRepository>,
    ) -> Self {
        let storage_timeout = codec.config().storage_timeout;
        Self {
            codec,
            ledger,
            revocations,
            users,
            storage_timeout,
        }
    }

    /// Issue a new access/refresh pair and record the refresh token
    ///
    /// # Arguments
    ///
    /// * `subject` - Identity the session belongs to
    /// * `device_tag` - Optional client label, carried across rotations
    ///
    /// # Returns
    ///
    /// * `Ok(TokenPair)` - both tokens, each with its own id
    /// * `Err(DomainError::Storage)` - the ledger insert failed or timed out
    pub async fn issue(&self, subject: &str, device_tag: Option<String>) -> DomainResult<TokenPair> {
        let pair = self.mint_pair(subject)?;
        let entry = RefreshTokenEntry::new(
            pair.refresh.token_id.clone(),
            subject.to_string(),
            device_tag,
            pair.refresh.expires_at,
            self.codec.now(),
        );

        self.storage("ledger.insert", self.ledger.insert(entry)).await?;

        info!(
            subject = %subject,
            refresh_token_id = %pair.refresh.token_id,
            "Issued token pair"
        );
        Ok(pair)
    }

    /// Exchange a refresh token for a fresh pair
    ///
    /// # Returns
    ///
    /// * `Err(TokenError::InvalidToken)` - bad signature, expired, or not a refresh token
    /// * `Err(TokenError::RefreshRevokedOrUnknown)` - no active ledger entry, or
    ///   a concurrent rotation of the same token won
    /// * `Err(AuthError::UnknownSubject)` - the session owner no longer exists
    pub async fn rotate(&self, refresh_token: &str) -> DomainResult<TokenPair> {
        let claims = self.codec.parse_kind(refresh_token, TokenKind::Refresh)?;
        let now = self.codec.now();

        let entry = match self.storage("ledger.find", self.ledger.find(&claims.jti)).await? {
            Some(entry) if entry.revoked => {
                warn!(
                    token_id = %entry.token_id,
                    subject = %entry.subject,
                    "Refresh token reuse detected"
                );
                return Err(TokenError::RefreshRevokedOrUnknown.into());
            }
            Some(entry) if !entry.is_active_at(now) => {
                debug!(token_id = %entry.token_id, "Ledger entry past its expiry");
                return Err(TokenError::RefreshRevokedOrUnknown.into());
            }
            Some(entry) => entry,
            None => {
                debug!(token_id = %claims.jti, "Refresh token not in ledger");
                return Err(TokenError::RefreshRevokedOrUnknown.into());
            }
        };

        // The ledger entry, not the token, says who owns the session.
        let subject = entry.subject.clone();
        if self
            .storage("users.find_by_id", self.users.find_by_id(&subject))
            .await?
            .is_none()
        {
            warn!(subject = %subject, "Rotation for a subject that no longer exists");
            return Err(AuthError::UnknownSubject.into());
        }

        let pair = self.mint_pair(&subject)?;
        let replacement = RefreshTokenEntry::new(
            pair.refresh.token_id.clone(),
            subject.clone(),
            entry.device_tag.clone(),
            pair.refresh.expires_at,
            now,
        );

        let rotated = self
            .storage("ledger.rotate", self.ledger.rotate(&entry.token_id, replacement))
            .await?;

        if !rotated {
            warn!(
                token_id = %entry.token_id,
                subject = %subject,
                "Concurrent rotation lost, possible refresh token replay"
            );
            return Err(TokenError::RefreshRevokedOrUnknown.into());
        }

        info!(
            subject = %subject,
            old_token_id = %entry.token_id,
            new_token_id = %pair.refresh.token_id,
            "Rotated refresh token"
        );
        Ok(pair)
    }

    /// Logout: revoke whichever of the two tokens were presented
    ///
    /// Tokens that do not parse are ignored, as are refresh tokens without an
    /// active ledger entry. An expired access token is still recorded on the
    /// revocation list. Only storage failures propagate.
    pub async fn revoke(
        &self,
        refresh_token: Option<&str>,
        access_token: Option<&str>,
    ) -> DomainResult<RevocationOutcome> {
        let mut outcome = RevocationOutcome::default();

        if let Some(token) = refresh_token.filter(|t| !t.is_empty()) {
            match self.codec.parse_kind(token, TokenKind::Refresh) {
                Ok(claims) => {
                    outcome.refresh_revoked = self
                        .storage("ledger.revoke", self.ledger.revoke(&claims.jti))
                        .await?;
                }
                Err(_) => debug!("Ignoring unusable refresh token on logout"),
            }
        }

        if let Some(token) = access_token.filter(|t| !t.is_empty()) {
            let claims = self
                .codec
                .parse(token)
                .or_else(|_| self.codec.recover_claims(token));

            match claims {
                Ok(claims) if claims.typ == TokenKind::Access => {
                    let entry = RevokedAccessToken::from_claims(&claims, self.codec.now());
                    self.storage("revocations.insert", self.revocations.insert(entry))
                        .await?;
                    outcome.access_revoked = true;
                }
                Ok(_) => debug!("Ignoring non-access token presented as access token"),
                Err(_) => debug!("Ignoring unusable access token on logout"),
            }
        }

        info!(
            refresh_revoked = outcome.refresh_revoked,
            access_revoked = outcome.access_revoked,
            "Processed logout"
        );
        Ok(outcome)
    }

    /// Revoke every active refresh token of a subject
    ///
    /// # Returns
    ///
    /// Number of sessions ended by this call
    pub async fn revoke_all(&self, subject: &str) -> DomainResult<u64> {
        let count = self
            .storage(
                "ledger.revoke_all_for_subject",
                self.ledger.revoke_all_for_subject(subject),
            )
            .await?;

        info!(subject = %subject, sessions = count, "Revoked all sessions");
        Ok(count)
    }

    /// Active (not revoked, not expired) ledger entries of a subject
    pub async fn active_sessions(&self, subject: &str) -> DomainResult<Vec<RefreshTokenEntry>> {
        let now = self.codec.now();
        let entries = self
            .storage("ledger.find_by_subject", self.ledger.find_by_subject(subject))
            .await?;

        Ok(entries.into_iter().filter(|e| e.is_active_at(now)).collect())
    }

    pub fn codec(&self) -> &Arc<TokenCodec> {
        &self.codec
    }

    fn mint_pair(&self, subject: &str) -> DomainResult<TokenPair> {
        let access = self.codec.issue(subject, TokenKind::Access)?;
        let refresh = self.codec.issue(subject, TokenKind::Refresh)?;
        Ok(TokenPair::new(access, refresh))
    }

    async fn storage<T, F>(&self, operation: &'static str, call: F) -> DomainResult<T>
    where
        F: Future<Output = Result<T, DomainError>>,
    {
        bounded(self.storage_timeout, operation, call).await
    }
}
