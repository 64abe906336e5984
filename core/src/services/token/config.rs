//! Configuration for the token services

use chrono::Duration;
use tg_shared::{JwtConfig, StorageConfig};

use crate::domain::entities::token::TokenKind;

/// Configuration for the token codec and session manager
#[derive(Debug, Clone)]
pub struct TokenServiceConfig {
    /// JWT signing secret (HS256)
    pub jwt_secret: String,
    /// Access token lifetime
    pub access_token_ttl: Duration,
    /// Refresh token lifetime
    pub refresh_token_ttl: Duration,
    pub issuer: String,
    pub audience: String,
    /// Deadline for each ledger / revocation list round trip
    pub storage_timeout: std::time::Duration,
}

impl Default for TokenServiceConfig {
    fn default() -> Self {
        Self {
            jwt_secret: "development-secret-please-change-in-production".to_string(),
            access_token_ttl: Duration::minutes(10),
            refresh_token_ttl: Duration::days(7),
            issuer: "tollgate".to_string(),
            audience: "tollgate-api".to_string(),
            storage_timeout: std::time::Duration::from_millis(5000),
        }
    }
}

impl TokenServiceConfig {
    /// Build from the application-level JWT and storage settings
    pub fn from_settings(jwt: &JwtConfig, storage: &StorageConfig) -> Self {
        Self {
            jwt_secret: jwt.secret.clone(),
            access_token_ttl: Duration::seconds(jwt.access_token_expiry),
            refresh_token_ttl: Duration::seconds(jwt.refresh_token_expiry),
            issuer: jwt.issuer.clone(),
            audience: jwt.audience.clone(),
            storage_timeout: storage.timeout(),
        }
    }

    pub fn with_secret(mut self, secret: impl Into<String>) -> Self {
        self.jwt_secret = secret.into();
        self
    }

    pub fn with_storage_timeout(mut self, timeout: std::time::Duration) -> Self {
        self.storage_timeout = timeout;
        self
    }

    /// Lifetime of a token of the given kind
    pub fn ttl_for(&self, kind: TokenKind) -> Duration {
        match kind {
            TokenKind::Access => self.access_token_ttl,
            TokenKind::Refresh => self.refresh_token_ttl,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_settings() {
        let jwt = JwtConfig::new("s3cret")
            .with_access_expiry_minutes(5)
            .with_refresh_expiry_days(2);
        let storage = StorageConfig {
            timeout_ms: 250,
            ..StorageConfig::default()
        };

        let config = TokenServiceConfig::from_settings(&jwt, &storage);

        assert_eq!(config.jwt_secret, "s3cret");
        assert_eq!(config.ttl_for(TokenKind::Access), Duration::minutes(5));
        assert_eq!(config.ttl_for(TokenKind::Refresh), Duration::days(2));
        assert_eq!(config.storage_timeout, std::time::Duration::from_millis(250));
    }
}
