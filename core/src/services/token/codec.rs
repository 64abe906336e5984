//! JWT encoding and verification for access and refresh tokens

use chrono::{DateTime, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use std::sync::Arc;
use tracing::{debug, error};

use crate::clock::Clock;
use crate::domain::entities::token::{Claims, IssuedToken, TokenKind};
use crate::errors::{DomainError, TokenError};

use super::config::TokenServiceConfig;

/// Signs and verifies tokens with a process-wide HS256 secret
///
/// Expiry is checked against the injected [`Clock`] rather than by
/// `jsonwebtoken` itself, so time-dependent behavior is deterministic under
/// test.
pub struct TokenCodec {
    config: TokenServiceConfig,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    clock: Arc<dyn Clock>,
}

impl TokenCodec {
    /// Creates a new codec
    ///
    /// # Arguments
    ///
    /// * `config` - Secret, lifetimes, issuer and audience
    /// * `clock` - Time source for `iat`/`exp` and expiry checks
    ///
    /// # Returns
    ///
    /// A new `TokenCodec`, or `DomainError::Internal` if the secret is empty
    pub fn new(config: TokenServiceConfig, clock: Arc<dyn Clock>) -> Result<Self, DomainError> {
        if config.jwt_secret.is_empty() {
            return Err(DomainError::internal("JWT secret must not be empty"));
        }

        let encoding_key = EncodingKey::from_secret(config.jwt_secret.as_bytes());
        let decoding_key = DecodingKey::from_secret(config.jwt_secret.as_bytes());

        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_issuer(&[config.issuer.as_str()]);
        validation.set_audience(&[config.audience.as_str()]);
        validation.set_required_spec_claims(&["exp", "sub", "iss", "aud"]);
        validation.validate_exp = false;
        validation.validate_nbf = false;
        validation.leeway = 0;

        Ok(Self {
            config,
            encoding_key,
            decoding_key,
            validation,
            clock,
        })
    }

    /// Mint a signed token of the given kind for `subject`
    ///
    /// # Returns
    ///
    /// * `Ok(IssuedToken)` - token, its fresh `jti` and its expiry
    /// * `Err(TokenError::TokenGenerationFailed)` - signing failed
    pub fn issue(&self, subject: &str, kind: TokenKind) -> Result<IssuedToken, DomainError> {
        let claims = Claims::new(
            subject,
            kind,
            self.clock.now(),
            self.config.ttl_for(kind),
            &self.config.issuer,
            &self.config.audience,
        );

        let token = encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key).map_err(
            |e| {
                error!(error = %e, kind = %kind, "Failed to sign token");
                TokenError::TokenGenerationFailed
            },
        )?;

        Ok(IssuedToken {
            token,
            token_id: claims.jti.clone(),
            expires_at: claims.expires_at(),
        })
    }

    /// Verify signature, structure, issuer, audience and `now < exp`
    ///
    /// Every failure is reported as `TokenError::InvalidToken`.
    pub fn parse(&self, token: &str) -> Result<Claims, DomainError> {
        let claims = self.recover_claims(token)?;
        let now = self.clock.now();

        if claims.is_expired_at(now) || claims.is_premature_at(now) {
            debug!(token_id = %claims.jti, "Token outside its validity window");
            return Err(TokenError::InvalidToken.into());
        }

        Ok(claims)
    }

    /// Verify everything except the validity window
    ///
    /// Only for logout, where the id of an already expired access token is
    /// still needed to blacklist it.
    pub fn recover_claims(&self, token: &str) -> Result<Claims, DomainError> {
        decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| {
                debug!(error = %e, "Token rejected");
                TokenError::InvalidToken.into()
            })
    }

    /// Parse and require a specific token kind
    pub fn parse_kind(&self, token: &str, kind: TokenKind) -> Result<Claims, DomainError> {
        let claims = self.parse(token)?;
        if claims.typ != kind {
            debug!(token_id = %claims.jti, expected = %kind, actual = %claims.typ, "Wrong token kind");
            return Err(TokenError::InvalidToken.into());
        }
        Ok(claims)
    }

    pub fn now(&self) -> DateTime<Utc> {
        self.clock.now()
    }

    pub fn config(&self) -> &TokenServiceConfig {
        &self.config
    }
}
