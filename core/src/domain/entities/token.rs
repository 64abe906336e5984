//! Token entities for JWT-based session management.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Which half of a token pair a JWT is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenKind {
    /// Short-lived credential presented on protected calls
    Access,
    /// Long-lived, single-use credential exchanged for a new pair
    Refresh,
}

impl TokenKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TokenKind::Access => "access",
            TokenKind::Refresh => "refresh",
        }
    }
}

impl std::fmt::Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Claims structure for JWT payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (user ID)
    pub sub: String,

    /// JWT ID, unique per token
    pub jti: String,

    /// Issued at timestamp
    pub iat: i64,

    /// Not before timestamp
    pub nbf: i64,

    /// Expiration timestamp
    pub exp: i64,

    /// Issuer
    pub iss: String,

    /// Audience
    pub aud: String,

    /// Token kind
    pub typ: TokenKind,
}

impl Claims {
    /// Creates claims for a freshly minted token
    ///
    /// # Arguments
    ///
    /// * `subject` - The identity the token is issued to
    /// * `kind` - Access or refresh
    /// * `issued_at` - Issuance instant, taken from the injected clock
    /// * `ttl` - Lifetime of the token
    /// * `issuer` / `audience` - Fixed values from configuration
    ///
    /// # Returns
    ///
    /// Claims carrying a fresh UUID v4 `jti`
    pub fn new(
        subject: &str,
        kind: TokenKind,
        issued_at: DateTime<Utc>,
        ttl: Duration,
        issuer: &str,
        audience: &str,
    ) -> Self {
        let iat = issued_at.timestamp();
        Self {
            sub: subject.to_string(),
            jti: Uuid::new_v4().to_string(),
            iat,
            nbf: iat,
            exp: (issued_at + ttl).timestamp(),
            iss: issuer.to_string(),
            aud: audience.to_string(),
            typ: kind,
        }
    }

    /// Expiry as a timestamp
    pub fn expires_at(&self) -> DateTime<Utc> {
        DateTime::from_timestamp(self.exp, 0).unwrap_or(DateTime::<Utc>::MIN_UTC)
    }

    /// A token is usable iff `now < exp`.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now.timestamp() >= self.exp
    }

    /// Whether `now` is before the not-before claim
    pub fn is_premature_at(&self, now: DateTime<Utc>) -> bool {
        now.timestamp() < self.nbf
    }
}

/// A signed token together with the facts the caller needs about it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssuedToken {
    /// Encoded JWT
    pub token: String,
    /// The `jti` claim
    pub token_id: String,
    pub expires_at: DateTime<Utc>,
}

/// Access and refresh token issued together
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenPair {
    pub access: IssuedToken,
    pub refresh: IssuedToken,
}

impl TokenPair {
    pub fn new(access: IssuedToken, refresh: IssuedToken) -> Self {
        Self { access, refresh }
    }

    pub fn access_token(&self) -> &str {
        &self.access.token
    }

    pub fn refresh_token(&self) -> &str {
        &self.refresh.token
    }

    /// Seconds until the access token expires, measured from `now`
    pub fn access_expires_in(&self, now: DateTime<Utc>) -> i64 {
        (self.access.expires_at - now).num_seconds().max(0)
    }

    /// Seconds until the refresh token expires, measured from `now`
    pub fn refresh_expires_in(&self, now: DateTime<Utc>) -> i64 {
        (self.refresh.expires_at - now).num_seconds().max(0)
    }
}

/// Ledger record of a refresh token, keyed by its `jti`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RefreshTokenEntry {
    /// The refresh token's `jti`
    pub token_id: String,

    /// Owner of the session
    pub subject: String,

    /// Client-supplied device label, carried across rotations
    pub device_tag: Option<String>,

    /// Terminal once set
    pub revoked: bool,

    /// Copied from the token's `exp`
    pub expires_at: DateTime<Utc>,

    pub created_at: DateTime<Utc>,
}

impl RefreshTokenEntry {
    pub fn new(
        token_id: String,
        subject: String,
        device_tag: Option<String>,
        expires_at: DateTime<Utc>,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            token_id,
            subject,
            device_tag,
            revoked: false,
            expires_at,
            created_at,
        }
    }

    /// Not revoked and not past its persisted expiry
    pub fn is_active_at(&self, now: DateTime<Utc>) -> bool {
        !self.revoked && now < self.expires_at
    }
}

/// Access token invalidated before its natural expiry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RevokedAccessToken {
    /// The access token's `jti`
    pub token_id: String,

    pub subject: String,

    /// Copied from the token's `exp`; the entry is useless after this
    pub expires_at: DateTime<Utc>,

    pub revoked_at: DateTime<Utc>,
}

impl RevokedAccessToken {
    pub fn from_claims(claims: &Claims, revoked_at: DateTime<Utc>) -> Self {
        Self {
            token_id: claims.jti.clone(),
            subject: claims.sub.clone(),
            expires_at: claims.expires_at(),
            revoked_at,
        }
    }

    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }
}

/// What a logout actually changed
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RevocationOutcome {
    /// This call flipped a ledger entry to revoked
    pub refresh_revoked: bool,
    /// An access token id was written to the revocation list
    pub access_revoked: bool,
}
