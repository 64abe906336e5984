use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use tg_core::{RefreshTokenEntry, TokenPair, User};

/// Body of sign-up and sign-in
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CredentialsRequest {
    /// Email address or phone number
    #[validate(length(min = 1, max = 255))]
    pub id: String,

    #[validate(length(min = 1, max = 128))]
    pub password: String,
}

/// Refresh token sent in the body when the cookie is not available
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RefreshTokenRequest {
    #[serde(default, alias = "refresh_token")]
    pub refresh_token: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthResponse {
    pub message: String,
    pub access_token: String,
    pub refresh_token: String,
    /// Seconds until the access token expires
    pub expires_in: i64,
    /// Seconds until the refresh token expires
    pub refresh_expires_in: i64,
}

impl AuthResponse {
    pub fn from_pair(message: impl Into<String>, pair: &TokenPair, now: DateTime<Utc>) -> Self {
        Self {
            message: message.into(),
            access_token: pair.access_token().to_string(),
            refresh_token: pair.refresh_token().to_string(),
            expires_in: pair.access_expires_in(now),
            refresh_expires_in: pair.refresh_expires_in(now),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LogoutResponse {
    pub message: String,
    pub refresh_revoked: bool,
    pub access_revoked: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LogoutAllResponse {
    pub message: String,
    /// Refresh tokens revoked by the call
    pub sessions_revoked: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

/// One active refresh token of the caller
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionResponse {
    pub session_id: String,
    pub device_tag: Option<String>,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

impl From<RefreshTokenEntry> for SessionResponse {
    fn from(entry: RefreshTokenEntry) -> Self {
        Self {
            session_id: entry.token_id,
            device_tag: entry.device_tag,
            created_at: entry.created_at,
            expires_at: entry.expires_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionListResponse {
    pub sessions: Vec<SessionResponse>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub id: String,
    pub created_at: DateTime<Utc>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            created_at: user.created_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InfoResponse {
    pub user: UserResponse,
}
