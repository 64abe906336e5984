//! Error kinds for authentication and token lifecycle operations.
//!
//! The HTTP layer maps each variant to a status code and a stable machine
//! code. Messages here are deliberately generic: a token failure never says
//! more than its kind.

use thiserror::Error;

/// Authentication and account errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    /// The subject named by a valid refresh token no longer exists.
    #[error("Unknown subject")]
    UnknownSubject,

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("User already exists")]
    UserAlreadyExists,

    #[error("User not found")]
    UserNotFound,
}

/// Token lifecycle errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TokenError {
    /// Bad signature, malformed, wrong issuer/audience, wrong kind or expired.
    #[error("Invalid or expired token")]
    InvalidToken,

    /// Refresh token is unknown to the ledger, already rotated or revoked.
    #[error("Refresh token revoked or expired")]
    RefreshRevokedOrUnknown,

    /// Access token is on the revocation list.
    #[error("Token revoked")]
    TokenRevoked,

    #[error("No token provided")]
    MissingToken,

    #[error("Token generation failed")]
    TokenGenerationFailed,
}
