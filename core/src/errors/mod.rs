//! Domain-specific error types and error handling.

mod types;

pub use types::{AuthError, TokenError};

use std::fmt::Display;
use thiserror::Error;

/// Core domain errors
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("Resource not found: {resource}")]
    NotFound { resource: String },

    /// Persistence failure or timeout. The only retryable kind.
    #[error("Storage error: {message}")]
    Storage { message: String },

    #[error("Internal error: {message}")]
    Internal { message: String },

    // Bridge to specific error types
    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error(transparent)]
    Token(#[from] TokenError),
}

impl DomainError {
    pub fn validation(message: impl Display) -> Self {
        Self::Validation {
            message: message.to_string(),
        }
    }

    pub fn not_found(resource: impl Display) -> Self {
        Self::NotFound {
            resource: resource.to_string(),
        }
    }

    pub fn storage(message: impl Display) -> Self {
        Self::Storage {
            message: message.to_string(),
        }
    }

    pub fn internal(message: impl Display) -> Self {
        Self::Internal {
            message: message.to_string(),
        }
    }

    /// Whether the caller may retry the same request unchanged.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Storage { .. })
    }

    pub fn token_error(&self) -> Option<&TokenError> {
        match self {
            Self::Token(err) => Some(err),
            _ => None,
        }
    }

    pub fn auth_error(&self) -> Option<&AuthError> {
        match self {
            Self::Auth(err) => Some(err),
            _ => None,
        }
    }
}

pub type DomainResult<T> = Result<T, DomainError>;
