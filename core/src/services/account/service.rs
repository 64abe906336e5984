//! Account registration and password verification

use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, error, info};

use crate::clock::Clock;
use crate::domain::entities::user::User;
use crate::errors::{AuthError, DomainError, DomainResult};
use crate::repositories::UserRepository;
use crate::services::storage::bounded;

use super::identity::{is_valid_identity, validate_password};

/// Checks an `(identity, secret)` pair
#[async_trait]
pub trait CredentialVerifier: Send + Sync {
    /// `Ok(false)` for an unknown identity and for a wrong secret alike
    async fn verify(&self, id: &str, secret: &str) -> DomainResult<bool>;
}

/// bcrypt-backed accounts stored in a [`UserRepository`]
pub struct AccountService {
    users: Arc<dyn UserRepository>,
    clock: Arc<dyn Clock>,
    bcrypt_cost: u32,
    storage_timeout: Duration,
}

impl AccountService {
    pub fn new(
        users: Arc<dyn UserRepository>,
        clock: Arc<dyn Clock>,
        bcrypt_cost: u32,
        storage_timeout: Duration,
    ) -> Self {
        Self {
            users,
            clock,
            bcrypt_cost,
            storage_timeout,
        }
    }

    /// Register a new user
    ///
    /// # Returns
    ///
    /// * `Err(DomainError::Validation)` - malformed id or password out of bounds
    /// * `Err(AuthError::UserAlreadyExists)` - id taken
    pub async fn sign_up(&self, id: &str, password: &str) -> DomainResult<User> {
        if !is_valid_identity(id) {
            return Err(DomainError::validation("Invalid email or phone number format"));
        }
        validate_password(password)?;

        let password_hash = self.hash_password(password).await?;
        let user = User::new(id.to_string(), password_hash, self.clock.now());

        let created = bounded(self.storage_timeout, "users.create", self.users.create(user)).await?;

        info!(user_id = %created.id, "User registered");
        Ok(created)
    }

    /// Look up a user's public profile
    pub async fn profile(&self, id: &str) -> DomainResult<User> {
        bounded(self.storage_timeout, "users.find_by_id", self.users.find_by_id(id))
            .await?
            .ok_or_else(|| AuthError::UserNotFound.into())
    }

    async fn hash_password(&self, password: &str) -> DomainResult<String> {
        let password = password.to_string();
        let cost = self.bcrypt_cost;

        tokio::task::spawn_blocking(move || bcrypt::hash(password, cost))
            .await
            .map_err(|e| DomainError::internal(format!("Password hashing task failed: {}", e)))?
            .map_err(|e| {
                error!(error = %e, "Password hashing failed");
                DomainError::internal("Password hashing failed")
            })
    }
}

#[async_trait]
impl CredentialVerifier for AccountService {
    async fn verify(&self, id: &str, secret: &str) -> DomainResult<bool> {
        let user = bounded(self.storage_timeout, "users.find_by_id", self.users.find_by_id(id)).await?;

        let Some(user) = user else {
            debug!(user_id = %id, "Sign-in for unknown user");
            return Ok(false);
        };

        let secret = secret.to_string();
        let hash = user.password_hash;

        let matches = tokio::task::spawn_blocking(move || bcrypt::verify(secret, &hash))
            .await
            .map_err(|e| DomainError::internal(format!("Password verification task failed: {}", e)))?
            .map_err(|e| {
                error!(error = %e, user_id = %id, "Stored password hash is unreadable");
                DomainError::internal("Password verification failed")
            })?;

        if !matches {
            debug!(user_id = %id, "Sign-in with wrong password");
        }
        Ok(matches)
    }
}
