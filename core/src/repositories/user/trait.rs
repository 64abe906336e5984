//! User repository trait defining the interface for account persistence.

use async_trait::async_trait;

use crate::domain::entities::user::User;
use crate::errors::DomainError;

/// Repository trait for User entity persistence operations
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find a user by id
    ///
    /// # Returns
    /// * `Ok(Some(User))` - User found
    /// * `Ok(None)` - No user with the given id
    async fn find_by_id(&self, id: &str) -> Result<Option<User>, DomainError>;

    /// Create a new user
    ///
    /// # Returns
    /// * `Err(DomainError::Auth(AuthError::UserAlreadyExists))` - id taken
    async fn create(&self, user: User) -> Result<User, DomainError>;

    /// Check whether a user exists
    async fn exists(&self, id: &str) -> Result<bool, DomainError> {
        Ok(self.find_by_id(id).await?.is_some())
    }
}
