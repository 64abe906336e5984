//! User entity representing a registered account.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Registered user. The id doubles as the token subject.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Email address or phone number chosen at sign-up
    pub id: String,

    /// bcrypt hash of the password
    #[serde(skip_serializing)]
    pub password_hash: String,

    pub created_at: DateTime<Utc>,
}

impl User {
    pub fn new(id: String, password_hash: String, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            password_hash,
            created_at,
        }
    }
}
