//! Account service: sign-up and credential verification

mod identity;
mod service;


pub use identity::{is_valid_identity, validate_password, MAX_PASSWORD_LEN, MIN_PASSWORD_LEN};
pub use service::{AccountService, CredentialVerifier};
