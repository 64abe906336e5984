//! Validation of sign-up identities and passwords
//!
//! An identity is an email address or a phone number. Phone numbers are
//! accepted in loose human formats (`+1 (555) 123-4567`) as well as bare
//! international digits.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::errors::DomainError;

pub const MIN_PASSWORD_LEN: usize = 8;
pub const MAX_PASSWORD_LEN: usize = 128;

static EMAIL_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$").unwrap()
});

/// Optional country prefix, optional parenthesized area code, grouped digits
static PHONE_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(\+?\d{1,3}[-.\s]?)?\(?\d{1,4}\)?[-.\s]?\d{1,4}[-.\s]?\d{1,9}$").unwrap()
});

/// 10 to 15 digits, no leading zero
static PLAIN_PHONE_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\+?[1-9]\d{9,14}$").unwrap());

/// Whether `id` is an acceptable email address or phone number
pub fn is_valid_identity(id: &str) -> bool {
    EMAIL_REGEX.is_match(id) || PHONE_REGEX.is_match(id) || PLAIN_PHONE_REGEX.is_match(id)
}

/// Length bounds are counted in characters, not bytes
pub fn validate_password(password: &str) -> Result<(), DomainError> {
    let len = password.chars().count();
    if !(MIN_PASSWORD_LEN..=MAX_PASSWORD_LEN).contains(&len) {
        return Err(DomainError::validation(format!(
            "Password must be between {} and {} characters",
            MIN_PASSWORD_LEN, MAX_PASSWORD_LEN
        )));
    }
    Ok(())
}
