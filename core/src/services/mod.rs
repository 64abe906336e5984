//! Business services containing domain logic and use cases.

pub mod account;
pub mod file;
pub mod token;

mod storage;

// Re-export commonly used types
pub use account::{AccountService, CredentialVerifier};
pub use file::{FileService, FileUpload};
pub use token::{
    AccessGuard, AuthorizedSubject, CleanupResult, SessionManager, TokenCleanupConfig,
    TokenCleanupService, TokenCodec, TokenServiceConfig,
};
