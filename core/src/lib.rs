//! # Tollgate Core
//!
//! Domain layer for the Tollgate backend: token entities, the token codec,
//! session lifecycle (issue, rotate, revoke), request authorization, and the
//! repository interfaces the infrastructure crate implements.
//!
//! Every repository trait ships with an in-memory implementation so the
//! services can run without a database, which is what the tests do.

pub mod clock;
pub mod domain;
pub mod errors;
pub mod repositories;
pub mod services;

// Re-export commonly used types for convenience
pub use clock::{Clock, ManualClock, SystemClock};
pub use domain::entities::{
    Claims, FileRecord, IssuedToken, RefreshTokenEntry, RevocationOutcome, RevokedAccessToken,
    TokenKind, TokenPair, User,
};
pub use errors::{AuthError, DomainError, DomainResult, TokenError};
pub use repositories::{
    FileRepository, InMemoryFileRepository, InMemoryObjectStore, InMemoryRefreshTokenLedger,
    InMemoryRevocationList, InMemoryUserRepository, ObjectStore, RefreshTokenLedger,
    RevocationList, UserRepository,
};
pub use services::{
    AccessGuard, AccountService, AuthorizedSubject, CleanupResult, CredentialVerifier,
    FileService, FileUpload, SessionManager, TokenCleanupConfig, TokenCleanupService, TokenCodec,
    TokenServiceConfig,
};
