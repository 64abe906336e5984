//! Domain entities representing core business objects.

pub mod file;
pub mod token;
pub mod user;

// Re-export commonly used types
pub use file::FileRecord;
pub use token::{
    Claims, IssuedToken, RefreshTokenEntry, RevocationOutcome, RevokedAccessToken, TokenKind,
    TokenPair,
};
pub use user::User;
