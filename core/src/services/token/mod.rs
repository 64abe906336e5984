//! Token lifecycle services
//!
//! - [`TokenCodec`]: JWT signing and verification
//! - [`SessionManager`]: issue, rotate and revoke token pairs
//! - [`AccessGuard`]: authorize requests by bearer access token
//! - [`TokenCleanupService`]: background purge of expired records

mod cleanup;
mod codec;
mod config;
mod guard;
mod session;

#[cfg(test)]
mod tests;

pub use cleanup::{CleanupResult, TokenCleanupConfig, TokenCleanupService};
pub use codec::TokenCodec;
pub use config::TokenServiceConfig;
pub use guard::{extract_bearer_token, AccessGuard, AuthorizedSubject};
pub use session::SessionManager;
