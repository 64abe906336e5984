//! Repository interfaces and their in-memory implementations.
//!
//! The MySQL and disk-backed implementations live in the infrastructure crate.

pub mod file;
pub mod object_store;
pub mod revocation;
pub mod token;
pub mod user;

pub use file::{FileRepository, InMemoryFileRepository};
pub use object_store::{InMemoryObjectStore, ObjectStore};
pub use revocation::{InMemoryRevocationList, RevocationList};
pub use token::{InMemoryRefreshTokenLedger, RefreshTokenLedger};
pub use user::{InMemoryUserRepository, UserRepository};
