//! Common type definitions

pub mod pagination;

pub use pagination::{PaginatedResponse, Pagination};
