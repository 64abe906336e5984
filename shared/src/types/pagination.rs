//! Pagination related types for list endpoints

use serde::{Deserialize, Serialize};

/// Default number of items per page
pub const DEFAULT_PER_PAGE: u32 = 10;

/// Maximum number of items per page
pub const MAX_PER_PAGE: u32 = 100;

/// Pagination parameters for list endpoints
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pagination {
    /// Current page number (1-indexed)
    pub page: u32,

    /// Number of items per page
    pub per_page: u32,
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            page: 1,
            per_page: DEFAULT_PER_PAGE,
        }
    }
}

impl Pagination {
    /// Create a new pagination, clamping out-of-range values
    ///
    /// A zero page size falls back to the default rather than the minimum.
    pub fn new(page: u32, per_page: u32) -> Self {
        let per_page = if per_page == 0 {
            DEFAULT_PER_PAGE
        } else {
            per_page.min(MAX_PER_PAGE)
        };
        Self {
            page: page.max(1),
            per_page,
        }
    }

    /// Build from optional query values
    pub fn from_query(page: Option<u32>, per_page: Option<u32>) -> Self {
        Self::new(page.unwrap_or(1), per_page.unwrap_or(DEFAULT_PER_PAGE))
    }

    /// Calculate the offset for database queries
    pub fn offset(&self) -> u64 {
        u64::from(self.page.saturating_sub(1)) * u64::from(self.per_page)
    }

    /// Get the limit for database queries
    pub fn limit(&self) -> u64 {
        u64::from(self.per_page)
    }
}

/// Paginated response wrapper with metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaginatedResponse<T> {
    /// Total number of items
    pub total: u64,

    /// Current page number
    pub page: u32,

    /// Items per page
    #[serde(rename = "pageSize")]
    pub page_size: u32,

    /// The items on this page
    pub items: Vec<T>,
}

impl<T> PaginatedResponse<T> {
    /// Create a new paginated response
    pub fn new(items: Vec<T>, pagination: Pagination, total: u64) -> Self {
        Self {
            total,
            page: pagination.page,
            page_size: pagination.per_page,
            items,
        }
    }

    /// Map the items while keeping the page metadata
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> PaginatedResponse<U> {
        PaginatedResponse {
            total: self.total,
            page: self.page,
            page_size: self.page_size,
            items: self.items.into_iter().map(f).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pagination_clamps() {
        let p = Pagination::new(0, 0);
        assert_eq!(p.page, 1);
        assert_eq!(p.per_page, DEFAULT_PER_PAGE);

        let p = Pagination::new(3, 500);
        assert_eq!(p.per_page, MAX_PER_PAGE);
        assert_eq!(p.offset(), 200);
    }

    #[test]
    fn test_from_query_defaults() {
        let p = Pagination::from_query(None, None);
        assert_eq!(p, Pagination::default());
        assert_eq!(p.offset(), 0);
        assert_eq!(p.limit(), 10);
    }
}
