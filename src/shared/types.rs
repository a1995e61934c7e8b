use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::shared::constants::{DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: Option<T>,
    pub message: Option<String>,
    pub meta: Option<Meta>,
    pub errors: Option<Vec<String>>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct Meta {
    pub total: i64,
}

impl<T> ApiResponse<T> {
    pub fn success(data: Option<T>, message: Option<String>, meta: Option<Meta>) -> Self {
        Self {
            success: true,
            data,
            message,
            meta,
            errors: None,
        }
    }

    pub fn error(message: Option<String>, errors: Option<Vec<String>>) -> ApiResponse<()> {
        ApiResponse {
            success: false,
            data: None,
            message,
            meta: None,
            errors,
        }
    }
}

// =============================================================================
// PAGINATION
// =============================================================================

/// Standard pagination query parameters for list endpoints.
#[derive(Debug, Clone, Deserialize, IntoParams)]
pub struct PaginationQuery {
    /// Page number (1-indexed, default: 1)
    #[serde(default = "default_page")]
    #[param(minimum = 1)]
    pub page: i64,

    /// Number of items per page (default: 15, max: 100)
    #[serde(default = "default_page_size")]
    #[param(minimum = 1, maximum = 100)]
    pub page_size: i64,
}

fn default_page() -> i64 {
    1
}

fn default_page_size() -> i64 {
    DEFAULT_PAGE_SIZE
}

impl Default for PaginationQuery {
    fn default() -> Self {
        Self {
            page: 1,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl PaginationQuery {
    /// Offset of the first item on the requested page
    pub fn offset(&self) -> i64 {
        (self.page.max(1) - 1) * self.limit()
    }

    /// Clamped page size (respects MAX_PAGE_SIZE)
    pub fn limit(&self) -> i64 {
        self.page_size.clamp(1, MAX_PAGE_SIZE)
    }
}

/// Pagination metadata for responses
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct PaginationMeta {
    pub page: i64,
    pub page_size: i64,
    pub total_items: i64,
    pub total_pages: i64,
}

impl PaginationMeta {
    /// Total pages never drop below 1, so an empty result set still renders
    /// as "page 1 of 1" instead of dividing by zero downstream.
    pub fn new(page: i64, page_size: i64, total_items: i64) -> Self {
        let clamped_page_size = page_size.clamp(1, MAX_PAGE_SIZE);
        let total_pages = ((total_items as f64 / clamped_page_size as f64).ceil() as i64).max(1);
        Self {
            page,
            page_size: clamped_page_size,
            total_items,
            total_pages,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pagination_meta_clamps_total_pages() {
        let meta = PaginationMeta::new(1, 15, 0);
        assert_eq!(meta.total_pages, 1);

        let meta = PaginationMeta::new(1, 15, 16);
        assert_eq!(meta.total_pages, 2);
    }

    #[test]
    fn test_pagination_query_offset() {
        let query = PaginationQuery {
            page: 3,
            page_size: 15,
        };
        assert_eq!(query.offset(), 30);
        assert_eq!(query.limit(), 15);
    }

    #[test]
    fn test_pagination_query_clamps_page_size() {
        let query = PaginationQuery {
            page: 1,
            page_size: 5000,
        };
        assert_eq!(query.limit(), MAX_PAGE_SIZE);
    }
}
