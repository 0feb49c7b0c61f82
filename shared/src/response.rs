//! API Response types
//!
//! Response envelope used by every backend endpoint

use serde::{Deserialize, Serialize};

/// Unified API response structure
///
/// ```json
/// {
///     "success": true,
///     "message": "OK",
///     "data": { ... },
///     "pagination": { "page": 1, "limit": 10, "total": 42, "pages": 5 }
/// }
/// ```
#[derive(Debug, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    /// Defaults to true for backends that omit the flag on success
    #[serde(default = "default_success")]
    pub success: bool,
    /// Human-readable message
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// Response data (optional)
    #[serde(default = "Option::default", skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    /// Present on list endpoints
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pagination: Option<Pagination>,
}

fn default_success() -> bool {
    true
}

impl<T> ApiResponse<T> {
    /// Success with nothing attached, used for empty response bodies
    pub fn empty() -> Self {
        Self {
            success: true,
            message: None,
            data: None,
            pagination: None,
        }
    }
}

/// Pagination metadata
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
pub struct Pagination {
    /// Current page number (1-based)
    pub page: u32,
    /// Items per page
    pub limit: u32,
    /// Total number of items
    pub total: u64,
    /// Total number of pages
    pub pages: u32,
}

impl Pagination {
    /// Create a new pagination
    pub fn new(page: u32, limit: u32, total: u64) -> Self {
        let pages = if limit == 0 {
            0
        } else {
            total.div_ceil(limit as u64) as u32
        };
        Self {
            page,
            limit,
            total,
            pages,
        }
    }

    pub fn has_next(&self) -> bool {
        self.page < self.pages
    }
}

/// One page of a list endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Page<T> {
    pub data: Vec<T>,
    pub pagination: Pagination,
}

impl<T> Page<T> {
    /// Wrap items that arrived without pagination metadata as a single page
    pub fn single(data: Vec<T>) -> Self {
        let len = data.len();
        Self {
            data,
            pagination: Pagination::new(1, len as u32, len as u64),
        }
    }
}
