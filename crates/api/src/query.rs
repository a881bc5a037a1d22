//! Shared query parameter types for API handlers.

use serde::Deserialize;

/// Largest page size for post listings and the feed.
pub const MAX_PAGE_SIZE: i64 = 20;

/// Largest page size for admin listings.
pub const MAX_ADMIN_PAGE_SIZE: i64 = 100;

/// Page-based pagination (`?page=&limit=`), 1-indexed.
#[derive(Debug, Default, Deserialize)]
pub struct PageParams {
    pub page: Option<i64>,
    pub limit: Option<i64>,
}

/// Resolved page window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    pub page: i64,
    pub limit: i64,
    pub offset: i64,
}

impl PageParams {
    /// Clamp to `page >= 1` and `1 <= limit <= max_limit`; the default limit is `max_limit`.
    ///
    /// The offset saturates, so an absurd page number yields an empty page.
    pub fn resolve(&self, max_limit: i64) -> Page {
        let page = self.page.unwrap_or(1).max(1);
        let limit = self.limit.unwrap_or(max_limit).clamp(1, max_limit);
        Page {
            page,
            limit,
            offset: (page - 1).saturating_mul(limit),
        }
    }
}
