//! Pagination over ordered indexes.

use serde::{Deserialize, Serialize};

use crate::validate::{Validate, ValidationError};

/// Page used when the query omits `page`.
pub const DEFAULT_PAGE: u64 = 1;

/// Page size used when the query omits `limit`.
pub const DEFAULT_LIMIT: u64 = 10;

/// One-based page request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pagination {
    /// One-based page number.
    #[serde(default = "default_page")]
    pub page: u64,
    /// Maximum number of items per page.
    #[serde(default = "default_limit")]
    pub limit: u64,
}

fn default_page() -> u64 {
    DEFAULT_PAGE
}

fn default_limit() -> u64 {
    DEFAULT_LIMIT
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE,
            limit: DEFAULT_LIMIT,
        }
    }
}

impl Pagination {
    /// Inclusive zero-based `(start, stop)` index range for this page.
    ///
    /// `start = (page - 1) * limit`, `stop = start + limit - 1`.
    #[must_use]
    pub fn bounds(&self) -> (i64, i64) {
        self.bounds_capped(u64::MAX)
    }

    /// Like [`bounds`](Self::bounds), but serving at most `max_limit` items.
    ///
    /// The start offset still follows the requested `limit`, so consecutive pages
    /// never overlap. Only the tail of an oversized page is cut off.
    #[must_use]
    pub fn bounds_capped(&self, max_limit: u64) -> (i64, i64) {
        let limit = i64::try_from(self.limit).unwrap_or(i64::MAX);
        let served = i64::try_from(self.limit.min(max_limit.max(1))).unwrap_or(i64::MAX);
        let page = i64::try_from(self.page).unwrap_or(i64::MAX);
        let start = page.saturating_sub(1).saturating_mul(limit);
        let stop = start.saturating_add(served).saturating_sub(1);
        (start, stop)
    }
}

impl Validate for Pagination {
    fn validate(&self) -> Result<(), ValidationError> {
        if self.page == 0 {
            return Err(ValidationError::new("page", "page must be a positive integer"));
        }
        if self.limit == 0 {
            return Err(ValidationError::new(
                "limit",
                "limit must be a positive integer",
            ));
        }
        Ok(())
    }
}
