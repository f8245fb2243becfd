// ABOUTME: Page/limit pagination for list endpoints
// ABOUTME: Normalizes client page requests and builds pagination metadata for responses
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 LiftLog Contributors

use serde::{Deserialize, Serialize};

use crate::constants::pagination::{DEFAULT_LIMIT, DEFAULT_PAGE, MAX_LIMIT};

/// A normalized page request (1-based page, bounded limit)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    /// 1-based page number
    pub page: u32,
    /// Items per page
    pub limit: u32,
}

impl PageRequest {
    /// Build a page request from optional client values.
    ///
    /// Zero or missing values fall back to defaults; the limit is capped.
    #[must_use]
    pub fn new(page: Option<u32>, limit: Option<u32>) -> Self {
        let page = page.filter(|p| *p > 0).unwrap_or(DEFAULT_PAGE);
        let limit = limit
            .filter(|l| *l > 0)
            .unwrap_or(DEFAULT_LIMIT)
            .min(MAX_LIMIT);
        Self { page, limit }
    }

    /// Number of rows to skip
    #[must_use]
    pub const fn offset(&self) -> u64 {
        (self.page as u64 - 1) * self.limit as u64
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self::new(None, None)
    }
}

/// Pagination metadata returned alongside a page of items
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PaginationInfo {
    /// Page that was returned
    pub current_page: u32,
    /// Total number of pages
    pub total_pages: u64,
    /// Total number of matching items
    pub total_items: u64,
    /// Whether a following page exists
    pub has_next: bool,
    /// Whether a preceding page exists
    pub has_prev: bool,
}

impl PaginationInfo {
    /// Build metadata for `request` given the total item count
    #[must_use]
    pub const fn new(request: PageRequest, total_items: u64) -> Self {
        let limit = request.limit as u64;
        Self {
            current_page: request.page,
            total_pages: total_items.div_ceil(limit),
            total_items,
            has_next: (request.page as u64) * limit < total_items,
            has_prev: request.page > 1,
        }
    }
}
