//! Page arithmetic shared by every list endpoint.

use serde::{Deserialize, Serialize};

/// Number of records returned per page by list endpoints.
pub const DEFAULT_ITEMS_PER_PAGE: usize = 20;

/// `searchParam` / `pageNumber` query parameters accepted by list endpoints.
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PageParams {
    #[serde(default)]
    pub search_param: Option<String>,
    #[serde(default)]
    pub page_number: Option<usize>,
}

impl PageParams {
    /// 1-based page number; missing or zero means the first page.
    pub fn page(&self) -> usize {
        self.page_number.unwrap_or(1).max(1)
    }

    pub fn search(&self) -> &str {
        self.search_param.as_deref().unwrap_or("").trim()
    }

    /// Saturates for absurd page numbers; such pages are simply empty.
    pub fn offset(&self) -> usize {
        (self.page() - 1).saturating_mul(DEFAULT_ITEMS_PER_PAGE)
    }
}

/// Whether records remain after the current page.
pub fn has_more(count: usize, offset: usize, returned: usize) -> bool {
    count > offset.saturating_add(returned)
}

/// One page of records plus the total matching count.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub count: usize,
    pub has_more: bool,
}

impl<T> Page<T> {
    pub fn new(items: Vec<T>, count: usize, offset: usize) -> Self {
        let has_more = has_more(count, offset, items.len());
        Self {
            items,
            count,
            has_more,
        }
    }
}
