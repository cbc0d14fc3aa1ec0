use serde::{Deserialize, Serialize};

pub const DEFAULT_PAGE_SIZE: u32 = 25;

/// Everything that selects what the unified activity view shows.
///
/// Empty filter strings impose no constraint. `page` is 1-based.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ActivityQuery {
    pub status_filter: String,
    pub transaction_type_filter: String,
    pub search_query: String,
    pub page: u32,
    pub page_size: u32
}

impl Default for ActivityQuery {
    fn default() -> Self {
        Self {
            status_filter: String::new(),
            transaction_type_filter: String::new(),
            search_query: String::new(),
            page: 1,
            page_size: DEFAULT_PAGE_SIZE
        }
    }
}

impl ActivityQuery {
    pub fn with_status(mut self, status: impl Into<String>) -> Self {
        self.status_filter = status.into();
        self
    }

    pub fn with_transaction_type(mut self, transaction_type: impl Into<String>) -> Self {
        self.transaction_type_filter = transaction_type.into();
        self
    }

    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search_query = search.into();
        self
    }

    pub fn with_page(mut self, page: u32) -> Self {
        self.page = page;
        self
    }

    pub fn with_page_size(mut self, page_size: u32) -> Self {
        self.page_size = page_size;
        self
    }

    /// Zero-based record offset of the requested page. Page 0 is read as page 1.
    pub fn offset(&self) -> u64 {
        u64::from(self.page.max(1) - 1) * u64::from(self.limit())
    }

    pub fn limit(&self) -> u32 {
        self.page_size.max(1)
    }
}
