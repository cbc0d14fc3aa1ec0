mod errors;
mod http_client;
#[cfg(test)]
mod tests;

use async_trait::async_trait;

use crate::models::{ActivityFeed, PageMeta, Transaction};

pub use errors::FetchError;
pub use http_client::HttpActivityClient;

/// One page worth of records requested from a single feed.
///
/// Filters are forwarded only to feeds whose endpoint understands them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageRequest {
    pub offset: u64,
    pub limit: u32,
    pub status: Option<String>,
    pub search: Option<String>,
    pub transaction_type: Option<String>
}

impl PageRequest {
    pub fn new(offset: u64, limit: u32) -> Self {
        Self {
            offset,
            limit,
            ..Self::default()
        }
    }
}

/// Normalized records of one feed page plus whatever paging data the feed reported.
#[derive(Debug, Clone, PartialEq)]
pub struct SourcePage {
    pub feed: ActivityFeed,
    pub transactions: Vec<Transaction>,
    pub meta: Option<PageMeta>
}

impl SourcePage {
    pub fn empty(feed: ActivityFeed) -> Self {
        Self {
            feed,
            transactions: Vec::new(),
            meta: None
        }
    }

    /// The backend's total when it sent one, otherwise what we are holding.
    pub fn reported_total(&self) -> u64 {
        self.meta.as_ref()
            .and_then(|meta| meta.total)
            .unwrap_or(self.transactions.len() as u64)
    }
}

/// Where activity pages come from.
#[async_trait]
pub trait ActivitySource: Send + Sync {
    async fn fetch_page(&self, player_id: &str, feed: ActivityFeed, request: &PageRequest) -> Result<SourcePage, FetchError>;
}
