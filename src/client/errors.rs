use thiserror::Error;

use crate::models::ActivityFeed;

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("Invalid API base URL [{0}]")]
    InvalidBaseUrl(String),
    #[error("HTTP client could not be built: {0}")]
    Client(#[from] reqwest::Error),
    #[error("Request to feed [{feed}] failed: {source}")]
    Http {
        feed: ActivityFeed,
        source: reqwest::Error
    },
    #[error("Feed [{feed}] responded with HTTP status [{status}]")]
    Status {
        feed: ActivityFeed,
        status: u16
    },
    #[error("Feed [{feed}] returned an undecodable body: {reason}")]
    Decode {
        feed: ActivityFeed,
        reason: String
    }
}

impl FetchError {
    pub fn http(feed: ActivityFeed, source: reqwest::Error) -> Self {
        Self::Http { feed, source }
    }

    pub fn status(feed: ActivityFeed, status: u16) -> Self {
        Self::Status { feed, status }
    }

    pub fn decode(feed: ActivityFeed, reason: impl ToString) -> Self {
        Self::Decode { feed, reason: reason.to_string() }
    }
}
