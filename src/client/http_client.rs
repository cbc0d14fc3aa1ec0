use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Url};
use serde_json::Value;
use tracing::debug;

use crate::client::{ActivitySource, FetchError, PageRequest, SourcePage};
use crate::models::ActivityFeed;
use crate::normalizer::normalize_response;

const USER_AGENT: &str = concat!("player-activity/", env!("CARGO_PKG_VERSION"));

/// Reads activity feeds from the platform's REST endpoints.
#[derive(Debug, Clone)]
pub struct HttpActivityClient {
    client: Client,
    base_url: Url
}

impl HttpActivityClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, FetchError> {
        let base_url = Url::parse(base_url)
            .map_err(|error| FetchError::InvalidBaseUrl(format!("{base_url}: {error}")))?;

        if base_url.cannot_be_a_base() {
            return Err(FetchError::InvalidBaseUrl(base_url.to_string()));
        }

        let client = Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()?;

        Ok(Self { client, base_url })
    }

    /// Path segments and query parameters of the endpoint backing `feed`.
    fn endpoint(&self, player_id: &str, feed: ActivityFeed, request: &PageRequest) -> (Vec<String>, Vec<(&'static str, String)>) {
        let analytics = |tail: &str| vec!["analytics".to_string(), "users".to_string(), player_id.to_string(), tail.to_string()];
        let mut params = vec![("limit", request.limit.to_string()), ("offset", request.offset.to_string())];

        let segments = match feed {
            ActivityFeed::Analytics => {
                let filters = [("status", &request.status), ("search", &request.search), ("transaction_type", &request.transaction_type)];
                params.extend(filters.into_iter().filter_map(|(name, value)| value.clone().map(|value| (name, value))));
                analytics("transactions")
            },
            ActivityFeed::ClaimedRakeback => {
                params.push(("transaction_type", "claimed".to_string()));
                analytics("rakeback")
            },
            ActivityFeed::EarnedRakeback => {
                params.push(("transaction_type", "earned".to_string()));
                analytics("rakeback")
            },
            ActivityFeed::Tips => analytics("tips"),
            ActivityFeed::Deposits | ActivityFeed::Withdrawals => {
                params.push(("search", player_id.to_string()));
                vec![feed.as_str().to_string()]
            },
            ActivityFeed::ManualFunds => {
                let per_page = u64::from(request.limit.max(1));
                params = vec![("page", (request.offset / per_page + 1).to_string()), ("per_page", per_page.to_string())];
                vec!["players".to_string(), player_id.to_string(), "manual-funds".to_string()]
            }
        };

        (segments, params)
    }

    fn url(&self, segments: &[String]) -> Result<Url, FetchError> {
        let mut url = self.base_url.clone();

        url.path_segments_mut()
            .map_err(|_| FetchError::InvalidBaseUrl(self.base_url.to_string()))?
            .pop_if_empty()
            .extend(segments);

        Ok(url)
    }
}

#[async_trait]
impl ActivitySource for HttpActivityClient {
    async fn fetch_page(&self, player_id: &str, feed: ActivityFeed, request: &PageRequest) -> Result<SourcePage, FetchError> {
        let (segments, params) = self.endpoint(player_id, feed, request);
        let url = self.url(&segments)?;

        debug!("Fetching feed [{feed}] for player [{player_id}] from {url} (offset {}, limit {})", request.offset, request.limit);

        let response = self.client.get(url)
            .query(&params)
            .send()
            .await
            .map_err(|error| FetchError::http(feed, error))?;

        let status = response.status();

        if !status.is_success() {
            return Err(FetchError::status(feed, status.as_u16()));
        }

        let body: Value = response.json()
            .await
            .map_err(|error| FetchError::decode(feed, error))?;

        let (transactions, meta) = normalize_response(feed, body);

        debug!("Feed [{feed}] returned {} records for player [{player_id}]", transactions.len());

        Ok(SourcePage { feed, transactions, meta })
    }
}
