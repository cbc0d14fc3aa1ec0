use std::cmp::Reverse;
use std::collections::HashSet;
use std::sync::Arc;

use futures::future::join_all;
use rust_decimal::Decimal;
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::client::{ActivitySource, PageRequest, SourcePage};
use crate::models::{ActivityFeed, ActivityQuery, PageMeta, Transaction};
use crate::reconcile::{deduplicate, TransactionFilter};
use crate::storage::{Generations, RequestGenerations};

const DEFAULT_BUFFER_LIMIT: u32 = 500;

/// Orders records newest first by `createdAt ?? updatedAt`. Records without a usable
/// timestamp count as the epoch and end up last. Ties keep their input order.
pub fn sort_by_timestamp_desc(transactions: &mut [Transaction]) {
    transactions.sort_by_key(|transaction| Reverse(transaction.sort_millis()));
}

/// Totals shown above the activity table.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivitySummary {
    /// Sum of the per-feed totals, not a count of filtered records. A server-paginated feed
    /// contributes its backend total, or its page length when it sent none; client-side status,
    /// type and search filters are not reflected there. Buffered feeds contribute the count that
    /// survived reconciliation and filtering.
    pub total_count: u64,
    pub feed_totals: Vec<(ActivityFeed, u64)>,
    pub total_wagered: Decimal,
    pub total_won: Decimal,
    pub net_result: Decimal
}

/// One page of the merged activity view.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UnifiedPage {
    pub transactions: Vec<Transaction>,
    pub page: u32,
    pub page_size: u32,
    /// Largest page count among the contributing feeds.
    pub pages: u64,
    pub summary: ActivitySummary,
    /// Feeds whose fetch failed and which contributed nothing.
    pub failed_feeds: Vec<ActivityFeed>
}

#[derive(Debug, Clone, PartialEq)]
pub enum PageOutcome {
    Current(UnifiedPage),
    /// A newer load of the same view started while this one was in flight.
    Superseded
}

struct FeedResult {
    page: SourcePage,
    buffered: bool,
    failed: bool
}

/// Merges every activity feed of a player into one filtered, sorted page.
pub struct ActivityAggregator<S: ActivitySource, G: Generations = RequestGenerations> {
    source: Arc<S>,
    generations: G,
    feeds: Vec<ActivityFeed>,
    buffered: HashSet<ActivityFeed>,
    buffer_limit: u32
}

impl<S: ActivitySource> ActivityAggregator<S> {
    /// Creates an aggregator over every known feed, all paginated server side.
    pub fn new(source: Arc<S>) -> Self {
        Self {
            source,
            generations: RequestGenerations::new(),
            feeds: ActivityFeed::ALL.to_vec(),
            buffered: HashSet::new(),
            buffer_limit: DEFAULT_BUFFER_LIMIT
        }
    }
}

impl<S: ActivitySource, G: Generations> ActivityAggregator<S, G> {
    pub fn with_generations<N: Generations>(self, generations: N) -> ActivityAggregator<S, N> {
        ActivityAggregator {
            source: self.source,
            generations,
            feeds: self.feeds,
            buffered: self.buffered,
            buffer_limit: self.buffer_limit
        }
    }

    pub fn with_feeds(mut self, feeds: &[ActivityFeed]) -> Self {
        self.feeds = feeds.to_vec();
        self
    }

    /// Loads `feed` in one request and pages through it locally.
    pub fn with_buffered(mut self, feed: ActivityFeed) -> Self {
        self.buffered.insert(feed);
        self
    }

    pub fn with_buffer_limit(mut self, buffer_limit: u32) -> Self {
        self.buffer_limit = buffer_limit.max(1);
        self
    }

    /// Fetches the requested page of every feed that can match `query`, then merges them.
    ///
    /// Feed failures never surface as errors: the feed contributes nothing and is listed in
    /// `failed_feeds`. A load overtaken by a newer one for the same player is reported as
    /// `PageOutcome::Superseded`.
    pub async fn load_page(&self, player_id: &str, query: &ActivityQuery) -> PageOutcome {
        let generation = self.generations.begin(player_id);
        let filter = TransactionFilter::from_query(query);

        let feeds: Vec<ActivityFeed> = self.feeds.iter()
            .copied()
            .filter(|feed| filter.type_filter().admits(*feed))
            .collect();

        let fetches = feeds.iter().map(|feed| self.fetch_feed(player_id, *feed, query));
        let results = join_all(fetches).await;

        if !self.generations.is_current(&generation) {
            debug!("Discarding page {} for player [{player_id}], generation {} was superseded", query.page, generation.number);
            return PageOutcome::Superseded;
        }

        self.generations.release(&generation);

        let page = self.merge(results, &filter, query);

        info!(
            "Loaded page {}/{} for player [{player_id}]: {} records shown, {} in total",
            page.page, page.pages, page.transactions.len(), page.summary.total_count
        );

        PageOutcome::Current(page)
    }

    async fn fetch_feed(&self, player_id: &str, feed: ActivityFeed, query: &ActivityQuery) -> FeedResult {
        let is_buffered = self.buffered.contains(&feed);
        let request = self.page_request(feed, query, is_buffered);

        match self.source.fetch_page(player_id, feed, &request).await {
            Ok(page) => FeedResult {
                page,
                buffered: is_buffered,
                failed: false
            },
            Err(error) => {
                warn!("Feed [{feed}] for player [{player_id}] failed, showing it as empty: {error}");
                FeedResult {
                    page: SourcePage::empty(feed),
                    buffered: is_buffered,
                    failed: true
                }
            }
        }
    }

    fn page_request(&self, feed: ActivityFeed, query: &ActivityQuery, is_buffered: bool) -> PageRequest {
        let mut request = if is_buffered {
            PageRequest::new(0, self.buffer_limit)
        } else {
            PageRequest::new(query.offset(), query.limit())
        };

        if feed == ActivityFeed::Analytics {
            let forward = |value: &str| Some(value.trim().to_string()).filter(|value| !value.is_empty());

            request.status = forward(&query.status_filter);
            request.search = forward(&query.search_query);
            request.transaction_type = forward(&query.transaction_type_filter);
        }

        request
    }

    fn merge(&self, results: Vec<FeedResult>, filter: &TransactionFilter, query: &ActivityQuery) -> UnifiedPage {
        let mut summary = ActivitySummary::default();
        let mut transactions = Vec::new();
        let mut failed_feeds = Vec::new();
        let mut pages = 0;

        for FeedResult { page, buffered, failed } in results {
            if failed {
                failed_feeds.push(page.feed);
                continue;
            }

            let feed = page.feed;
            let reported_total = page.reported_total();
            let mut meta = page.meta;
            let mut survivors = filter.apply(deduplicate(page.transactions));

            let feed_total = if buffered {
                let total = survivors.len() as u64;
                survivors = page_window(survivors, query);
                meta = Some(PageMeta {
                    total: Some(total),
                    pages: None,
                    ..meta.unwrap_or_default()
                });
                total
            } else {
                reported_total
            };

            summary.total_count += feed_total;
            summary.feed_totals.push((feed, feed_total));

            let page_count = meta.as_ref()
                .and_then(|meta| meta.page_count(query.limit()))
                .unwrap_or_else(|| feed_total.div_ceil(u64::from(query.limit())));
            pages = pages.max(page_count);

            if feed == ActivityFeed::Analytics {
                let (wagered, won) = wager_totals(meta.as_ref(), &survivors);
                summary.total_wagered += wagered;
                summary.total_won += won;
            }

            transactions.extend(survivors);
        }

        summary.net_result = summary.total_won - summary.total_wagered;
        sort_by_timestamp_desc(&mut transactions);

        UnifiedPage {
            transactions,
            page: query.page.max(1),
            page_size: query.limit(),
            pages: pages.max(1),
            summary,
            failed_feeds
        }
    }
}

/// Requested window of a feed that was loaded, reconciled and filtered in full.
fn page_window(mut transactions: Vec<Transaction>, query: &ActivityQuery) -> Vec<Transaction> {
    let offset = usize::try_from(query.offset()).unwrap_or(usize::MAX);
    let limit = query.limit() as usize;

    sort_by_timestamp_desc(&mut transactions);

    transactions.into_iter().skip(offset).take(limit).collect()
}

/// Backend wager totals when the feed reports them, otherwise the sums over the shown records.
fn wager_totals(meta: Option<&PageMeta>, transactions: &[Transaction]) -> (Decimal, Decimal) {
    let sum = |pick: fn(&Transaction) -> Option<Decimal>| {
        transactions.iter().filter_map(pick).sum::<Decimal>()
    };

    let wagered = meta.and_then(|meta| meta.total_bet_amount)
        .unwrap_or_else(|| sum(|transaction: &Transaction| transaction.bet_amount));
    let won = meta.and_then(|meta| meta.total_win_amount)
        .unwrap_or_else(|| sum(|transaction: &Transaction| transaction.win_amount));

    (wagered, won)
}
