use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use csv::WriterBuilder;
use rust_decimal::Decimal;
use serde::Serialize;
use tokio::task::spawn_blocking;
use tracing::{debug, info, warn};

use crate::client::{ActivitySource, PageRequest};
use crate::engine::errors::ExportError;
use crate::engine::sort_by_timestamp_desc;
use crate::models::{ActivityFeed, Transaction};
use crate::reconcile::deduplicate;

const DEFAULT_BATCH_SIZE: u32 = 100;
const DEFAULT_MAX_BATCHES: u32 = 10_000;
const NOT_AVAILABLE: &str = "N/A";

pub fn export_file_name(player_id: &str) -> String {
    format!("player-{player_id}-activity-full.csv")
}

/// One line of the activity CSV, in column order.
#[derive(Debug, Serialize)]
struct ExportRow<'a> {
    #[serde(rename = "Transaction ID")]
    transaction_id: &'a str,
    #[serde(rename = "Game Name")]
    game_name: &'a str,
    #[serde(rename = "Provider")]
    provider: &'a str,
    #[serde(rename = "Bet Amount")]
    bet_amount: Decimal,
    #[serde(rename = "Win Amount")]
    win_amount: Decimal,
    #[serde(rename = "Net Result")]
    net_result: Decimal,
    #[serde(rename = "Balance Before")]
    balance_before: String,
    #[serde(rename = "Balance After")]
    balance_after: String,
    #[serde(rename = "Currency")]
    currency: &'a str,
    #[serde(rename = "Status")]
    status: &'a str,
    #[serde(rename = "Date")]
    date: String,
    #[serde(rename = "Round ID")]
    round_id: &'a str
}

impl<'a> From<&'a Transaction> for ExportRow<'a> {
    fn from(transaction: &'a Transaction) -> Self {
        let bet_amount = transaction.bet_amount.unwrap_or(Decimal::ZERO);
        let win_amount = transaction.win_amount.unwrap_or(Decimal::ZERO);
        let optional = |value: Option<Decimal>| value.map_or_else(|| NOT_AVAILABLE.to_string(), |value| value.to_string());

        Self {
            transaction_id: transaction.display_id(),
            game_name: &transaction.game_name,
            provider: &transaction.provider,
            bet_amount,
            win_amount,
            net_result: transaction.net_result.unwrap_or(win_amount - bet_amount),
            balance_before: optional(transaction.balance_before),
            balance_after: optional(transaction.balance_after),
            currency: &transaction.currency,
            status: &transaction.status,
            date: transaction.created_at.or(transaction.updated_at)
                .map_or_else(|| NOT_AVAILABLE.to_string(), |date| date.to_rfc3339()),
            round_id: transaction.round_id.as_deref().unwrap_or(NOT_AVAILABLE)
        }
    }
}

/// Writes `transactions` as activity CSV, header line first.
pub fn write_csv<W: Write>(writer: W, transactions: &[Transaction]) -> Result<(), ExportError> {
    let mut writer = WriterBuilder::new().has_headers(true).from_writer(writer);

    for transaction in transactions {
        writer.serialize(ExportRow::from(transaction))?;
    }

    writer.flush()?;

    Ok(())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExportConfig {
    /// Records requested per call.
    pub batch_size: u32,
    /// Hard stop for a backend that never returns an empty batch.
    pub max_batches: u32
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            batch_size: DEFAULT_BATCH_SIZE,
            max_batches: DEFAULT_MAX_BATCHES
        }
    }
}

/// Every analytics record of a player, deduplicated and newest first.
#[derive(Debug, Clone, PartialEq)]
pub struct ExportCollection {
    pub transactions: Vec<Transaction>,
    pub batches: u32,
    /// Whether the loop ended on the reported total or an empty batch rather than a failure or the batch cap.
    pub complete: bool
}

#[derive(Debug, Clone, PartialEq)]
pub struct ExportReport {
    pub path: PathBuf,
    pub rows: usize,
    pub batches: u32,
    pub complete: bool
}

/// Pulls a player's full wager history out of the analytics feed for CSV export.
pub struct ActivityExporter<S: ActivitySource> {
    source: Arc<S>,
    config: ExportConfig
}

impl<S: ActivitySource> ActivityExporter<S> {
    pub fn new(source: Arc<S>) -> Self {
        Self {
            source,
            config: ExportConfig::default()
        }
    }

    pub fn with_config(mut self, config: ExportConfig) -> Self {
        self.config = ExportConfig {
            batch_size: config.batch_size.max(1),
            max_batches: config.max_batches.max(1)
        };
        self
    }

    /// Fetches successive batches until the reported total is reached or a batch comes back empty.
    ///
    /// A total of zero is treated as unknown, leaving the empty batch as the only stop.
    /// A failed batch ends the loop with whatever was gathered so far.
    pub async fn collect(&self, player_id: &str) -> ExportCollection {
        let mut accumulated = Vec::<Transaction>::new();
        let mut reported_total = None;
        let mut batches = 0;
        let mut complete = false;

        while batches < self.config.max_batches {
            let request = PageRequest::new(accumulated.len() as u64, self.config.batch_size);
            batches += 1;

            let page = match self.source.fetch_page(player_id, ActivityFeed::Analytics, &request).await {
                Ok(page) => page,
                Err(error) => {
                    warn!("Export batch {batches} for player [{player_id}] failed, keeping {} records: {error}", accumulated.len());
                    break;
                }
            };

            if page.transactions.is_empty() {
                complete = true;
                break;
            }

            if let Some(total) = page.meta.as_ref().and_then(|meta| meta.total).filter(|total| *total > 0) {
                reported_total = Some(total);
            }

            accumulated.extend(page.transactions);
            debug!("Export batch {batches} for player [{player_id}]: {} records so far", accumulated.len());

            if reported_total.is_some_and(|total| accumulated.len() as u64 >= total) {
                complete = true;
                break;
            }
        }

        if !complete {
            warn!("Export for player [{player_id}] stopped after {batches} batches without reaching the end of the feed");
        }

        let mut transactions = deduplicate(accumulated);
        sort_by_timestamp_desc(&mut transactions);

        ExportCollection { transactions, batches, complete }
    }

    /// Collects the full history and writes it to `player-{id}-activity-full.csv` inside `directory`.
    pub async fn export_to_dir(&self, player_id: &str, directory: &Path) -> Result<ExportReport, ExportError> {
        let ExportCollection { transactions, batches, complete } = self.collect(player_id).await;
        let path = directory.join(export_file_name(player_id));
        let rows = transactions.len();

        let target = path.clone();
        spawn_blocking(move || -> Result<(), ExportError> {
            let file = File::create(&target)?;
            write_csv(BufWriter::new(file), &transactions)
        }).await??;

        info!("Exported {rows} records for player [{player_id}] to {}", path.display());

        Ok(ExportReport {
            path,
            rows,
            batches,
            complete
        })
    }
}
