use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;

use crate::models::{DedupKey, TransactionSource};
use crate::types::epoch_millis;

pub const STATUS_COMPLETED: &str = "completed";
pub const STATUS_PENDING: &str = "pending";

/// A record from any activity feed after normalization.
///
/// Instances are never mutated after the normalizer builds them; every later stage
/// either drops a record or passes it through whole.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    /// Identifier within the originating source. Not unique across sources.
    pub id: Option<String>,
    /// Secondary identifier some feeds send alongside (or instead of) `id`.
    pub transaction_id: Option<String>,
    pub source: TransactionSource,
    /// Display type, e.g. "deposit", "add_fund", "bet".
    #[serde(rename = "type")]
    pub transaction_type: String,
    /// Shared by the bet and win records of a single game round.
    pub round_id: Option<String>,
    pub game_id: Option<String>,
    pub game_name: String,
    pub provider: String,
    pub external_transaction_id: Option<String>,
    pub amount: Decimal,
    pub bet_amount: Option<Decimal>,
    pub win_amount: Option<Decimal>,
    pub net_result: Option<Decimal>,
    pub balance_before: Option<Decimal>,
    pub balance_after: Option<Decimal>,
    pub currency: String,
    /// Upstream controlled, compared case-insensitively.
    pub status: String,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
    /// Arrival position within the source page.
    pub index: usize
}

impl Transaction {
    pub fn dedup_key(&self) -> DedupKey {
        DedupKey::of(self)
    }

    pub fn is_completed(&self) -> bool {
        self.status.eq_ignore_ascii_case(STATUS_COMPLETED)
    }

    pub fn is_pending(&self) -> bool {
        self.status.eq_ignore_ascii_case(STATUS_PENDING)
    }

    /// `updatedAt ?? createdAt` in epoch milliseconds, used to pick the freshest duplicate.
    pub fn freshness_millis(&self) -> i64 {
        epoch_millis(self.updated_at.as_ref().or(self.created_at.as_ref()))
    }

    /// `createdAt ?? updatedAt` in epoch milliseconds, used for display ordering.
    pub fn sort_millis(&self) -> i64 {
        epoch_millis(self.created_at.as_ref().or(self.updated_at.as_ref()))
    }

    pub fn display_id(&self) -> &str {
        self.id.as_deref()
            .or(self.transaction_id.as_deref())
            .unwrap_or("N/A")
    }
}
