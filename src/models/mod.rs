mod dedup_key;
mod feed;
mod page;
mod query;
mod transaction;

use std::fmt;
use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

pub use dedup_key::DedupKey;
pub use feed::ActivityFeed;
pub use page::PageMeta;
pub use query::{ActivityQuery, DEFAULT_PAGE_SIZE};
pub use transaction::Transaction;

/// The upstream feed a normalized record came from.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransactionSource {
    Deposit,
    Withdrawal,
    ManualAdd,
    ManualRemove,
    Tip,
    ClaimedRakeback,
    EarnedRakeback,
    Analytics
}

impl TransactionSource {
    pub const ALL: [TransactionSource; 8] = [
        TransactionSource::Deposit,
        TransactionSource::Withdrawal,
        TransactionSource::ManualAdd,
        TransactionSource::ManualRemove,
        TransactionSource::Tip,
        TransactionSource::ClaimedRakeback,
        TransactionSource::EarnedRakeback,
        TransactionSource::Analytics
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionSource::Deposit => "deposit",
            TransactionSource::Withdrawal => "withdrawal",
            TransactionSource::ManualAdd => "manual_add",
            TransactionSource::ManualRemove => "manual_remove",
            TransactionSource::Tip => "tip",
            TransactionSource::ClaimedRakeback => "claimed_rakeback",
            TransactionSource::EarnedRakeback => "earned_rakeback",
            TransactionSource::Analytics => "analytics"
        }
    }

    /// Both manual sources share one upstream feed and are told apart by record type.
    pub fn is_manual(&self) -> bool {
        matches!(self, TransactionSource::ManualAdd | TransactionSource::ManualRemove)
    }
}

impl Display for TransactionSource {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.as_str())
    }
}
