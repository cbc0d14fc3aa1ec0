use std::fmt;
use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

use crate::models::TransactionSource;

/// One upstream endpoint the activity view pulls from.
///
/// Feeds and sources line up one to one except for manual funds, where a single
/// endpoint carries both additions and removals.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivityFeed {
    Deposits,
    Withdrawals,
    ManualFunds,
    Tips,
    ClaimedRakeback,
    EarnedRakeback,
    Analytics
}

impl ActivityFeed {
    pub const ALL: [ActivityFeed; 7] = [
        ActivityFeed::Deposits,
        ActivityFeed::Withdrawals,
        ActivityFeed::ManualFunds,
        ActivityFeed::Tips,
        ActivityFeed::ClaimedRakeback,
        ActivityFeed::EarnedRakeback,
        ActivityFeed::Analytics
    ];

    pub fn sources(&self) -> &'static [TransactionSource] {
        match self {
            ActivityFeed::Deposits => &[TransactionSource::Deposit],
            ActivityFeed::Withdrawals => &[TransactionSource::Withdrawal],
            ActivityFeed::ManualFunds => &[TransactionSource::ManualAdd, TransactionSource::ManualRemove],
            ActivityFeed::Tips => &[TransactionSource::Tip],
            ActivityFeed::ClaimedRakeback => &[TransactionSource::ClaimedRakeback],
            ActivityFeed::EarnedRakeback => &[TransactionSource::EarnedRakeback],
            ActivityFeed::Analytics => &[TransactionSource::Analytics]
        }
    }

    /// Source tag given to records before any per-record routing.
    pub fn default_source(&self) -> TransactionSource {
        self.sources()[0]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ActivityFeed::Deposits => "deposits",
            ActivityFeed::Withdrawals => "withdrawals",
            ActivityFeed::ManualFunds => "manual_funds",
            ActivityFeed::Tips => "tips",
            ActivityFeed::ClaimedRakeback => "claimed_rakeback",
            ActivityFeed::EarnedRakeback => "earned_rakeback",
            ActivityFeed::Analytics => "analytics"
        }
    }
}

impl Display for ActivityFeed {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.as_str())
    }
}
