use rust_decimal::Decimal;

use crate::models::{ActivityFeed, Transaction, TransactionSource};
use crate::normalizer::RawRecord;

const UNKNOWN_GAME: &str = "Unknown Game";
const NOT_AVAILABLE: &str = "N/A";
const UNKNOWN_STATUS: &str = "Unknown";

/// Builds the common transaction shape from one raw record of `feed`.
///
/// Never fails: every missing field falls back to a placeholder. `index` is the
/// record's position in its page and only serves display ordering.
pub fn normalize(feed: ActivityFeed, raw: &RawRecord, index: usize) -> Transaction {
    let source = route_source(feed, raw);
    let created_at = raw.created_at.or(raw.timestamp).or(raw.date);

    Transaction {
        id: raw.id.clone().or_else(|| raw.transaction_id.clone()),
        transaction_id: raw.transaction_id.clone(),
        source,
        transaction_type: raw.transaction_type.clone()
            .unwrap_or_else(|| default_type(source, raw).to_string()),
        round_id: raw.round_id.clone(),
        game_id: raw.game_id.clone(),
        game_name: raw.game_name.clone().unwrap_or_else(|| default_game_name(source).to_string()),
        provider: raw.provider.clone().unwrap_or_else(|| NOT_AVAILABLE.to_string()),
        external_transaction_id: raw.external_transaction_id.clone(),
        amount: raw.amount.or(raw.usd).or(raw.change_amount).unwrap_or(Decimal::ZERO),
        bet_amount: raw.bet_amount,
        win_amount: raw.win_amount,
        net_result: raw.net_result,
        balance_before: raw.balance_before,
        balance_after: raw.balance_after,
        currency: raw.currency.clone().unwrap_or_else(|| NOT_AVAILABLE.to_string()),
        status: raw.status.clone().unwrap_or_else(|| default_status(source).to_string()),
        created_at,
        updated_at: raw.updated_at.or(created_at),
        index
    }
}

/// Manual fund records are additions unless they say otherwise.
fn route_source(feed: ActivityFeed, raw: &RawRecord) -> TransactionSource {
    match feed {
        ActivityFeed::ManualFunds => {
            let is_removal = raw.transaction_type.as_deref()
                .is_some_and(|kind| kind.eq_ignore_ascii_case("remove_fund"));

            if is_removal { TransactionSource::ManualRemove } else { TransactionSource::ManualAdd }
        },
        _ => feed.default_source()
    }
}

fn default_type(source: TransactionSource, raw: &RawRecord) -> &'static str {
    match source {
        TransactionSource::Deposit => "deposit",
        TransactionSource::Withdrawal => "withdrawal",
        TransactionSource::ManualAdd => "add_fund",
        TransactionSource::ManualRemove => "remove_fund",
        TransactionSource::Tip => "tip",
        TransactionSource::ClaimedRakeback => "claimed_rakeback",
        TransactionSource::EarnedRakeback => "earned_rakeback",
        TransactionSource::Analytics if raw.bet_amount.is_some() => "bet",
        TransactionSource::Analytics => "unknown"
    }
}

fn default_status(source: TransactionSource) -> &'static str {
    match source {
        TransactionSource::ManualAdd
        | TransactionSource::ManualRemove
        | TransactionSource::Tip
        | TransactionSource::ClaimedRakeback
        | TransactionSource::EarnedRakeback => "completed",
        TransactionSource::Deposit
        | TransactionSource::Withdrawal
        | TransactionSource::Analytics => UNKNOWN_STATUS
    }
}

fn default_game_name(source: TransactionSource) -> &'static str {
    match source {
        TransactionSource::Analytics => UNKNOWN_GAME,
        _ => NOT_AVAILABLE
    }
}
