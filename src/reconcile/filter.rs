use crate::models::{ActivityFeed, ActivityQuery, Transaction, TransactionSource};

/// Transaction type categories offered by the activity view's type selector.
#[derive(Debug, Clone, Eq, PartialEq)]
pub enum TypeFilter {
    Any,
    ManualAdd,
    ManualRemove,
    Tip,
    ClaimedRakeback,
    EarnedRakeback,
    Deposit,
    Withdrawal,
    GrooveBet,
    GrooveWin,
    /// Anything else is compared against the record type verbatim (ignoring case).
    Exact(String)
}

impl TypeFilter {
    pub fn parse(value: &str) -> Self {
        let value = value.trim();

        match value.to_ascii_lowercase().as_str() {
            "" => TypeFilter::Any,
            "manual_add" => TypeFilter::ManualAdd,
            "manual_remove" => TypeFilter::ManualRemove,
            "tip" => TypeFilter::Tip,
            "claimed_rakeback" => TypeFilter::ClaimedRakeback,
            "earned_rakeback" => TypeFilter::EarnedRakeback,
            "deposit" => TypeFilter::Deposit,
            "withdrawal" => TypeFilter::Withdrawal,
            "groove_bet" => TypeFilter::GrooveBet,
            "groove_win" => TypeFilter::GrooveWin,
            _ => TypeFilter::Exact(value.to_string())
        }
    }

    pub fn matches(&self, transaction: &Transaction) -> bool {
        let source = transaction.source;
        let kind = |candidates: &[&str]| has_type(transaction, candidates);

        match self {
            TypeFilter::Any => true,
            TypeFilter::ManualAdd => source.is_manual() && kind(&["add_fund"]),
            TypeFilter::ManualRemove => source.is_manual() && kind(&["remove_fund"]),
            TypeFilter::Tip => source == TransactionSource::Tip || kind(&["tip"]),
            TypeFilter::ClaimedRakeback => source == TransactionSource::ClaimedRakeback || kind(&["claimed_rakeback", "claimed"]),
            TypeFilter::EarnedRakeback => source == TransactionSource::EarnedRakeback || kind(&["earned_rakeback", "earned"]),
            TypeFilter::Deposit => source == TransactionSource::Deposit || kind(&["deposit"]),
            TypeFilter::Withdrawal => source == TransactionSource::Withdrawal || kind(&["withdrawal"]),
            TypeFilter::GrooveBet => kind(&["groove_bet", "bet"]),
            TypeFilter::GrooveWin => kind(&["groove_win", "win"]),
            TypeFilter::Exact(value) => transaction.transaction_type.eq_ignore_ascii_case(value)
        }
    }

    /// Whether any record from `feed` could pass this filter.
    ///
    /// Typed matches can also come from analytics records carrying the same type, so the
    /// analytics feed is admitted for every category except the manual ones.
    pub fn admits(&self, feed: ActivityFeed) -> bool {
        let expected = match self {
            TypeFilter::Any | TypeFilter::Exact(_) => return true,
            TypeFilter::ManualAdd | TypeFilter::ManualRemove => return feed == ActivityFeed::ManualFunds,
            TypeFilter::GrooveBet | TypeFilter::GrooveWin => return feed == ActivityFeed::Analytics,
            TypeFilter::Tip => ActivityFeed::Tips,
            TypeFilter::ClaimedRakeback => ActivityFeed::ClaimedRakeback,
            TypeFilter::EarnedRakeback => ActivityFeed::EarnedRakeback,
            TypeFilter::Deposit => ActivityFeed::Deposits,
            TypeFilter::Withdrawal => ActivityFeed::Withdrawals
        };

        feed == expected || feed == ActivityFeed::Analytics
    }
}

fn has_type(transaction: &Transaction, candidates: &[&str]) -> bool {
    candidates.iter().any(|candidate| transaction.transaction_type.eq_ignore_ascii_case(candidate))
}

/// The status, type and search predicates of one query, ready to apply.
#[derive(Debug, Clone)]
pub struct TransactionFilter {
    status: Option<String>,
    transaction_type: TypeFilter,
    search: Option<String>
}

impl TransactionFilter {
    pub fn from_query(query: &ActivityQuery) -> Self {
        let status = query.status_filter.trim();
        let search = query.search_query.trim();

        Self {
            status: (!status.is_empty()).then(|| status.to_string()),
            transaction_type: TypeFilter::parse(&query.transaction_type_filter),
            search: (!search.is_empty()).then(|| search.to_lowercase())
        }
    }

    pub fn type_filter(&self) -> &TypeFilter {
        &self.transaction_type
    }

    pub fn matches(&self, transaction: &Transaction) -> bool {
        self.matches_status(transaction)
            && self.transaction_type.matches(transaction)
            && self.matches_search(transaction)
    }

    pub fn apply(&self, transactions: Vec<Transaction>) -> Vec<Transaction> {
        transactions.into_iter()
            .filter(|transaction| self.matches(transaction))
            .collect()
    }

    /// Exact, case-insensitive. A "pending" filter therefore never lets settled records
    /// ("completed", "approved", "confirmed") through.
    fn matches_status(&self, transaction: &Transaction) -> bool {
        match &self.status {
            None => true,
            Some(status) if status.eq_ignore_ascii_case("pending") => transaction.is_pending(),
            Some(status) => transaction.status.eq_ignore_ascii_case(status)
        }
    }

    fn matches_search(&self, transaction: &Transaction) -> bool {
        let Some(needle) = &self.search else {
            return true
        };

        let contains = |haystack: &str| haystack.to_lowercase().contains(needle.as_str());

        [transaction.id.as_deref(), transaction.round_id.as_deref(), transaction.external_transaction_id.as_deref()]
            .into_iter()
            .flatten()
            .chain([transaction.game_name.as_str(), transaction.provider.as_str()])
            .any(contains)
            || contains(&transaction.amount.to_string())
    }
}
