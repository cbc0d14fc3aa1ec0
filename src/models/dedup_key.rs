use rust_decimal::Decimal;

use crate::models::Transaction;

/// Identity of the logical event behind one or more raw records.
///
/// Composed of `(roundId ?? id ?? transactionId, betAmount ?? amount, gameId ?? "")`.
/// Fields are kept apart rather than joined into a string so a delimiter inside a value
/// cannot make two different events collide. Records with no reference at all share
/// `reference: None` and will collapse when amount and game also agree.
#[derive(Debug, Clone, Eq, PartialEq, Hash)]
pub struct DedupKey {
    pub reference: Option<String>,
    pub amount: Decimal,
    pub game_id: String
}

impl DedupKey {
    pub fn of(transaction: &Transaction) -> Self {
        let reference = transaction.round_id.as_ref()
            .or(transaction.id.as_ref())
            .or(transaction.transaction_id.as_ref())
            .cloned();

        Self {
            reference,
            amount: transaction.bet_amount.unwrap_or(transaction.amount).normalize(),
            game_id: transaction.game_id.clone().unwrap_or_default()
        }
    }
}
