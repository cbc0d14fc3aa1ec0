use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde_json::{Map, Value};

use crate::types::{decimal_from_value, timestamp_from_value};

/// A single upstream record with every field the activity view reads pulled out.
///
/// Fields are looked up by each of their known spellings (camelCase first, then
/// snake_case) and the first value that actually parses wins, so a record can never
/// fail to load because of one odd field.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawRecord {
    pub id: Option<String>,
    pub transaction_id: Option<String>,
    pub round_id: Option<String>,
    pub game_id: Option<String>,
    pub game_name: Option<String>,
    pub provider: Option<String>,
    pub external_transaction_id: Option<String>,
    pub transaction_type: Option<String>,
    pub amount: Option<Decimal>,
    pub usd: Option<Decimal>,
    pub change_amount: Option<Decimal>,
    pub bet_amount: Option<Decimal>,
    pub win_amount: Option<Decimal>,
    pub net_result: Option<Decimal>,
    pub balance_before: Option<Decimal>,
    pub balance_after: Option<Decimal>,
    pub currency: Option<String>,
    pub status: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
    pub timestamp: Option<DateTime<Utc>>,
    pub date: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>
}

impl RawRecord {
    /// Returns `None` only when the value is not a JSON object.
    pub fn from_value(value: &Value) -> Option<Self> {
        value.as_object().map(Self::from_object)
    }

    pub fn from_object(object: &Map<String, Value>) -> Self {
        Self {
            id: text(object, &["id"]),
            transaction_id: text(object, &["transactionId", "transaction_id"]),
            round_id: text(object, &["roundId", "round_id"]),
            game_id: text(object, &["gameId", "game_id"]),
            game_name: text(object, &["gameName", "game_name"]),
            provider: text(object, &["provider", "providerName", "provider_name"]),
            external_transaction_id: text(object, &["externalTransactionId", "external_transaction_id"]),
            transaction_type: text(object, &["type", "transactionType", "transaction_type"]),
            amount: decimal(object, &["amount"]),
            usd: decimal(object, &["usd"]),
            change_amount: decimal(object, &["changeAmount", "change_amount"]),
            bet_amount: decimal(object, &["betAmount", "bet_amount"]),
            win_amount: decimal(object, &["winAmount", "win_amount"]),
            net_result: decimal(object, &["netResult", "net_result"]),
            balance_before: decimal(object, &["balanceBefore", "balance_before"]),
            balance_after: decimal(object, &["balanceAfter", "balance_after"]),
            currency: text(object, &["currency"]),
            status: text(object, &["status"]),
            created_at: timestamp(object, &["createdAt", "created_at"]),
            timestamp: timestamp(object, &["timestamp"]),
            date: timestamp(object, &["date"]),
            updated_at: timestamp(object, &["updatedAt", "updated_at"])
        }
    }
}

fn text(object: &Map<String, Value>, keys: &[&str]) -> Option<String> {
    keys.iter().find_map(|key| match object.get(*key)? {
        Value::String(value) if !value.is_empty() => Some(value.clone()),
        Value::Number(value) => Some(value.to_string()),
        _ => None
    })
}

fn decimal(object: &Map<String, Value>, keys: &[&str]) -> Option<Decimal> {
    keys.iter().find_map(|key| object.get(*key).and_then(decimal_from_value))
}

fn timestamp(object: &Map<String, Value>, keys: &[&str]) -> Option<DateTime<Utc>> {
    keys.iter().find_map(|key| object.get(*key).and_then(timestamp_from_value))
}
