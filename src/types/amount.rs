use crate::types::errors::AmountError;
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer};
use serde_json::Value;
use std::str::FromStr;

/// Parses decimal text as sent by the platform APIs ("12.50", "-3", "1e-4").
pub fn parse_amount(value: &str) -> Result<Decimal, AmountError> {
    let value = value.trim();

    if value.is_empty() {
        return Err(AmountError::Empty);
    }

    Decimal::from_str(value)
        .or_else(|_| Decimal::from_scientific(value))
        .map_err(|_| AmountError::InvalidFormat(value.to_string()))
}

/// Reads a decimal out of a JSON value that may be either a string or a number.
///
/// Numbers go through their textual form so `0.1` stays `0.1` instead of picking up
/// binary float noise. Anything else yields `None`.
pub fn decimal_from_value(value: &Value) -> Option<Decimal> {
    match value {
        Value::String(text) => parse_amount(text).ok(),
        Value::Number(number) => parse_amount(&number.to_string()).ok(),
        _ => None
    }
}

/// Serde adapter for amount fields that must never fail the surrounding record.
pub fn lenient_decimal<'de, D>(deserializer: D) -> Result<Option<Decimal>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().and_then(decimal_from_value))
}
