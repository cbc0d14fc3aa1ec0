use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer};
use serde_json::Value;
use tracing::{debug, warn};

use crate::models::{ActivityFeed, PageMeta};
use crate::normalizer::RawRecord;
use crate::types::lenient_decimal;

/// Records and paging data lifted out of one endpoint response.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParsedEnvelope {
    pub records: Vec<RawRecord>,
    pub meta: Option<PageMeta>
}

/// `{success, data: [...], meta: {...}}`, shared by the analytics, rakeback and tips endpoints.
#[derive(Debug, Deserialize)]
struct AnalyticsEnvelope {
    #[serde(default)]
    success: Option<bool>,
    data: Vec<Value>,
    #[serde(default)]
    meta: Option<AnalyticsMeta>
}

#[derive(Debug, Deserialize)]
struct AnalyticsMeta {
    #[serde(default, deserialize_with = "lenient_count")]
    total: Option<u64>,
    #[serde(default, deserialize_with = "lenient_count")]
    page: Option<u64>,
    #[serde(default, deserialize_with = "lenient_count")]
    page_size: Option<u64>,
    #[serde(default, deserialize_with = "lenient_count")]
    pages: Option<u64>,
    #[serde(default, deserialize_with = "lenient_decimal")]
    total_bet_amount: Option<Decimal>,
    #[serde(default, deserialize_with = "lenient_decimal")]
    total_win_amount: Option<Decimal>
}

/// Deposits and withdrawals come back either wrapped or as a bare array.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum LedgerEnvelope {
    Wrapped { data: LedgerData },
    Bare(Vec<Value>)
}

#[derive(Debug, Deserialize)]
struct LedgerData {
    #[serde(default)]
    deposits: Option<Vec<Value>>,
    #[serde(default)]
    withdrawals: Option<Vec<Value>>,
    #[serde(default, deserialize_with = "lenient_count")]
    total_count: Option<u64>
}

#[derive(Debug, Deserialize)]
struct ManualFundsEnvelope {
    data: ManualFundsData
}

#[derive(Debug, Deserialize)]
struct ManualFundsData {
    manual_funds: Vec<Value>,
    #[serde(default)]
    pagination: Option<ManualFundsPagination>
}

#[derive(Debug, Deserialize)]
struct ManualFundsPagination {
    #[serde(default, deserialize_with = "lenient_count")]
    total_count: Option<u64>
}

/// Parses a response body with the adapter belonging to `feed`.
///
/// Any mismatch with the expected shape yields an empty envelope: the feed then simply
/// contributes nothing to the view.
pub fn parse_envelope(feed: ActivityFeed, body: Value) -> ParsedEnvelope {
    let parsed = match feed {
        ActivityFeed::Analytics | ActivityFeed::Tips | ActivityFeed::ClaimedRakeback | ActivityFeed::EarnedRakeback => {
            parse_analytics(body)
        },
        ActivityFeed::Deposits => parse_ledger(body, LedgerKind::Deposits),
        ActivityFeed::Withdrawals => parse_ledger(body, LedgerKind::Withdrawals),
        ActivityFeed::ManualFunds => parse_manual_funds(body)
    };

    match parsed {
        Ok((values, meta)) => ParsedEnvelope {
            records: collect_records(feed, values),
            meta
        },
        Err(reason) => {
            warn!("Response from feed [{feed}] did not match its schema: {reason}");
            ParsedEnvelope::default()
        }
    }
}

type Parsed = Result<(Vec<Value>, Option<PageMeta>), String>;

fn parse_analytics(body: Value) -> Parsed {
    let envelope: AnalyticsEnvelope = serde_json::from_value(body).map_err(|error| error.to_string())?;

    if envelope.success == Some(false) {
        return Err("envelope reported success=false".to_string());
    }

    let meta = envelope.meta.map(|meta| PageMeta {
        total: meta.total,
        page: meta.page,
        page_size: meta.page_size,
        pages: meta.pages,
        total_bet_amount: meta.total_bet_amount,
        total_win_amount: meta.total_win_amount
    });

    Ok((envelope.data, meta))
}

#[derive(Debug, Clone, Copy)]
enum LedgerKind {
    Deposits,
    Withdrawals
}

fn parse_ledger(body: Value, kind: LedgerKind) -> Parsed {
    let envelope: LedgerEnvelope = serde_json::from_value(body).map_err(|error| error.to_string())?;

    match envelope {
        LedgerEnvelope::Bare(values) => Ok((values, None)),
        LedgerEnvelope::Wrapped { data } => {
            let values = match kind {
                LedgerKind::Deposits => data.deposits,
                LedgerKind::Withdrawals => data.withdrawals
            };
            let values = values.ok_or_else(|| format!("missing data.{kind:?}").to_lowercase())?;

            Ok((values, data.total_count.map(PageMeta::with_total)))
        }
    }
}

fn parse_manual_funds(body: Value) -> Parsed {
    let envelope: ManualFundsEnvelope = serde_json::from_value(body).map_err(|error| error.to_string())?;
    let total = envelope.data.pagination.and_then(|pagination| pagination.total_count);

    Ok((envelope.data.manual_funds, total.map(PageMeta::with_total)))
}

fn collect_records(feed: ActivityFeed, values: Vec<Value>) -> Vec<RawRecord> {
    values.iter()
        .filter_map(|value| {
            let record = RawRecord::from_value(value);

            if record.is_none() {
                debug!("Skipping non-object entry in feed [{feed}]");
            }

            record
        })
        .collect()
}

fn lenient_count<'de, D>(deserializer: D) -> Result<Option<u64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;

    Ok(match value {
        Some(Value::Number(number)) => number.as_u64(),
        Some(Value::String(text)) => text.trim().parse().ok(),
        _ => None
    })
}
