mod envelope;
mod raw;
mod source_normalizer;

use serde_json::Value;

use crate::models::{ActivityFeed, PageMeta, Transaction};

pub use envelope::{parse_envelope, ParsedEnvelope};
pub use raw::RawRecord;
pub use source_normalizer::normalize;

/// Parses one endpoint response of `feed` and normalizes every record in it.
pub fn normalize_response(feed: ActivityFeed, body: Value) -> (Vec<Transaction>, Option<PageMeta>) {
    let envelope = parse_envelope(feed, body);
    let transactions = envelope.records.iter()
        .enumerate()
        .map(|(index, raw)| normalize(feed, raw, index))
        .collect();

    (transactions, envelope.meta)
}
