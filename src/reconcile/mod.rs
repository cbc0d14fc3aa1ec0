mod deduplicator;
mod filter;

pub use deduplicator::{deduplicate, supersedes};
pub use filter::{TransactionFilter, TypeFilter};
