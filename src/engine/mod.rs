mod aggregator;
mod errors;
mod export;

pub use aggregator::{sort_by_timestamp_desc, ActivityAggregator, ActivitySummary, PageOutcome, UnifiedPage};
pub use errors::ExportError;
pub use export::{export_file_name, write_csv, ActivityExporter, ExportCollection, ExportConfig, ExportReport};
