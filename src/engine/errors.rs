use thiserror::Error;
use tokio::task::JoinError;

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("Export error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Export error: {0}")]
    Csv(#[from] csv::Error),
    #[error("Export error: CSV writer task did not finish: {0}")]
    Join(#[from] JoinError)
}
