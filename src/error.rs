//! Typed failures for the recoverable tiers. Everything fatal is `anyhow`.

use thiserror::Error;

/// A single input record could not be turned into an output row.
#[derive(Error, Debug)]
pub enum RecordError {
    #[error("failed to decode record: {0}")]
    Decode(#[from] std::io::Error),
}

/// One write attempt on one sink failed.
#[derive(Error, Debug)]
pub enum SinkError {
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
