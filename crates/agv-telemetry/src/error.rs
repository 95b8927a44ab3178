//! Error types for agv-telemetry.

use std::time::Duration;

use thiserror::Error;

/// Errors a sink write or flush can produce.
///
/// All of them are per-reading and non-fatal to the tick loop: the emitter
/// retries, then logs and counts them.
#[derive(Debug, Error)]
pub enum SinkError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV write error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON encode error: {0}")]
    Json(#[from] serde_json::Error),

    #[cfg(feature = "sqlite")]
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("sink worker failed: {0}")]
    Worker(#[from] tokio::task::JoinError),

    #[error("write timed out after {0:?}")]
    Timeout(Duration),

    #[error("sink rejected the reading: {0}")]
    Rejected(String),
}

/// Alias for `Result<T, SinkError>`.
pub type SinkResult<T> = Result<T, SinkError>;
