//! Core error type.
//!
//! Only startup can fail in this crate: configuration is either readable and
//! valid, or the run never begins.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("configuration error: {0}")]
    Config(String),

    #[error("config parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Shorthand result type for `agv-core`.
pub type CoreResult<T> = Result<T, CoreError>;
