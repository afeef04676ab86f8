//! Shared error type for the backend.

use std::time::Duration;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum BackendError {
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to decode status JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("{0}")]
    Command(String),

    #[error("`{command}` timed out after {timeout:?}")]
    Timeout { command: String, timeout: Duration },

    #[error("configuration error: {0}")]
    Config(String),
}
