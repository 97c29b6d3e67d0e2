//! Error types for the harness primitives

use thiserror::Error;

/// Result type alias using [`HarnessError`]
pub type HarnessResult<T> = std::result::Result<T, HarnessError>;

#[derive(Error, Debug)]
pub enum HarnessError {
    #[error("backend rejected {kind} \"{name}\": {reason}")]
    Provision {
        kind: String,
        name: String,
        reason: String,
    },

    #[error("timed out after {waited_ms} ms waiting for {what} (last: {last})")]
    PollTimeout {
        what: String,
        waited_ms: u64,
        last: String,
    },

    #[error("unknown fixture alias: {0}")]
    UnknownAlias(String),

    #[error("invalid selector: {0}")]
    InvalidSelector(String),

    #[error("invalid scenario transition: {from} -> {to}")]
    InvalidTransition { from: String, to: String },

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
