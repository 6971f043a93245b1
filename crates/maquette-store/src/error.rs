//! Store error type.

use std::path::PathBuf;

/// Errors that can occur in the stores.
///
/// `NotFound` and `Corrupt` are distinguished here even though the HTTP
/// layer collapses both to a 404, so tests and callers can assert on cause.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("not found: {0}")]
    NotFound(String),

    #[error("corrupt document {path}: {message}")]
    Corrupt { path: PathBuf, message: String },

    #[error("failed to encode document: {0}")]
    Encode(#[source] serde_json::Error),

    #[error("invalid data URL: missing base64 payload")]
    InvalidDataUrl,

    #[error("base64 decode error: {0}")]
    Decode(#[from] base64::DecodeError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
