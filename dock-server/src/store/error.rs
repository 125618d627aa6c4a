//! Persistence error types.

use std::path::PathBuf;

/// Errors that can occur when reading or writing local state.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Filesystem operation failed
    #[error("I/O error on {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Stored content could not be decoded
    #[error("corrupt store {path:?}: {message}")]
    Corrupt { path: PathBuf, message: String },

    /// Value could not be encoded
    #[error("failed to serialize: {0}")]
    Serialize(#[from] serde_json::Error),

    /// The blocking task running the operation panicked or was cancelled
    #[error("store task failed: {0}")]
    Task(String),
}
