//! Error types for memory backends.

use thiserror::Error;

/// Errors from memory backend operations.
#[derive(Debug, Error)]
pub enum MemoryError {
    /// The requested backend name is not recognized.
    #[error("unknown memory backend: {0}")]
    UnknownBackend(String),

    /// Underlying SQLite error.
    #[error("sqlite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
}
