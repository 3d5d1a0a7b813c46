//! Error types for blockchain services.

use thiserror::Error;

/// Errors from Solana RPC and swap operations.
#[derive(Debug, Error)]
pub enum BlockchainError {
    /// Http error (e.g.: connection error, timeout, etc.)
    #[error("http error: {0}")]
    Http(String),

    /// JSON serialization/deserialization error.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    /// Error object returned by the RPC node.
    #[error("rpc error {code}: {message}")]
    Rpc {
        /// JSON-RPC error code.
        code: i64,
        /// JSON-RPC error message.
        message: String,
    },

    /// Non-success response from an HTTP API.
    #[error("provider error: {message}")]
    Provider {
        /// HTTP status code if available.
        status: Option<u16>,
        /// Error message.
        message: String,
    },

    /// The response was missing an expected field.
    #[error("invalid response: {0}")]
    InvalidResponse(String),

    /// The token symbol is not in the known-mint table.
    #[error("unknown token: {0}")]
    UnknownToken(String),
}
