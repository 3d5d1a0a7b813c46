//! Response memory backends for Fridon.
//!
//! The generation pipeline remembers answered messages so that repeating a
//! question within the TTL returns the stored answer instead of a fresh
//! generation. Backends are selected by name ([`MemoryBackend`]) and accessed
//! through the [`Memory`] trait:
//!
//! - [`SqliteMemory`] — SQLite-backed store, the default (`"sqlite"`).
//! - [`InProcessMemory`] — plain in-process map (`"in-memory"`), used by
//!   tests and ephemeral deployments.

mod backend;
mod error;
mod in_process;
mod sqlite;

pub use backend::MemoryBackend;
pub use error::MemoryError;
pub use in_process::InProcessMemory;
pub use sqlite::SqliteMemory;

/// A key/value store with per-entry expiry.
///
/// Values are opaque strings; keys are the user messages the pipeline has
/// answered. Implementations must be usable from concurrent generation calls.
pub trait Memory: Send + Sync {
    /// Stores `value` under `key`, expiring after `ttl_secs` seconds.
    ///
    /// Overwrites any previous entry for the same key.
    fn set(&self, key: &str, value: &str, ttl_secs: u64) -> Result<(), MemoryError>;

    /// Returns the value stored under `key`, or `None` when absent or expired.
    fn get(&self, key: &str) -> Result<Option<String>, MemoryError>;

    /// Removes expired entries, returning how many were dropped.
    fn purge_expired(&self) -> Result<usize, MemoryError>;
}

/// Seconds since the Unix epoch.
pub(crate) fn unix_now() -> i64 {
    use std::time::{SystemTime, UNIX_EPOCH};
    // Pre-epoch clocks are not a supported configuration.
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs() as i64)
        .unwrap_or(0)
}
