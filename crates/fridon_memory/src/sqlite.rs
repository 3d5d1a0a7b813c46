//! SQLite-backed memory.

use crate::{Memory, MemoryError, unix_now};
use parking_lot::Mutex;
use rusqlite::{Connection, OptionalExtension, params};
use std::path::Path;

/// SQLite-backed [`Memory`].
///
/// Entries live in a single `cache` table keyed by message, with an absolute
/// expiry timestamp. Reads filter on expiry rather than relying on eager
/// cleanup; [`purge_expired`](Memory::purge_expired) reclaims the rows.
pub struct SqliteMemory {
    conn: Mutex<Connection>,
}

impl SqliteMemory {
    /// Opens an in-memory database. Contents are lost when dropped.
    pub fn in_memory() -> Result<Self, MemoryError> {
        Self::from_connection(Connection::open_in_memory()?)
    }

    /// Opens (or creates) a database file at `path`.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, MemoryError> {
        Self::from_connection(Connection::open(path)?)
    }

    fn from_connection(conn: Connection) -> Result<Self, MemoryError> {
        conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS cache (
                key        TEXT PRIMARY KEY,
                value      TEXT NOT NULL,
                expires_at INTEGER NOT NULL
            )",
        )?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }
}

impl Memory for SqliteMemory {
    fn set(&self, key: &str, value: &str, ttl_secs: u64) -> Result<(), MemoryError> {
        let expires_at = unix_now() + ttl_secs as i64;
        self.conn.lock().execute(
            "INSERT OR REPLACE INTO cache (key, value, expires_at) VALUES (?1, ?2, ?3)",
            params![key, value, expires_at],
        )?;
        Ok(())
    }

    fn get(&self, key: &str) -> Result<Option<String>, MemoryError> {
        let value = self
            .conn
            .lock()
            .query_row(
                "SELECT value FROM cache WHERE key = ?1 AND expires_at > ?2",
                params![key, unix_now()],
                |row| row.get(0),
            )
            .optional()?;
        Ok(value)
    }

    fn purge_expired(&self) -> Result<usize, MemoryError> {
        let dropped = self
            .conn
            .lock()
            .execute("DELETE FROM cache WHERE expires_at <= ?1", params![unix_now()])?;
        if dropped > 0 {
            tracing::debug!(dropped, "purged expired memory entries");
        }
        Ok(dropped)
    }
}

impl core::fmt::Debug for SqliteMemory {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("SqliteMemory").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_then_get() {
        let memory = SqliteMemory::in_memory().unwrap();
        memory.set("what is SOL", "an answer", 3600).unwrap();
        assert_eq!(
            memory.get("what is SOL").unwrap().as_deref(),
            Some("an answer")
        );
    }

    #[test]
    fn missing_key_is_none() {
        let memory = SqliteMemory::in_memory().unwrap();
        assert!(memory.get("nothing here").unwrap().is_none());
    }

    #[test]
    fn set_overwrites_previous_value() {
        let memory = SqliteMemory::in_memory().unwrap();
        memory.set("k", "old", 3600).unwrap();
        memory.set("k", "new", 3600).unwrap();
        assert_eq!(memory.get("k").unwrap().as_deref(), Some("new"));
    }

    #[test]
    fn zero_ttl_entry_is_expired() {
        let memory = SqliteMemory::in_memory().unwrap();
        memory.set("k", "v", 0).unwrap();
        assert!(memory.get("k").unwrap().is_none());
    }

    #[test]
    fn purge_drops_only_expired_rows() {
        let memory = SqliteMemory::in_memory().unwrap();
        memory.set("stale", "v", 0).unwrap();
        memory.set("fresh", "v", 3600).unwrap();

        assert_eq!(memory.purge_expired().unwrap(), 1);
        assert!(memory.get("fresh").unwrap().is_some());
    }
}
