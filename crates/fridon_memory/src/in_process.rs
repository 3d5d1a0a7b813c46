//! In-process memory.

use crate::{Memory, MemoryError, unix_now};
use parking_lot::Mutex;
use std::collections::HashMap;

struct Entry {
    value: String,
    expires_at: i64,
}

/// Plain in-process [`Memory`] backed by a map.
#[derive(Default)]
pub struct InProcessMemory {
    entries: Mutex<HashMap<String, Entry>>,
}

impl InProcessMemory {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl Memory for InProcessMemory {
    fn set(&self, key: &str, value: &str, ttl_secs: u64) -> Result<(), MemoryError> {
        self.entries.lock().insert(
            key.to_string(),
            Entry {
                value: value.to_string(),
                expires_at: unix_now() + ttl_secs as i64,
            },
        );
        Ok(())
    }

    fn get(&self, key: &str) -> Result<Option<String>, MemoryError> {
        let entries = self.entries.lock();
        Ok(entries
            .get(key)
            .filter(|entry| entry.expires_at > unix_now())
            .map(|entry| entry.value.clone()))
    }

    fn purge_expired(&self) -> Result<usize, MemoryError> {
        let mut entries = self.entries.lock();
        let before = entries.len();
        let now = unix_now();
        entries.retain(|_, entry| entry.expires_at > now);
        Ok(before - entries.len())
    }
}

impl core::fmt::Debug for InProcessMemory {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("InProcessMemory")
            .field("entries", &self.entries.lock().len())
            .finish()
    }
}
