//! Memory backend selection.

use crate::{InProcessMemory, Memory, MemoryError, SqliteMemory};
use std::str::FromStr;

/// Named persistence strategy for generated responses.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum MemoryBackend {
    /// SQLite-backed store (the default).
    #[default]
    Sqlite,
    /// Plain in-process map, nothing survives the process.
    InProcess,
}

impl MemoryBackend {
    /// Opens the selected backend.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing store cannot be initialized.
    pub fn open(self) -> Result<Box<dyn Memory>, MemoryError> {
        match self {
            Self::Sqlite => Ok(Box::new(SqliteMemory::in_memory()?)),
            Self::InProcess => Ok(Box::new(InProcessMemory::new())),
        }
    }

    /// The canonical name for this backend.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Sqlite => "sqlite",
            Self::InProcess => "in-memory",
        }
    }
}

impl FromStr for MemoryBackend {
    type Err = MemoryError;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        match name {
            "sqlite" => Ok(Self::Sqlite),
            "in-memory" | "memory" => Ok(Self::InProcess),
            other => Err(MemoryError::UnknownBackend(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_known_backends() {
        assert_eq!("sqlite".parse::<MemoryBackend>().unwrap(), MemoryBackend::Sqlite);
        assert_eq!(
            "in-memory".parse::<MemoryBackend>().unwrap(),
            MemoryBackend::InProcess
        );
        assert_eq!(
            "memory".parse::<MemoryBackend>().unwrap(),
            MemoryBackend::InProcess
        );
    }

    #[test]
    fn rejects_unknown_backend() {
        assert!(matches!(
            "redis".parse::<MemoryBackend>(),
            Err(MemoryError::UnknownBackend(_))
        ));
    }

    #[test]
    fn open_round_trips_a_value() {
        let memory = MemoryBackend::Sqlite.open().unwrap();
        memory.set("k", "v", 60).unwrap();
        assert_eq!(memory.get("k").unwrap().as_deref(), Some("v"));
    }
}
