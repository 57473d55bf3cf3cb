//! Append-only audit log storage.

use std::sync::RwLock;

use thiserror::Error;

use crate::entry::{LogEntry, LogTarget};

/// Storage-level error.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("audit log lock poisoned")]
    LockPoisoned,
}

/// A persisted journal entry with its assigned position.
#[derive(Debug, Clone, PartialEq)]
pub struct StoredEntry {
    /// 1-based, monotonically increasing append position.
    pub sequence: u64,
    pub entry: LogEntry,
}

/// Append-only audit log.
///
/// Entries are facts: once appended they are never updated or removed.
/// Implementations own append ordering and durability; the record codecs
/// stay pure.
pub trait AuditLog {
    /// Append one entry, returning its assigned sequence number.
    fn append(&self, entry: LogEntry) -> Result<u64, StoreError>;

    /// All entries, in append order.
    fn load_all(&self) -> Result<Vec<StoredEntry>, StoreError>;

    /// Entries about one target element, in append order.
    fn load_for_target(&self, target: LogTarget) -> Result<Vec<StoredEntry>, StoreError>;
}

/// In-memory append-only audit log.
///
/// Intended for tests/dev. Not optimized for performance.
#[derive(Debug, Default)]
pub struct InMemoryAuditLog {
    entries: RwLock<Vec<StoredEntry>>,
}

impl InMemoryAuditLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.read().map(|e| e.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl AuditLog for InMemoryAuditLog {
    fn append(&self, entry: LogEntry) -> Result<u64, StoreError> {
        let mut entries = self.entries.write().map_err(|_| StoreError::LockPoisoned)?;

        let sequence = entries.len() as u64 + 1;
        tracing::debug!(
            entry_id = %entry.id(),
            entry_type = entry.entry_type(),
            sequence,
            "appending audit log entry"
        );
        entries.push(StoredEntry { sequence, entry });

        Ok(sequence)
    }

    fn load_all(&self) -> Result<Vec<StoredEntry>, StoreError> {
        let entries = self.entries.read().map_err(|_| StoreError::LockPoisoned)?;
        Ok(entries.clone())
    }

    fn load_for_target(&self, target: LogTarget) -> Result<Vec<StoredEntry>, StoreError> {
        let entries = self.entries.read().map_err(|_| StoreError::LockPoisoned)?;
        Ok(entries
            .iter()
            .filter(|stored| stored.entry.target() == Some(target))
            .cloned()
            .collect())
    }
}
