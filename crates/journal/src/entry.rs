//! Journal entry envelope.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use stocktrail_core::{EntryId, PartId, PartLotId, UserId};

use crate::extra::ExtraMap;
use crate::level::LogLevel;

/// Current payload schema version written by this crate.
///
/// Readers use it to dispatch migrations if the reserved-key layout ever
/// has to change; the short keys themselves are frozen.
pub const SCHEMA_VERSION: u32 = 1;

/// The element a journal entry is about.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "id", rename_all = "snake_case")]
pub enum LogTarget {
    Part(PartId),
    PartLot(PartLotId),
}

/// Envelope for one journal entry.
///
/// This is the unit an audit log appends and loads. Common fields live as
/// named envelope fields; kind-specific fields live in the compact
/// [`ExtraMap`] payload, interpreted relative to `entry_type`.
///
/// Entries are facts: constructed once, never updated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogEntry {
    id: EntryId,
    occurred_at: DateTime<Utc>,

    /// Acting user; `None` for system-initiated changes.
    actor: Option<UserId>,

    level: LogLevel,
    target: Option<LogTarget>,

    /// Stable discriminator naming the entry kind (e.g. `part_stock_changed`).
    entry_type: String,

    /// Payload schema version, see [`SCHEMA_VERSION`].
    version: u32,

    extra: ExtraMap,
}

impl LogEntry {
    pub fn new(
        id: EntryId,
        occurred_at: DateTime<Utc>,
        actor: Option<UserId>,
        level: LogLevel,
        target: Option<LogTarget>,
        entry_type: impl Into<String>,
        extra: ExtraMap,
    ) -> Self {
        Self {
            id,
            occurred_at,
            actor,
            level,
            target,
            entry_type: entry_type.into(),
            version: SCHEMA_VERSION,
            extra,
        }
    }

    pub fn id(&self) -> EntryId {
        self.id
    }

    pub fn occurred_at(&self) -> DateTime<Utc> {
        self.occurred_at
    }

    pub fn actor(&self) -> Option<UserId> {
        self.actor
    }

    pub fn level(&self) -> LogLevel {
        self.level
    }

    pub fn target(&self) -> Option<LogTarget> {
        self.target
    }

    pub fn entry_type(&self) -> &str {
        &self.entry_type
    }

    pub fn version(&self) -> u32 {
        self.version
    }

    pub fn extra(&self) -> &ExtraMap {
        &self.extra
    }

    /// Mutable payload access for the codec that owns this entry.
    pub fn extra_mut(&mut self) -> &mut ExtraMap {
        &mut self.extra
    }
}
