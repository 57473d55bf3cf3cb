//! Stock-change journal records.
//!
//! One record is appended per committed stock mutation of a part lot, so the
//! payload uses single-character keys and a single-character kind tag to keep
//! per-record overhead down. The key names and the tag alphabet are frozen:
//! historical records must remain decodable.

use core::str::FromStr;

use chrono::{DateTime, Utc};

use stocktrail_core::{AuditError, AuditResult, EntryId, PartLotId, UserId};

use crate::entry::{LogEntry, LogTarget};
use crate::extra::ExtraMap;
use crate::level::LogLevel;

/// Envelope discriminator for stock-change records.
pub const ENTRY_TYPE: &str = "part_stock_changed";

/// Maximum stored comment length, in characters, ellipsis included.
pub const COMMENT_MAX_LEN: usize = 300;

const ELLIPSIS: &str = "...";

// Reserved payload keys. Frozen, same as the tag alphabet.
const KEY_KIND: &str = "t";
const KEY_OLD_STOCK: &str = "o";
const KEY_NEW_STOCK: &str = "n";
const KEY_NEW_TOTAL: &str = "p";
const KEY_COMMENT: &str = "c";
const KEY_MOVE_TARGET: &str = "m";

/// Which stock operation a record describes.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum StockChangeKind {
    Add,
    Withdraw,
    Move,
}

impl StockChangeKind {
    /// The single-character tag stored under the `t` key.
    pub fn short_tag(self) -> char {
        match self {
            StockChangeKind::Add => 'a',
            StockChangeKind::Withdraw => 'w',
            StockChangeKind::Move => 'm',
        }
    }

    /// Decode a stored tag character.
    pub fn from_short_tag(tag: char) -> AuditResult<Self> {
        match tag {
            'a' => Ok(StockChangeKind::Add),
            'w' => Ok(StockChangeKind::Withdraw),
            'm' => Ok(StockChangeKind::Move),
            other => Err(AuditError::corrupt(format!(
                "unknown stock change tag: {other:?}"
            ))),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            StockChangeKind::Add => "add",
            StockChangeKind::Withdraw => "withdraw",
            StockChangeKind::Move => "move",
        }
    }
}

impl core::fmt::Display for StockChangeKind {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for StockChangeKind {
    type Err = AuditError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "add" => Ok(StockChangeKind::Add),
            "withdraw" => Ok(StockChangeKind::Withdraw),
            "move" => Ok(StockChangeKind::Move),
            other => Err(AuditError::invalid_argument(format!(
                "unknown stock change kind: {other:?}"
            ))),
        }
    }
}

/// Fully decoded stock change, one variant per kind.
///
/// Each variant carries only the fields legal for its kind, so consumers
/// matching on it never have to re-check field presence.
#[derive(Debug, Clone, PartialEq)]
pub enum StockChange {
    Add {
        lot: PartLotId,
        old_stock: f64,
        new_stock: f64,
        new_total_in_stock: f64,
        comment: String,
    },
    Withdraw {
        lot: PartLotId,
        old_stock: f64,
        new_stock: f64,
        new_total_in_stock: f64,
        comment: String,
    },
    Move {
        lot: PartLotId,
        old_stock: f64,
        new_stock: f64,
        new_total_in_stock: f64,
        comment: String,
        target: PartLotId,
    },
}

/// One stock-change record: a [`LogEntry`] whose payload this codec owns.
///
/// Construction encodes all fields into the payload map eagerly and fails
/// fast; accessors decode lazily, per field, so a record with a corrupt
/// kind tag still yields its numeric fields.
#[derive(Debug, Clone, PartialEq)]
pub struct StockChangeEntry {
    entry: LogEntry,
}

impl StockChangeEntry {
    /// Record added stock on a lot.
    pub fn add(
        lot: PartLotId,
        old_stock: f64,
        new_stock: f64,
        new_total_in_stock: f64,
        comment: &str,
        occurred_at: DateTime<Utc>,
        actor: Option<UserId>,
    ) -> AuditResult<Self> {
        Self::new(
            StockChangeKind::Add,
            lot,
            old_stock,
            new_stock,
            new_total_in_stock,
            comment,
            None,
            occurred_at,
            actor,
        )
    }

    /// Record withdrawn stock from a lot.
    pub fn withdraw(
        lot: PartLotId,
        old_stock: f64,
        new_stock: f64,
        new_total_in_stock: f64,
        comment: &str,
        occurred_at: DateTime<Utc>,
        actor: Option<UserId>,
    ) -> AuditResult<Self> {
        Self::new(
            StockChangeKind::Withdraw,
            lot,
            old_stock,
            new_stock,
            new_total_in_stock,
            comment,
            None,
            occurred_at,
            actor,
        )
    }

    /// Record stock moved from a lot to another lot.
    pub fn move_stock(
        lot: PartLotId,
        old_stock: f64,
        new_stock: f64,
        new_total_in_stock: f64,
        comment: &str,
        target: PartLotId,
        occurred_at: DateTime<Utc>,
        actor: Option<UserId>,
    ) -> AuditResult<Self> {
        Self::new(
            StockChangeKind::Move,
            lot,
            old_stock,
            new_stock,
            new_total_in_stock,
            comment,
            Some(target),
            occurred_at,
            actor,
        )
    }

    /// Shared builder behind the per-kind constructors.
    ///
    /// `move_target` must be present exactly when `kind` is
    /// [`StockChangeKind::Move`].
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        kind: StockChangeKind,
        lot: PartLotId,
        old_stock: f64,
        new_stock: f64,
        new_total_in_stock: f64,
        comment: &str,
        move_target: Option<PartLotId>,
        occurred_at: DateTime<Utc>,
        actor: Option<UserId>,
    ) -> AuditResult<Self> {
        match (kind, move_target) {
            (StockChangeKind::Move, None) => {
                return Err(AuditError::invalid_argument(
                    "move records require a destination lot",
                ));
            }
            (StockChangeKind::Add | StockChangeKind::Withdraw, Some(_)) => {
                return Err(AuditError::invalid_argument(
                    "a destination lot can only be given for move records",
                ));
            }
            _ => {}
        }

        for (name, value) in [
            ("old_stock", old_stock),
            ("new_stock", new_stock),
            ("new_total_in_stock", new_total_in_stock),
        ] {
            if !value.is_finite() {
                return Err(AuditError::invalid_argument(format!(
                    "{name} must be finite, got {value}"
                )));
            }
        }

        let mut extra = ExtraMap::new();
        extra.set_str(KEY_KIND, kind.short_tag().to_string());
        extra.set_f64(KEY_OLD_STOCK, old_stock);
        extra.set_f64(KEY_NEW_STOCK, new_stock);
        extra.set_f64(KEY_NEW_TOTAL, new_total_in_stock);

        if !comment.is_empty() {
            extra.set_str(KEY_COMMENT, truncate_comment(comment));
        }

        if let Some(target) = move_target {
            extra.set_u64(KEY_MOVE_TARGET, target.value());
        }

        let entry = LogEntry::new(
            EntryId::new(),
            occurred_at,
            actor,
            // Same level as every other element-change entry.
            LogLevel::Info,
            Some(LogTarget::PartLot(lot)),
            ENTRY_TYPE,
            extra,
        );

        Ok(Self { entry })
    }

    /// Wrap a previously stored entry for typed access.
    ///
    /// Fails with `InvalidArgument` when the envelope is not a stock-change
    /// entry; payload corruption only surfaces from the individual accessors.
    pub fn from_entry(entry: LogEntry) -> AuditResult<Self> {
        if entry.entry_type() != ENTRY_TYPE {
            return Err(AuditError::invalid_argument(format!(
                "expected a `{ENTRY_TYPE}` entry, got `{}`",
                entry.entry_type()
            )));
        }
        Ok(Self { entry })
    }

    /// The kind of stock operation this record describes.
    pub fn kind(&self) -> AuditResult<StockChangeKind> {
        let tag = self
            .entry
            .extra()
            .str_value(KEY_KIND)
            .ok_or_else(|| AuditError::corrupt(format!("missing field `{KEY_KIND}`")))?;

        let mut chars = tag.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => StockChangeKind::from_short_tag(c),
            _ => Err(AuditError::corrupt(format!(
                "stock change tag must be a single character, got {tag:?}"
            ))),
        }
    }

    /// Lot stock before the change.
    pub fn old_stock(&self) -> AuditResult<f64> {
        self.entry.extra().require_f64(KEY_OLD_STOCK)
    }

    /// Lot stock after the change.
    pub fn new_stock(&self) -> AuditResult<f64> {
        self.entry.extra().require_f64(KEY_NEW_STOCK)
    }

    /// Aggregate part stock after the change, denormalized for history views.
    pub fn new_total_in_stock(&self) -> AuditResult<f64> {
        self.entry.extra().require_f64(KEY_NEW_TOTAL)
    }

    /// The stored (possibly truncated) comment, or `""` when none was given.
    pub fn comment(&self) -> &str {
        self.entry.extra().str_value(KEY_COMMENT).unwrap_or("")
    }

    /// Absolute difference between old and new lot stock. Derived, not stored.
    pub fn change_amount(&self) -> AuditResult<f64> {
        Ok((self.new_stock()? - self.old_stock()?).abs())
    }

    /// Destination lot of a move record. `Ok(None)` for non-move records.
    pub fn move_target(&self) -> AuditResult<Option<PartLotId>> {
        Ok(self
            .entry
            .extra()
            .opt_u64(KEY_MOVE_TARGET)?
            .map(PartLotId::new))
    }

    /// The lot this record is about, read from the envelope target.
    pub fn lot(&self) -> AuditResult<PartLotId> {
        match self.entry.target() {
            Some(LogTarget::PartLot(lot)) => Ok(lot),
            other => Err(AuditError::corrupt(format!(
                "stock change entry targets {other:?}, expected a part lot"
            ))),
        }
    }

    /// Eagerly decode the whole record into its per-kind form.
    pub fn decode(&self) -> AuditResult<StockChange> {
        let lot = self.lot()?;
        let old_stock = self.old_stock()?;
        let new_stock = self.new_stock()?;
        let new_total_in_stock = self.new_total_in_stock()?;
        let comment = self.comment().to_string();

        Ok(match self.kind()? {
            StockChangeKind::Add => StockChange::Add {
                lot,
                old_stock,
                new_stock,
                new_total_in_stock,
                comment,
            },
            StockChangeKind::Withdraw => StockChange::Withdraw {
                lot,
                old_stock,
                new_stock,
                new_total_in_stock,
                comment,
            },
            StockChangeKind::Move => {
                let target = self.move_target()?.ok_or_else(|| {
                    AuditError::corrupt(format!("move record is missing field `{KEY_MOVE_TARGET}`"))
                })?;
                StockChange::Move {
                    lot,
                    old_stock,
                    new_stock,
                    new_total_in_stock,
                    comment,
                    target,
                }
            }
        })
    }

    pub fn entry(&self) -> &LogEntry {
        &self.entry
    }

    pub fn into_entry(self) -> LogEntry {
        self.entry
    }
}

/// Truncate a comment to [`COMMENT_MAX_LEN`] characters, ellipsis included.
///
/// Counts characters, not bytes, so multi-byte comments truncate cleanly.
fn truncate_comment(comment: &str) -> String {
    if comment.chars().count() <= COMMENT_MAX_LEN {
        return comment.to_string();
    }

    let kept = COMMENT_MAX_LEN - ELLIPSIS.chars().count();
    let mut truncated: String = comment.chars().take(kept).collect();
    truncated.push_str(ELLIPSIS);
    truncated
}
