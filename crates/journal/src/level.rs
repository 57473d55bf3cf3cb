//! Severity levels for journal entries.
//!
//! Levels are persisted as compact numeric codes, so the code assignment is
//! part of the storage format and must stay stable.

use serde::{Deserialize, Serialize};

use stocktrail_core::{AuditError, AuditResult};

/// Severity of a journal entry.
///
/// The eight PSR-style levels, ordered from most to least severe. Stock
/// change records are always [`LogLevel::Info`].
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub enum LogLevel {
    Emergency,
    Alert,
    Critical,
    Error,
    Warning,
    Notice,
    Info,
    Debug,
}

impl LogLevel {
    /// The stored numeric code of this level.
    pub fn code(self) -> u8 {
        match self {
            LogLevel::Emergency => 0,
            LogLevel::Alert => 1,
            LogLevel::Critical => 2,
            LogLevel::Error => 3,
            LogLevel::Warning => 4,
            LogLevel::Notice => 5,
            LogLevel::Info => 6,
            LogLevel::Debug => 7,
        }
    }

    /// Decode a stored numeric code.
    pub fn from_code(code: u8) -> AuditResult<Self> {
        match code {
            0 => Ok(LogLevel::Emergency),
            1 => Ok(LogLevel::Alert),
            2 => Ok(LogLevel::Critical),
            3 => Ok(LogLevel::Error),
            4 => Ok(LogLevel::Warning),
            5 => Ok(LogLevel::Notice),
            6 => Ok(LogLevel::Info),
            7 => Ok(LogLevel::Debug),
            other => Err(AuditError::corrupt(format!("unknown level code: {other}"))),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            LogLevel::Emergency => "emergency",
            LogLevel::Alert => "alert",
            LogLevel::Critical => "critical",
            LogLevel::Error => "error",
            LogLevel::Warning => "warning",
            LogLevel::Notice => "notice",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
        }
    }
}

impl core::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.name())
    }
}

impl From<LogLevel> for u8 {
    fn from(level: LogLevel) -> Self {
        level.code()
    }
}

impl TryFrom<u8> for LogLevel {
    type Error = AuditError;

    fn try_from(code: u8) -> Result<Self, AuditError> {
        LogLevel::from_code(code)
    }
}
