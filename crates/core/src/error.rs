//! Audit-domain error model.

use thiserror::Error;

/// Result type used across the audit domain.
pub type AuditResult<T> = Result<T, AuditError>;

/// Audit-domain error.
///
/// Two failure surfaces exist: construction-time caller bugs and
/// decode-time corruption of previously stored records. Infrastructure
/// concerns (locks, storage) belong elsewhere.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AuditError {
    /// A constructor was called with arguments that can never form a valid
    /// record (e.g. a destination lot on a non-move change). Caller bug,
    /// never retried.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// A stored record could not be decoded (e.g. an unrecognized kind tag,
    /// or a payload field with the wrong type). Other fields of the same
    /// record remain independently readable.
    #[error("corrupt record: {0}")]
    CorruptRecord(String),
}

impl AuditError {
    pub fn invalid_argument(msg: impl Into<String>) -> Self {
        Self::InvalidArgument(msg.into())
    }

    pub fn corrupt(msg: impl Into<String>) -> Self {
        Self::CorruptRecord(msg.into())
    }
}
