//! The flat key/value payload area ("extra" slot) of a journal entry.
//!
//! Every entry kind stores its kind-specific fields here under reserved
//! short keys. Keys are scoped per entry type: `c` on a stock-change entry
//! and `c` on some other entry kind are unrelated, so consumers must
//! dispatch on the envelope's entry type before interpreting the payload.
//!
//! Backed by `serde_json::Map`, which keeps keys in sorted order; together
//! with lossless value storage this makes encode -> decode -> re-encode
//! byte-identical.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use stocktrail_core::{AuditError, AuditResult};

/// Compact payload map of a journal entry.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ExtraMap(Map<String, Value>);

impl ExtraMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_f64(&mut self, key: &str, value: f64) {
        self.0.insert(key.to_string(), Value::from(value));
    }

    pub fn set_u64(&mut self, key: &str, value: u64) {
        self.0.insert(key.to_string(), Value::from(value));
    }

    pub fn set_str(&mut self, key: &str, value: impl Into<String>) {
        self.0.insert(key.to_string(), Value::String(value.into()));
    }

    /// Read a numeric field that must be present.
    ///
    /// Stored integers decode as their float value.
    pub fn require_f64(&self, key: &str) -> AuditResult<f64> {
        match self.0.get(key) {
            Some(value) => value
                .as_f64()
                .ok_or_else(|| AuditError::corrupt(format!("field `{key}` is not numeric"))),
            None => Err(AuditError::corrupt(format!("missing field `{key}`"))),
        }
    }

    /// Read an optional string field. Absent or non-string values read as `None`.
    pub fn str_value(&self, key: &str) -> Option<&str> {
        self.0.get(key).and_then(Value::as_str)
    }

    /// Read an optional unsigned-integer field.
    ///
    /// Absence is not an error; a present value of the wrong type is.
    pub fn opt_u64(&self, key: &str) -> AuditResult<Option<u64>> {
        match self.0.get(key) {
            Some(value) => value
                .as_u64()
                .map(Some)
                .ok_or_else(|| {
                    AuditError::corrupt(format!("field `{key}` is not an unsigned integer"))
                }),
            None => Ok(None),
        }
    }

    pub fn contains(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Raw mutable access, for codecs owning this map and for tests that
    /// simulate storage corruption.
    pub fn raw_mut(&mut self) -> &mut Map<String, Value> {
        &mut self.0
    }
}
