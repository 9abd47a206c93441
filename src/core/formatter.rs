//! Record formatter: one log event to one JSON line
//!
//! Output is a flat JSON object holding every surviving field of the event
//! plus two derived keys, `utc_time` and `timestamp`, both computed from the
//! event's own capture time.

use super::error::{LoggerError, Result};
use super::log_entry::LogEntry;
use super::timestamp::{epoch_seconds, utc_time};
use std::collections::BTreeSet;

/// JSON formatter for CloudWatch-style structured records
///
/// # Example
///
/// ```
/// use cloudwatch_logging::prelude::*;
///
/// let formatter = CloudwatchFormatter::new();
/// let entry = LogEntry::new("app", LogLevel::Info, "started");
/// let line = formatter.format(&entry).unwrap();
///
/// let parsed: serde_json::Value = serde_json::from_str(&line).unwrap();
/// assert_eq!(parsed["message"], "started");
/// assert!(parsed["utc_time"].is_string());
/// assert!(parsed["timestamp"].is_f64());
/// ```
#[derive(Debug, Clone, Default)]
pub struct CloudwatchFormatter {
    denylist: BTreeSet<String>,
}

impl CloudwatchFormatter {
    /// Formatter with an empty denylist
    pub fn new() -> Self {
        Self::default()
    }

    /// Formatter that never emits the given keys
    ///
    /// Prefer a `FieldFilter` on the logger; the denylist is fixed for the
    /// formatter's lifetime.
    pub fn with_denylist<I, S>(keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            denylist: keys.into_iter().map(Into::into).collect(),
        }
    }

    pub fn denylist(&self) -> &BTreeSet<String> {
        &self.denylist
    }

    /// Serialize `entry` to a single JSON line (no trailing newline)
    ///
    /// All-or-nothing: any field without a JSON representation fails the
    /// whole call with `LoggerError::Serialization` naming that field.
    pub fn format(&self, entry: &LogEntry) -> Result<String> {
        let value = self.to_json(entry)?;
        serde_json::to_string(&value).map_err(|e| LoggerError::serialization("<record>", e.to_string()))
    }

    /// Build the JSON object without rendering it
    pub fn to_json(&self, entry: &LogEntry) -> Result<serde_json::Value> {
        let mut json_obj = serde_json::Map::with_capacity(entry.fields.len() + 2);

        for (key, value) in entry.fields.iter() {
            if self.denylist.contains(key) {
                continue;
            }
            json_obj.insert(key.clone(), value.to_json_value(key)?);
        }

        json_obj.insert(
            "utc_time".to_string(),
            serde_json::Value::String(utc_time(&entry.timestamp)),
        );
        let timestamp = epoch_seconds(&entry.timestamp);
        let timestamp = serde_json::Number::from_f64(timestamp)
            .ok_or_else(|| LoggerError::serialization("timestamp", format!("non-finite {}", timestamp)))?;
        json_obj.insert("timestamp".to_string(), serde_json::Value::Number(timestamp));

        Ok(serde_json::Value::Object(json_obj))
    }
}
