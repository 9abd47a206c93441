//! Field appender: injects a fixed field set unless already present

use crate::core::{FieldValue, LogContext};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::Arc;

/// Fields to inject into every event
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AppenderConfig {
    fields: BTreeMap<String, FieldValue>,
}

impl AppenderConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_field<K, V>(mut self, key: K, value: V) -> Self
    where
        K: Into<String>,
        V: Into<FieldValue>,
    {
        self.fields.insert(key.into(), value.into());
        self
    }

    pub fn get(&self, key: &str) -> Option<&FieldValue> {
        self.fields.get(key)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &FieldValue)> {
        self.fields.iter()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl<K, V> FromIterator<(K, V)> for AppenderConfig
where
    K: Into<String>,
    V: Into<FieldValue>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            fields: iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect(),
        }
    }
}

impl From<LogContext> for AppenderConfig {
    fn from(context: LogContext) -> Self {
        context.into_iter().collect()
    }
}

/// Appender transform
///
/// Cloning yields another handle to the same configuration slot, so a
/// caller can keep a clone and `update` it after the logger is built.
///
/// # Example
///
/// ```
/// use cloudwatch_logging::prelude::*;
///
/// let appender = FieldAppender::new(AppenderConfig::new().with_field("function_name", "Fn1"));
/// let mut fields = LogContext::new();
/// appender.apply(&mut fields);
/// assert_eq!(fields.get("function_name"), Some(&FieldValue::from("Fn1")));
///
/// appender.update(AppenderConfig::new().with_field("function_name", "Fn2"));
/// let mut fields = LogContext::new();
/// appender.apply(&mut fields);
/// assert_eq!(fields.get("function_name"), Some(&FieldValue::from("Fn2")));
/// ```
#[derive(Debug, Clone, Default)]
pub struct FieldAppender {
    config: Arc<RwLock<Arc<AppenderConfig>>>,
}

impl FieldAppender {
    pub fn new(config: AppenderConfig) -> Self {
        Self {
            config: Arc::new(RwLock::new(Arc::new(config))),
        }
    }

    /// Snapshot of the installed configuration
    pub fn config(&self) -> Arc<AppenderConfig> {
        Arc::clone(&self.config.read())
    }

    /// Replace the whole configuration
    ///
    /// Calls already holding a snapshot finish with the old one.
    pub fn update(&self, config: AppenderConfig) {
        *self.config.write() = Arc::new(config);
    }

    /// Insert every configured field that `fields` does not already hold
    ///
    /// Returns the keys that collided with existing fields; their existing
    /// values are left untouched.
    pub fn apply(&self, fields: &mut LogContext) -> Vec<String> {
        let config = self.config();
        let mut collisions = Vec::new();
        for (key, value) in config.iter() {
            if !fields.insert_if_absent(key, value) {
                collisions.push(key.clone());
            }
        }
        collisions
    }

    pub(crate) fn same_slot(&self, other: &FieldAppender) -> bool {
        Arc::ptr_eq(&self.config, &other.config)
    }
}
