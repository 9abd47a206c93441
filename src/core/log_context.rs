//! Structured field values and per-call field sets
//!
//! This module provides:
//! - `FieldValue`: a JSON-shaped value attached to a log call
//! - `LogContext`: the mutable field map carried through the transform chain

use super::error::{LoggerError, Result};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

/// Value type for structured logging fields
///
/// Nested arrays and objects are passed through to the output unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    String(String),
    Array(Vec<FieldValue>),
    Object(BTreeMap<String, FieldValue>),
}

impl FieldValue {
    /// Convert to `serde_json::Value` for the wire format
    ///
    /// `key` names the top-level field in the error when a nested value
    /// (a NaN or infinite float) has no JSON representation.
    pub fn to_json_value(&self, key: &str) -> Result<serde_json::Value> {
        self.to_json_at(key, key)
    }

    fn to_json_at(&self, key: &str, path: &str) -> Result<serde_json::Value> {
        Ok(match self {
            FieldValue::Null => serde_json::Value::Null,
            FieldValue::Bool(b) => serde_json::Value::Bool(*b),
            FieldValue::Int(i) => serde_json::Value::Number((*i).into()),
            FieldValue::Float(f) => serde_json::Number::from_f64(*f)
                .map(serde_json::Value::Number)
                .ok_or_else(|| {
                    LoggerError::serialization(key, format!("non-finite float {} at '{}'", f, path))
                })?,
            FieldValue::String(s) => serde_json::Value::String(s.clone()),
            FieldValue::Array(items) => serde_json::Value::Array(
                items
                    .iter()
                    .enumerate()
                    .map(|(i, item)| item.to_json_at(key, &format!("{}[{}]", path, i)))
                    .collect::<Result<Vec<_>>>()?,
            ),
            FieldValue::Object(map) => {
                let mut obj = serde_json::Map::with_capacity(map.len());
                for (k, v) in map {
                    obj.insert(k.clone(), v.to_json_at(key, &format!("{}.{}", path, k))?);
                }
                serde_json::Value::Object(obj)
            }
        })
    }

    /// Capture any serializable value as a field value
    ///
    /// Fails with `LoggerError::Serialization` naming `key` when serde_json
    /// rejects the value (for example a map with non-string keys).
    pub fn from_serialize<T: Serialize + ?Sized>(key: &str, value: &T) -> Result<Self> {
        serde_json::to_value(value)
            .map(FieldValue::from)
            .map_err(|e| LoggerError::serialization(key, e.to_string()))
    }
}

impl From<serde_json::Value> for FieldValue {
    fn from(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => FieldValue::Null,
            serde_json::Value::Bool(b) => FieldValue::Bool(b),
            serde_json::Value::Number(n) => match n.as_i64() {
                Some(i) => FieldValue::Int(i),
                None => FieldValue::Float(n.as_f64().unwrap_or(f64::NAN)),
            },
            serde_json::Value::String(s) => FieldValue::String(s),
            serde_json::Value::Array(items) => {
                FieldValue::Array(items.into_iter().map(FieldValue::from).collect())
            }
            serde_json::Value::Object(map) => FieldValue::Object(
                map.into_iter().map(|(k, v)| (k, FieldValue::from(v))).collect(),
            ),
        }
    }
}

impl From<String> for FieldValue {
    fn from(s: String) -> Self {
        FieldValue::String(s)
    }
}

impl From<&str> for FieldValue {
    fn from(s: &str) -> Self {
        FieldValue::String(s.to_string())
    }
}

impl From<i64> for FieldValue {
    fn from(i: i64) -> Self {
        FieldValue::Int(i)
    }
}

impl From<i32> for FieldValue {
    fn from(i: i32) -> Self {
        FieldValue::Int(i as i64)
    }
}

impl From<u32> for FieldValue {
    fn from(i: u32) -> Self {
        FieldValue::Int(i as i64)
    }
}

impl From<f64> for FieldValue {
    fn from(f: f64) -> Self {
        FieldValue::Float(f)
    }
}

impl From<bool> for FieldValue {
    fn from(b: bool) -> Self {
        FieldValue::Bool(b)
    }
}

impl<V: Into<FieldValue>> From<Vec<V>> for FieldValue {
    fn from(items: Vec<V>) -> Self {
        FieldValue::Array(items.into_iter().map(Into::into).collect())
    }
}

impl<V: Into<FieldValue>> From<Option<V>> for FieldValue {
    fn from(value: Option<V>) -> Self {
        value.map_or(FieldValue::Null, Into::into)
    }
}

/// Field map of a single log call
///
/// Keys are unique. Transforms operate on this map in place.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LogContext {
    fields: HashMap<String, FieldValue>,
}

impl LogContext {
    /// Create a new empty log context
    pub fn new() -> Self {
        Self {
            fields: HashMap::new(),
        }
    }

    /// Add a field to the context
    pub fn with_field<K, V>(mut self, key: K, value: V) -> Self
    where
        K: Into<String>,
        V: Into<FieldValue>,
    {
        self.fields.insert(key.into(), value.into());
        self
    }

    /// Add an arbitrary serializable value as a field
    pub fn try_with_serialized<T: Serialize + ?Sized>(
        mut self,
        key: impl Into<String>,
        value: &T,
    ) -> Result<Self> {
        let key = key.into();
        let value = FieldValue::from_serialize(&key, value)?;
        self.fields.insert(key, value);
        Ok(self)
    }

    /// Add a field to the context (mutable version)
    pub fn add_field<K, V>(&mut self, key: K, value: V)
    where
        K: Into<String>,
        V: Into<FieldValue>,
    {
        self.fields.insert(key.into(), value.into());
    }

    /// Insert only when `key` is absent; returns whether it was inserted
    pub fn insert_if_absent(&mut self, key: &str, value: &FieldValue) -> bool {
        if self.fields.contains_key(key) {
            return false;
        }
        self.fields.insert(key.to_string(), value.clone());
        true
    }

    pub fn remove(&mut self, key: &str) -> Option<FieldValue> {
        self.fields.remove(key)
    }

    pub fn get(&self, key: &str) -> Option<&FieldValue> {
        self.fields.get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.fields.contains_key(key)
    }

    /// Get all fields
    pub fn fields(&self) -> &HashMap<String, FieldValue> {
        &self.fields
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Check if context has any fields
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &FieldValue)> {
        self.fields.iter()
    }
}

impl<K, V> FromIterator<(K, V)> for LogContext
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

impl IntoIterator for LogContext {
    type Item = (String, FieldValue);
    type IntoIter = std::collections::hash_map::IntoIter<String, FieldValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.fields.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap as StdMap;

    #[test]
    fn test_log_context_creation() {
        let ctx = LogContext::new();
        assert!(ctx.is_empty());
    }

    #[test]
    fn test_log_context_with_fields() {
        let ctx = LogContext::new()
            .with_field("user_id", 123)
            .with_field("username", "john_doe")
            .with_field("active", true);

        assert_eq!(ctx.len(), 3);
        assert!(!ctx.is_empty());
    }

    #[test]
    fn test_insert_if_absent_keeps_existing() {
        let mut ctx = LogContext::new().with_field("key", "entry_value");

        assert!(!ctx.insert_if_absent("key", &FieldValue::from("other")));
        assert!(ctx.insert_if_absent("new", &FieldValue::from(1)));

        assert_eq!(ctx.get("key"), Some(&FieldValue::from("entry_value")));
        assert_eq!(ctx.get("new"), Some(&FieldValue::Int(1)));
    }

    #[test]
    fn test_nested_value_to_json() {
        let value = FieldValue::from(serde_json::json!({"a": [1, 2.5, "x"], "b": null}));
        let json = value.to_json_value("payload").unwrap();
        assert_eq!(json, serde_json::json!({"a": [1, 2.5, "x"], "b": null}));
    }

    #[test]
    fn test_non_finite_float_names_key() {
        let mut inner = BTreeMap::new();
        inner.insert("ratio".to_string(), FieldValue::Float(f64::INFINITY));
        let value = FieldValue::Object(inner);

        match value.to_json_value("stats") {
            Err(LoggerError::Serialization { key, message }) => {
                assert_eq!(key, "stats");
                assert!(message.contains("stats.ratio"));
            }
            other => panic!("expected serialization error, got {:?}", other),
        }
    }

    #[test]
    fn test_try_with_serialized_rejects_non_string_keys() {
        let mut map = StdMap::new();
        map.insert((1, 2), "tuple key");

        let err = LogContext::new()
            .try_with_serialized("lookup", &map)
            .unwrap_err();
        assert!(matches!(err, LoggerError::Serialization { ref key, .. } if key == "lookup"));
    }

    #[test]
    fn test_from_iterator() {
        let ctx: LogContext = vec![("a", 1), ("b", 2)].into_iter().collect();
        assert_eq!(ctx.len(), 2);
        assert_eq!(ctx.get("b"), Some(&FieldValue::Int(2)));
    }
}
