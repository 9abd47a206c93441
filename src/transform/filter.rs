//! Field filter: removes a named set of fields

use super::presets::Preset;
use crate::core::LogContext;
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::sync::Arc;

/// Field names to suppress
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FilterConfig {
    keys: BTreeSet<String>,
}

impl FilterConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.keys.insert(key.into());
        self
    }

    /// Keys of a named preset
    pub fn preset(preset: Preset) -> Self {
        preset.keys().iter().copied().collect()
    }

    pub fn contains(&self, key: &str) -> bool {
        self.keys.contains(key)
    }

    pub fn iter(&self) -> impl Iterator<Item = &String> {
        self.keys.iter()
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}

impl<S: Into<String>> FromIterator<S> for FilterConfig {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            keys: iter.into_iter().map(Into::into).collect(),
        }
    }
}

impl From<Preset> for FilterConfig {
    fn from(preset: Preset) -> Self {
        Self::preset(preset)
    }
}

/// Filter transform
///
/// Same handle semantics as [`FieldAppender`](super::FieldAppender).
#[derive(Debug, Clone, Default)]
pub struct FieldFilter {
    config: Arc<RwLock<Arc<FilterConfig>>>,
}

impl FieldFilter {
    pub fn new(config: impl Into<FilterConfig>) -> Self {
        Self {
            config: Arc::new(RwLock::new(Arc::new(config.into()))),
        }
    }

    /// Snapshot of the installed configuration
    pub fn config(&self) -> Arc<FilterConfig> {
        Arc::clone(&self.config.read())
    }

    /// Replace the whole configuration
    pub fn update(&self, config: impl Into<FilterConfig>) {
        *self.config.write() = Arc::new(config.into());
    }

    /// Remove every configured key; absent keys are ignored
    pub fn apply(&self, fields: &mut LogContext) {
        let config = self.config();
        for key in config.iter() {
            fields.remove(key);
        }
    }

    pub(crate) fn same_slot(&self, other: &FieldFilter) -> bool {
        Arc::ptr_eq(&self.config, &other.config)
    }
}
