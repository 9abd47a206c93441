//! Explicit logger registry
//!
//! Loggers are keyed by name. An entry is added on the first request for a
//! name and never removed; later requests for the same name return the
//! same handle, so repeated assembly never stacks duplicate sinks or
//! transforms. The registry also holds the named filter sets and the
//! optional platform-default sink that propagating loggers forward to.

use super::error::{LoggerError, Result};
use super::logger::{Logger, LoggerBuilder, SharedSink};
use crate::context::{ContextAttributes, RuntimeEnv};
use crate::sinks::Sink;
use crate::transform::{FilterConfig, Preset, Transform};
use parking_lot::{Mutex, RwLock};
use std::collections::HashMap;
use std::sync::Arc;

/// Process-lifetime table of named loggers
///
/// # Example
///
/// ```
/// use cloudwatch_logging::prelude::*;
///
/// let registry = LoggerRegistry::new();
/// let first = registry.register(Logger::builder("orders").sink(MemorySink::new()));
/// let second = registry.create_logger("orders", [Preset::LowCost]);
///
/// // Same handle, no stacked transform
/// assert!(second.transforms().is_empty());
/// assert_eq!(registry.len(), 1);
/// # let _ = first;
/// ```
pub struct LoggerRegistry {
    loggers: RwLock<HashMap<String, Logger>>,
    filters: RwLock<HashMap<String, FilterConfig>>,
    root: Option<SharedSink>,
}

impl LoggerRegistry {
    /// Registry with the built-in filter presets and no platform-default sink
    pub fn new() -> Self {
        let filters = Preset::ALL
            .iter()
            .map(|preset| (preset.name().to_string(), FilterConfig::preset(*preset)))
            .collect();

        Self {
            loggers: RwLock::new(HashMap::new()),
            filters: RwLock::new(filters),
            root: None,
        }
    }

    /// Registry whose propagating loggers also write to `sink`
    pub fn with_root_sink<S: Sink + 'static>(sink: S) -> Self {
        let mut registry = Self::new();
        registry.root = Some(Arc::new(Mutex::new(Box::new(sink))));
        registry
    }

    /// Assemble `builder` unless its name is already registered
    ///
    /// When the name exists the builder is discarded and the existing
    /// handle is returned.
    pub fn register(&self, builder: LoggerBuilder) -> Logger {
        if let Some(existing) = self.get(builder.name()) {
            return existing;
        }

        let mut loggers = self.loggers.write();
        loggers
            .entry(builder.name().to_string())
            .or_insert_with(|| builder.build_with_root(self.root.clone()))
            .clone()
    }

    /// Logger writing to stdout with `transforms` attached in order
    pub fn create_logger<I, T>(&self, name: &str, transforms: I) -> Logger
    where
        I: IntoIterator<Item = T>,
        T: Into<Transform>,
    {
        if let Some(existing) = self.get(name) {
            return existing;
        }
        self.register(LoggerBuilder::new(name).transforms(transforms))
    }

    /// Logger for a Lambda handler, seeded with the invocation context
    pub fn create_lambda_logger<C: ContextAttributes + ?Sized>(&self, name: &str, ctx: &C) -> Logger {
        if let Some(existing) = self.get(name) {
            return existing;
        }
        self.register(LoggerBuilder::new(name).runtime(RuntimeEnv::Lambda).context(ctx))
    }

    /// Look up or create a bare logger with no sink of its own
    pub fn logger(&self, name: &str) -> Logger {
        if let Some(existing) = self.get(name) {
            return existing;
        }
        self.register(LoggerBuilder::new(name).without_sink())
    }

    pub fn get(&self, name: &str) -> Option<Logger> {
        self.loggers.read().get(name).cloned()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.loggers.read().contains_key(name)
    }

    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.loggers.read().keys().cloned().collect();
        names.sort();
        names
    }

    pub fn len(&self) -> usize {
        self.loggers.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.loggers.read().is_empty()
    }

    /// Register (or replace) a named filter set
    pub fn register_filter(&self, name: impl Into<String>, config: FilterConfig) {
        self.filters.write().insert(name.into(), config);
    }

    /// Named filter set, including the built-in presets
    pub fn named_filter(&self, name: &str) -> Result<FilterConfig> {
        self.filters
            .read()
            .get(name)
            .cloned()
            .ok_or_else(|| LoggerError::UnknownPreset(name.to_string()))
    }

    pub fn filter_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.filters.read().keys().cloned().collect();
        names.sort();
        names
    }
}

impl Default for LoggerRegistry {
    fn default() -> Self {
        Self::new()
    }
}
