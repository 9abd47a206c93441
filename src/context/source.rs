//! Context snapshots and the per-logger context source

use super::lambda::LAMBDA_ATTRIBUTES;
use crate::core::{FieldValue, LogContext, LoggerError};
use crate::transform::{AppenderConfig, FieldAppender};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

/// Fields captured from one invocation context
pub type ContextSnapshot = AppenderConfig;

/// Read access to named attributes of an opaque context object
///
/// Implementors return `None` for attributes they do not carry; a missing
/// attribute is omitted from the snapshot, never an error.
pub trait ContextAttributes {
    fn attribute(&self, name: &str) -> Option<FieldValue>;
}

impl<T: ContextAttributes + ?Sized> ContextAttributes for &T {
    fn attribute(&self, name: &str) -> Option<FieldValue> {
        (**self).attribute(name)
    }
}

impl ContextAttributes for serde_json::Value {
    fn attribute(&self, name: &str) -> Option<FieldValue> {
        match self.get(name)? {
            serde_json::Value::Null => None,
            value => Some(FieldValue::from(value.clone())),
        }
    }
}

impl ContextAttributes for LogContext {
    fn attribute(&self, name: &str) -> Option<FieldValue> {
        self.get(name).cloned()
    }
}

impl ContextAttributes for HashMap<String, FieldValue> {
    fn attribute(&self, name: &str) -> Option<FieldValue> {
        self.get(name).cloned()
    }
}

impl ContextAttributes for HashMap<String, String> {
    fn attribute(&self, name: &str) -> Option<FieldValue> {
        self.get(name).map(|v| FieldValue::from(v.as_str()))
    }
}

impl ContextAttributes for BTreeMap<String, String> {
    fn attribute(&self, name: &str) -> Option<FieldValue> {
        self.get(name).map(|v| FieldValue::from(v.as_str()))
    }
}

/// Execution environment a logger is assembled for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RuntimeEnv {
    #[default]
    None,
    Lambda,
}

impl RuntimeEnv {
    pub const ALL: [RuntimeEnv; 2] = [RuntimeEnv::None, RuntimeEnv::Lambda];

    /// Attribute names read from this environment's context object
    pub fn attributes(&self) -> &'static [&'static str] {
        match self {
            RuntimeEnv::None => &[],
            RuntimeEnv::Lambda => LAMBDA_ATTRIBUTES,
        }
    }

    /// Whether records should also reach the platform-default handler
    ///
    /// `false` for Lambda, whose runtime already captures the handler's output.
    pub fn propagates(&self) -> bool {
        matches!(self, RuntimeEnv::None)
    }
}

impl fmt::Display for RuntimeEnv {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RuntimeEnv::None => f.write_str("none"),
            RuntimeEnv::Lambda => f.write_str("lambda"),
        }
    }
}

impl FromStr for RuntimeEnv {
    type Err = LoggerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "" | "none" => Ok(RuntimeEnv::None),
            "lambda" => Ok(RuntimeEnv::Lambda),
            _ => Err(LoggerError::config("RuntimeEnv", format!("unknown runtime '{}'", s))),
        }
    }
}

/// Live invocation fields for one logger
///
/// The snapshot starts empty and is replaced wholesale by `update`; the
/// logger never detects invocation boundaries on its own.
#[derive(Debug, Clone)]
pub struct ContextSource {
    env: RuntimeEnv,
    snapshot: FieldAppender,
}

impl ContextSource {
    pub fn new(env: RuntimeEnv) -> Self {
        Self {
            env,
            snapshot: FieldAppender::default(),
        }
    }

    pub fn env(&self) -> RuntimeEnv {
        self.env
    }

    /// Extract this environment's attribute list from `ctx`
    pub fn from_context<C: ContextAttributes + ?Sized>(&self, ctx: &C) -> ContextSnapshot {
        self.env
            .attributes()
            .iter()
            .filter_map(|name| ctx.attribute(name).map(|value| (*name, value)))
            .collect()
    }

    /// Replace the active snapshot with one taken from `ctx`
    pub fn update<C: ContextAttributes + ?Sized>(&self, ctx: &C) {
        self.snapshot.update(self.from_context(ctx));
    }

    /// Install the part of an already captured snapshot this environment reads
    pub(crate) fn install_from(&self, captured: &ContextSnapshot) {
        let attributes = self.env.attributes();
        let snapshot = captured
            .iter()
            .filter(|(name, _)| attributes.contains(&name.as_str()))
            .map(|(name, value)| (name.clone(), value.clone()))
            .collect();
        self.snapshot.update(snapshot);
    }

    pub fn clear(&self) {
        self.snapshot.update(ContextSnapshot::new());
    }

    pub fn snapshot(&self) -> Arc<ContextSnapshot> {
        self.snapshot.config()
    }

    /// Merge the snapshot into `fields`; returns colliding keys
    pub fn apply(&self, fields: &mut LogContext) -> Vec<String> {
        self.snapshot.apply(fields)
    }
}

/// Read every attribute known to any runtime from `ctx`
///
/// Used when the runtime is not settled yet; [`ContextSource::install_from`]
/// narrows the result once it is.
pub(crate) fn capture_all<C: ContextAttributes + ?Sized>(ctx: &C) -> ContextSnapshot {
    RuntimeEnv::ALL
        .iter()
        .flat_map(|env| env.attributes().iter())
        .filter_map(|name| ctx.attribute(name).map(|value| (*name, value)))
        .collect()
}
