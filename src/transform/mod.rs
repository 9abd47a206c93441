//! Field transforms and the per-logger transform chain
//!
//! Appenders and filters are equal first-class transforms. A chain applies
//! them in attachment order; when any appender was attached after a filter,
//! the filters run once more at the end so that a suppressed key can never
//! be resurrected by enrichment within the same call.

pub mod appender;
pub mod filter;
pub mod presets;

pub use appender::{AppenderConfig, FieldAppender};
pub use filter::{FieldFilter, FilterConfig};
pub use presets::Preset;

use crate::core::{LogContext, LoggerError, Result};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransformKind {
    Appender,
    Filter,
}

impl fmt::Display for TransformKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransformKind::Appender => f.write_str("appender"),
            TransformKind::Filter => f.write_str("filter"),
        }
    }
}

/// One entry of a transform chain
#[derive(Debug, Clone)]
pub enum Transform {
    Appender(FieldAppender),
    Filter(FieldFilter),
}

impl Transform {
    pub fn kind(&self) -> TransformKind {
        match self {
            Transform::Appender(_) => TransformKind::Appender,
            Transform::Filter(_) => TransformKind::Filter,
        }
    }

    /// Apply to `fields`; returns appender collisions
    pub fn apply(&self, fields: &mut LogContext) -> Vec<String> {
        match self {
            Transform::Appender(appender) => appender.apply(fields),
            Transform::Filter(filter) => {
                filter.apply(fields);
                Vec::new()
            }
        }
    }

    /// Replace the configuration; the kinds must match
    pub fn update(&self, config: TransformConfig) -> Result<()> {
        match (self, config) {
            (Transform::Appender(appender), TransformConfig::Appender(config)) => {
                appender.update(config);
                Ok(())
            }
            (Transform::Filter(filter), TransformConfig::Filter(config)) => {
                filter.update(config);
                Ok(())
            }
            (transform, config) => Err(LoggerError::config(
                "TransformChain",
                format!(
                    "cannot install {} configuration on {} transform",
                    config.kind(),
                    transform.kind()
                ),
            )),
        }
    }

    fn same_slot(&self, other: &Transform) -> bool {
        match (self, other) {
            (Transform::Appender(a), Transform::Appender(b)) => a.same_slot(b),
            (Transform::Filter(a), Transform::Filter(b)) => a.same_slot(b),
            _ => false,
        }
    }
}

impl From<FieldAppender> for Transform {
    fn from(appender: FieldAppender) -> Self {
        Transform::Appender(appender)
    }
}

impl From<FieldFilter> for Transform {
    fn from(filter: FieldFilter) -> Self {
        Transform::Filter(filter)
    }
}

impl From<AppenderConfig> for Transform {
    fn from(config: AppenderConfig) -> Self {
        Transform::Appender(FieldAppender::new(config))
    }
}

impl From<FilterConfig> for Transform {
    fn from(config: FilterConfig) -> Self {
        Transform::Filter(FieldFilter::new(config))
    }
}

impl From<Preset> for Transform {
    fn from(preset: Preset) -> Self {
        Transform::Filter(FieldFilter::new(preset))
    }
}

/// Replacement configuration for one transform
#[derive(Debug, Clone, PartialEq)]
pub enum TransformConfig {
    Appender(AppenderConfig),
    Filter(FilterConfig),
}

impl TransformConfig {
    pub fn kind(&self) -> TransformKind {
        match self {
            TransformConfig::Appender(_) => TransformKind::Appender,
            TransformConfig::Filter(_) => TransformKind::Filter,
        }
    }
}

impl From<AppenderConfig> for TransformConfig {
    fn from(config: AppenderConfig) -> Self {
        TransformConfig::Appender(config)
    }
}

impl From<FilterConfig> for TransformConfig {
    fn from(config: FilterConfig) -> Self {
        TransformConfig::Filter(config)
    }
}

/// Ordered transforms attached to one logger
#[derive(Debug, Clone, Default)]
pub struct TransformChain {
    transforms: Vec<Transform>,
    filter_tail: bool,
}

impl TransformChain {
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach `transform` at the end of the chain
    ///
    /// A handle already attached to this chain is ignored so that the same
    /// transform never runs twice per call. Returns whether it was attached.
    pub fn push(&mut self, transform: impl Into<Transform>) -> bool {
        let transform = transform.into();
        if self.transforms.iter().any(|t| t.same_slot(&transform)) {
            return false;
        }
        if transform.kind() == TransformKind::Appender
            && self.transforms.iter().any(|t| t.kind() == TransformKind::Filter)
        {
            self.filter_tail = true;
        }
        self.transforms.push(transform);
        true
    }

    /// Run every transform in attachment order
    ///
    /// Returns the keys of all appender collisions, in the order observed.
    pub fn apply(&self, fields: &mut LogContext) -> Vec<String> {
        let mut collisions = Vec::new();
        for transform in &self.transforms {
            collisions.extend(transform.apply(fields));
        }
        if self.filter_tail {
            for transform in &self.transforms {
                if let Transform::Filter(filter) = transform {
                    filter.apply(fields);
                }
            }
        }
        collisions
    }

    /// Replace the configuration of the transform at `index`
    pub fn update(&self, index: usize, config: impl Into<TransformConfig>) -> Result<()> {
        let transform = self.transforms.get(index).ok_or_else(|| {
            LoggerError::config(
                "TransformChain",
                format!("no transform at index {} (chain has {})", index, self.transforms.len()),
            )
        })?;
        transform.update(config.into())
    }

    /// Replace the configuration of every appender; returns how many
    pub fn update_appenders(&self, config: &AppenderConfig) -> usize {
        let mut updated = 0;
        for appender in self.appenders() {
            appender.update(config.clone());
            updated += 1;
        }
        updated
    }

    /// Replace the configuration of every filter; returns how many
    pub fn update_filters(&self, config: &FilterConfig) -> usize {
        let mut updated = 0;
        for filter in self.filters() {
            filter.update(config.clone());
            updated += 1;
        }
        updated
    }

    pub fn appenders(&self) -> impl Iterator<Item = &FieldAppender> {
        self.transforms.iter().filter_map(|t| match t {
            Transform::Appender(appender) => Some(appender),
            Transform::Filter(_) => None,
        })
    }

    pub fn filters(&self) -> impl Iterator<Item = &FieldFilter> {
        self.transforms.iter().filter_map(|t| match t {
            Transform::Filter(filter) => Some(filter),
            Transform::Appender(_) => None,
        })
    }

    pub fn get(&self, index: usize) -> Option<&Transform> {
        self.transforms.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Transform> {
        self.transforms.iter()
    }

    pub fn len(&self) -> usize {
        self.transforms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transforms.is_empty()
    }
}

impl<T: Into<Transform>> FromIterator<T> for TransformChain {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut chain = TransformChain::new();
        for transform in iter {
            chain.push(transform);
        }
        chain
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::FieldValue;

    #[test]
    fn test_appender_then_filter_suppresses() {
        let chain: TransformChain = vec![
            Transform::from(AppenderConfig::new().with_field("type", "app")),
            Transform::from(FilterConfig::new().with_key("type")),
        ]
        .into_iter()
        .collect();

        let mut fields = LogContext::new();
        chain.apply(&mut fields);

        assert!(!fields.contains_key("type"));
    }

    #[test]
    fn test_filter_then_appender_cannot_resurrect() {
        let chain: TransformChain = vec![
            Transform::from(FilterConfig::new().with_key("type")),
            Transform::from(AppenderConfig::new().with_field("type", "app").with_field("env", "prod")),
        ]
        .into_iter()
        .collect();

        let mut fields = LogContext::new().with_field("type", "caller");
        let collisions = chain.apply(&mut fields);

        assert!(collisions.is_empty());
        assert!(!fields.contains_key("type"));
        assert_eq!(fields.get("env"), Some(&FieldValue::from("prod")));
    }

    #[test]
    fn test_attachment_order_decides_collisions() {
        let first = FieldAppender::new(AppenderConfig::new().with_field("k", "first"));
        let second = FieldAppender::new(AppenderConfig::new().with_field("k", "second"));
        let chain: TransformChain = vec![first, second].into_iter().collect();

        let mut fields = LogContext::new();
        let collisions = chain.apply(&mut fields);

        assert_eq!(fields.get("k"), Some(&FieldValue::from("first")));
        assert_eq!(collisions, vec!["k".to_string()]);
    }

    #[test]
    fn test_duplicate_handle_not_stacked() {
        let appender = FieldAppender::new(AppenderConfig::new().with_field("k", 1));
        let mut chain = TransformChain::new();

        assert!(chain.push(appender.clone()));
        assert!(!chain.push(appender));
        assert_eq!(chain.len(), 1);
    }

    #[test]
    fn test_update_by_index() {
        let chain: TransformChain = vec![
            Transform::from(AppenderConfig::new().with_field("function_name", "Fn1")),
            Transform::from(FilterConfig::new()),
        ]
        .into_iter()
        .collect();

        chain
            .update(0, AppenderConfig::new().with_field("function_name", "Fn2"))
            .unwrap();

        let mut fields = LogContext::new();
        chain.apply(&mut fields);
        assert_eq!(fields.get("function_name"), Some(&FieldValue::from("Fn2")));
    }

    #[test]
    fn test_update_kind_mismatch() {
        let chain: TransformChain = vec![Transform::from(FilterConfig::new())].into_iter().collect();

        let err = chain.update(0, AppenderConfig::new()).unwrap_err();
        assert!(matches!(err, LoggerError::InvalidConfiguration { .. }));

        let err = chain.update(5, FilterConfig::new()).unwrap_err();
        assert!(err.to_string().contains("index 5"));
    }

    #[test]
    fn test_update_all_appenders() {
        let chain: TransformChain = vec![
            Transform::from(AppenderConfig::new()),
            Transform::from(FilterConfig::new()),
            Transform::from(AppenderConfig::new()),
        ]
        .into_iter()
        .collect();

        let updated = chain.update_appenders(&AppenderConfig::new().with_field("a", 1));
        assert_eq!(updated, 2);
        assert_eq!(chain.update_filters(&FilterConfig::new().with_key("b")), 1);
    }
}
