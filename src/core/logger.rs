//! Logger assembly: one named logger, its transform chain, formatter and sink
//!
//! A call flows through a fixed pipeline:
//!
//! 1. level check (calls below the minimum never reach the chain)
//! 2. capture: record attributes, then the caller's ad-hoc fields
//! 3. context snapshot (appender precedence)
//! 4. transform chain, in attachment order
//! 5. formatting, all-or-nothing
//! 6. write to the sink and, if propagating, to the platform-default sink
//!
//! A call fails only when no sink accepted the line. When one sink accepts
//! it and another rejects it, the call succeeds and the rejection is
//! reported as a diagnostic, so a retried call never duplicates a line.

use super::{
    diagnostics::{self, Diagnostic, DiagnosticCallback},
    error::{LoggerError, Result},
    formatter::CloudwatchFormatter,
    log_context::LogContext,
    log_entry::{LogEntry, Location},
    log_level::LogLevel,
    metrics::LoggerMetrics,
};
use crate::context::source::capture_all;
use crate::context::{ContextAttributes, ContextSnapshot, ContextSource, RuntimeEnv};
use crate::sinks::{ConsoleSink, Sink};
use crate::transform::{AppenderConfig, FilterConfig, Transform, TransformChain, TransformConfig};
use parking_lot::{Mutex, RwLock};
use std::fmt;
use std::sync::Arc;

/// Sink shared between loggers (the platform-default handler)
pub type SharedSink = Arc<Mutex<Box<dyn Sink>>>;

struct LoggerInner {
    name: String,
    min_level: RwLock<LogLevel>,
    chain: TransformChain,
    context: Option<ContextSource>,
    formatter: CloudwatchFormatter,
    sink: Option<Mutex<Box<dyn Sink>>>,
    /// Fixed at assembly
    propagate: bool,
    root: Option<SharedSink>,
    metrics: LoggerMetrics,
    on_diagnostic: Option<DiagnosticCallback>,
}

/// Handle to an assembled logger
///
/// Cloning is cheap; all clones share the same chain, formatter and sink.
#[derive(Clone)]
pub struct Logger {
    inner: Arc<LoggerInner>,
}

impl fmt::Debug for Logger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Logger")
            .field("name", &self.inner.name)
            .field("min_level", &*self.inner.min_level.read())
            .field("transforms", &self.inner.chain.len())
            .field("runtime", &self.runtime())
            .field("propagate", &self.inner.propagate)
            .field("has_sink", &self.has_sink())
            .field("has_output", &self.has_output())
            .finish()
    }
}

impl Logger {
    /// Create a builder for Logger
    ///
    /// # Example
    /// ```
    /// use cloudwatch_logging::prelude::*;
    ///
    /// let sink = MemorySink::new();
    /// let logger = Logger::builder("orders")
    ///     .min_level(LogLevel::Debug)
    ///     .transform(AppenderConfig::new().with_field("service", "orders"))
    ///     .transform(Preset::LowCost)
    ///     .sink(sink.clone())
    ///     .build();
    ///
    /// logger.info("order placed").unwrap();
    /// let records = sink.records().unwrap();
    /// assert_eq!(records[0]["service"], "orders");
    /// assert!(records[0].get("thread").is_none());
    /// ```
    #[must_use]
    pub fn builder(name: impl Into<String>) -> LoggerBuilder {
        LoggerBuilder::new(name)
    }

    pub fn name(&self) -> &str {
        &self.inner.name
    }

    pub fn level(&self) -> LogLevel {
        *self.inner.min_level.read()
    }

    pub fn set_level(&self, level: LogLevel) {
        *self.inner.min_level.write() = level;
    }

    #[inline]
    pub fn is_enabled_for(&self, level: LogLevel) -> bool {
        level >= *self.inner.min_level.read()
    }

    pub fn runtime(&self) -> RuntimeEnv {
        self.inner
            .context
            .as_ref()
            .map_or(RuntimeEnv::None, ContextSource::env)
    }

    /// Whether lines are also handed to the platform-default sink
    pub fn propagate(&self) -> bool {
        self.inner.propagate
    }

    pub fn has_sink(&self) -> bool {
        self.inner.sink.is_some()
    }

    pub fn transforms(&self) -> &TransformChain {
        &self.inner.chain
    }

    pub fn formatter(&self) -> &CloudwatchFormatter {
        &self.inner.formatter
    }

    /// Get the logger metrics for detailed observability
    pub fn metrics(&self) -> &LoggerMetrics {
        &self.inner.metrics
    }

    /// Log `message` with the caller's ad-hoc `fields`
    ///
    /// Ad-hoc fields outrank context and appender fields. Nothing is
    /// written unless the whole record formats successfully.
    pub fn log(&self, level: LogLevel, message: impl Into<String>, fields: LogContext) -> Result<()> {
        self.dispatch(level, message.into(), fields, None)
    }

    /// Same as [`Logger::log`] with the call site attached
    pub fn log_at(
        &self,
        level: LogLevel,
        message: impl Into<String>,
        fields: LogContext,
        location: &Location,
    ) -> Result<()> {
        self.dispatch(level, message.into(), fields, Some(location))
    }

    #[inline]
    pub fn debug(&self, message: impl Into<String>) -> Result<()> {
        self.log(LogLevel::Debug, message, LogContext::new())
    }

    #[inline]
    pub fn info(&self, message: impl Into<String>) -> Result<()> {
        self.log(LogLevel::Info, message, LogContext::new())
    }

    #[inline]
    pub fn warning(&self, message: impl Into<String>) -> Result<()> {
        self.log(LogLevel::Warning, message, LogContext::new())
    }

    #[inline]
    pub fn error(&self, message: impl Into<String>) -> Result<()> {
        self.log(LogLevel::Error, message, LogContext::new())
    }

    #[inline]
    pub fn critical(&self, message: impl Into<String>) -> Result<()> {
        self.log(LogLevel::Critical, message, LogContext::new())
    }

    /// Helper for structured info logging
    pub fn info_with_context(&self, message: impl Into<String>, fields: LogContext) -> Result<()> {
        self.log(LogLevel::Info, message, fields)
    }

    /// Helper for structured error logging
    pub fn error_with_context(&self, message: impl Into<String>, fields: LogContext) -> Result<()> {
        self.log(LogLevel::Error, message, fields)
    }

    fn dispatch(
        &self,
        level: LogLevel,
        message: String,
        fields: LogContext,
        location: Option<&Location>,
    ) -> Result<()> {
        if !self.is_enabled_for(level) {
            self.inner.metrics.record_below_level();
            return Ok(());
        }

        match self.shape_and_write(level, message, fields, location) {
            Ok(()) => {
                self.inner.metrics.record_logged();
                Ok(())
            }
            Err(e) => {
                self.inner.metrics.record_failed();
                Err(e)
            }
        }
    }

    fn shape_and_write(
        &self,
        level: LogLevel,
        message: String,
        fields: LogContext,
        location: Option<&Location>,
    ) -> Result<()> {
        self.require_output()?;
        let inner = &self.inner;

        let mut entry = LogEntry::new(&inner.name, level, message);
        if let Some(location) = location {
            entry = entry.with_location(location);
        }
        let mut entry = entry.with_context(fields)?;

        let mut collisions = match &inner.context {
            Some(context) => context.apply(&mut entry.fields),
            None => Vec::new(),
        };
        collisions.extend(inner.chain.apply(&mut entry.fields));
        for key in collisions {
            inner.metrics.record_collision();
            diagnostics::report(
                inner.on_diagnostic.as_ref(),
                &Diagnostic::FieldCollision {
                    logger: inner.name.clone(),
                    key,
                },
            );
        }

        let line = inner.formatter.format(&entry)?;
        self.deliver(&line)
    }

    /// Hand `line` to every target; fails only if none accepted it
    fn deliver(&self, line: &str) -> Result<()> {
        let inner = &self.inner;
        let mut delivered = false;
        let mut failures = Vec::new();

        if let Some(sink) = &inner.sink {
            let mut sink = sink.lock();
            match sink.write_line(line) {
                Ok(()) => delivered = true,
                Err(e) => failures.push((sink.name().to_string(), e)),
            }
        }
        if let Some(root) = self.root() {
            let mut root = root.lock();
            match root.write_line(line) {
                Ok(()) => delivered = true,
                Err(e) => failures.push((root.name().to_string(), e)),
            }
        }

        if !delivered {
            return match failures.into_iter().next() {
                Some((_, e)) => Err(e),
                None => Err(LoggerError::misconfigured_sink(&inner.name)),
            };
        }
        for (sink, e) in failures {
            inner.metrics.record_sink_error();
            diagnostics::report(
                inner.on_diagnostic.as_ref(),
                &Diagnostic::SinkFailure {
                    logger: inner.name.clone(),
                    sink,
                    message: e.to_string(),
                },
            );
        }
        Ok(())
    }

    /// Platform-default sink, if this logger propagates to one
    fn root(&self) -> Option<&SharedSink> {
        if self.inner.propagate {
            self.inner.root.as_ref()
        } else {
            None
        }
    }

    /// Whether any sink, own or propagated, receives this logger's lines
    pub fn has_output(&self) -> bool {
        self.inner.sink.is_some() || self.root().is_some()
    }

    fn require_output(&self) -> Result<()> {
        if !self.has_output() {
            return Err(LoggerError::misconfigured_sink(&self.inner.name));
        }
        Ok(())
    }

    /// Replace the configuration of every attached appender
    ///
    /// Returns how many appenders were updated.
    pub fn update_appender(&self, config: AppenderConfig) -> Result<usize> {
        self.require_output()?;
        Ok(self.inner.chain.update_appenders(&config))
    }

    /// Replace the configuration of every attached filter
    ///
    /// Returns how many filters were updated.
    pub fn update_filter(&self, config: impl Into<FilterConfig>) -> Result<usize> {
        self.require_output()?;
        Ok(self.inner.chain.update_filters(&config.into()))
    }

    /// Replace the configuration of the transform at `index` (attachment order)
    pub fn update_transform(&self, index: usize, config: impl Into<TransformConfig>) -> Result<()> {
        self.require_output()?;
        self.inner.chain.update(index, config)
    }

    /// Replace the invocation context snapshot
    pub fn update_context<C: ContextAttributes + ?Sized>(&self, ctx: &C) -> Result<()> {
        self.require_output()?;
        let context = self.inner.context.as_ref().ok_or_else(|| {
            LoggerError::config(
                format!("Logger '{}'", self.inner.name),
                "no context source attached (runtime is none)",
            )
        })?;
        context.update(ctx);
        Ok(())
    }

    /// Active context snapshot, if a context source is attached
    pub fn context_snapshot(&self) -> Option<Arc<ContextSnapshot>> {
        self.inner.context.as_ref().map(ContextSource::snapshot)
    }

    pub fn flush(&self) -> Result<()> {
        if let Some(sink) = &self.inner.sink {
            sink.lock().flush()?;
        }
        if let Some(root) = self.root() {
            root.lock().flush()?;
        }
        Ok(())
    }
}

/// Builder for constructing Logger with a fluent API
///
/// Defaults: level `INFO`, no transforms, empty formatter denylist, stdout
/// sink, runtime `none` (or `lambda` when only a context is supplied).
pub struct LoggerBuilder {
    name: String,
    min_level: LogLevel,
    chain: TransformChain,
    formatter: CloudwatchFormatter,
    sink: Option<Box<dyn Sink>>,
    runtime: Option<RuntimeEnv>,
    initial_context: Option<ContextSnapshot>,
    propagate: Option<bool>,
    on_diagnostic: Option<DiagnosticCallback>,
}

impl LoggerBuilder {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            min_level: LogLevel::Info,
            chain: TransformChain::new(),
            formatter: CloudwatchFormatter::new(),
            sink: Some(Box::new(ConsoleSink::new())),
            runtime: None,
            initial_context: None,
            propagate: None,
            on_diagnostic: None,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Set minimum log level
    #[must_use = "builder methods return a new value"]
    pub fn min_level(mut self, level: LogLevel) -> Self {
        self.min_level = level;
        self
    }

    /// Attach a transform after those already attached
    #[must_use = "builder methods return a new value"]
    pub fn transform(mut self, transform: impl Into<Transform>) -> Self {
        self.chain.push(transform);
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn transforms<I, T>(mut self, transforms: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<Transform>,
    {
        for transform in transforms {
            self.chain.push(transform);
        }
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn formatter(mut self, formatter: CloudwatchFormatter) -> Self {
        self.formatter = formatter;
        self
    }

    /// Replace the default stdout sink
    #[must_use = "builder methods return a new value"]
    pub fn sink<S: Sink + 'static>(mut self, sink: S) -> Self {
        self.sink = Some(Box::new(sink));
        self
    }

    /// Build a logger with no sink of its own
    #[must_use = "builder methods return a new value"]
    pub fn without_sink(mut self) -> Self {
        self.sink = None;
        self
    }

    /// Select the runtime; `Lambda` attaches a context source and disables propagation
    #[must_use = "builder methods return a new value"]
    pub fn runtime(mut self, runtime: RuntimeEnv) -> Self {
        self.runtime = Some(runtime);
        self
    }

    /// Initial context snapshot
    ///
    /// Narrowed to the runtime's attribute list at build time, so the call
    /// order relative to [`LoggerBuilder::runtime`] does not matter. Without
    /// an explicit runtime, a context selects `Lambda`.
    #[must_use = "builder methods return a new value"]
    pub fn context<C: ContextAttributes + ?Sized>(mut self, ctx: &C) -> Self {
        self.initial_context = Some(capture_all(ctx));
        self
    }

    /// Lambda runtime with an initial invocation context
    #[must_use = "builder methods return a new value"]
    pub fn lambda<C: ContextAttributes + ?Sized>(self, ctx: &C) -> Self {
        self.runtime(RuntimeEnv::Lambda).context(ctx)
    }

    /// Override the runtime's propagation default
    #[must_use = "builder methods return a new value"]
    pub fn propagate(mut self, propagate: bool) -> Self {
        self.propagate = Some(propagate);
        self
    }

    /// Set a callback for collision diagnostics
    ///
    /// # Example
    ///
    /// ```
    /// use cloudwatch_logging::prelude::*;
    /// use std::sync::Arc;
    ///
    /// let logger = Logger::builder("app")
    ///     .on_diagnostic(Arc::new(|diagnostic: &Diagnostic| {
    ///         eprintln!("Warning: {}", diagnostic);
    ///     }))
    ///     .build();
    /// ```
    #[must_use = "builder methods return a new value"]
    pub fn on_diagnostic(mut self, callback: DiagnosticCallback) -> Self {
        self.on_diagnostic = Some(callback);
        self
    }

    /// Build the Logger
    pub fn build(self) -> Logger {
        self.build_with_root(None)
    }

    pub(crate) fn build_with_root(self, root: Option<SharedSink>) -> Logger {
        let runtime = match (self.runtime, &self.initial_context) {
            (Some(runtime), _) => runtime,
            (None, Some(_)) => RuntimeEnv::Lambda,
            (None, None) => RuntimeEnv::None,
        };
        let context = match runtime {
            RuntimeEnv::None => None,
            runtime => {
                let source = ContextSource::new(runtime);
                if let Some(captured) = &self.initial_context {
                    source.install_from(captured);
                }
                Some(source)
            }
        };
        // Resolved exactly once; never toggled afterwards
        let propagate = self.propagate.unwrap_or_else(|| runtime.propagates());

        Logger {
            inner: Arc::new(LoggerInner {
                name: self.name,
                min_level: RwLock::new(self.min_level),
                chain: self.chain,
                context,
                formatter: self.formatter,
                sink: self.sink.map(Mutex::new),
                propagate,
                root,
                metrics: LoggerMetrics::new(),
                on_diagnostic: self.on_diagnostic,
            }),
        }
    }
}

impl Logger {
    pub(crate) fn same_logger(&self, other: &Logger) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}
