//! # CloudWatch Logging
//!
//! Structured JSON logging for CloudWatch-style log ingestion.
//!
//! Every accepted log call becomes exactly one single-line JSON object.
//! Each named logger carries an ordered chain of field transforms:
//!
//! - **Appenders** add constant fields without overwriting existing ones
//! - **Filters** suppress keys, and always have the last word over appenders
//! - **Presets** bundle common suppression sets (`low-cost`, `elk-compatible`)
//! - **Context sources** inject invocation fields (AWS Lambda) per call
//!
//! Configurations can be replaced at runtime; each call observes either
//! the old or the new configuration, never a mix.
//!
//! ```
//! use cloudwatch_logging::prelude::*;
//!
//! let sink = MemorySink::new();
//! let logger = Logger::builder("billing")
//!     .transform(AppenderConfig::new().with_field("team", "payments"))
//!     .transform(Preset::ElkCompatible)
//!     .sink(sink.clone())
//!     .build();
//!
//! logger
//!     .info_with_context("charge accepted", LogContext::new().with_field("amount", 1299))
//!     .unwrap();
//!
//! let record = &sink.records().unwrap()[0];
//! assert_eq!(record["message"], "charge accepted");
//! assert_eq!(record["team"], "payments");
//! assert_eq!(record["amount"], 1299);
//! ```

pub mod context;
pub mod core;
pub mod macros;
pub mod sinks;
pub mod transform;

pub mod prelude {
    pub use crate::context::{ContextAttributes, LambdaContext, RuntimeEnv};
    pub use crate::core::{
        CloudwatchFormatter, Diagnostic, DiagnosticCallback, FieldValue, Location, LogContext,
        LogEntry, LogLevel, Logger, LoggerBuilder, LoggerError, LoggerMetrics, LoggerRegistry,
        Result,
    };
    pub use crate::sinks::{ConsoleSink, MemorySink, Sink, StreamSink};
    pub use crate::transform::{
        AppenderConfig, FieldAppender, FieldFilter, FilterConfig, Preset, Transform,
        TransformChain, TransformConfig,
    };
}

pub use context::{ContextAttributes, ContextSource, LambdaContext, RuntimeEnv};
pub use core::{
    CloudwatchFormatter, Diagnostic, DiagnosticCallback, FieldValue, Location, LogContext,
    LogEntry, LogLevel, Logger, LoggerBuilder, LoggerError, LoggerMetrics, LoggerRegistry, Result,
};
pub use sinks::{ConsoleSink, MemorySink, Sink, StreamSink};
pub use transform::{AppenderConfig, FieldAppender, FieldFilter, FilterConfig, Preset};
