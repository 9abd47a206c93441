//! Core logger types: records, levels, formatting and assembly

pub mod diagnostics;
pub mod error;
pub mod formatter;
pub mod log_context;
pub mod log_entry;
pub mod log_level;
pub mod logger;
pub mod metrics;
pub mod registry;
pub mod timestamp;

pub use diagnostics::{Diagnostic, DiagnosticCallback};
pub use error::{LoggerError, Result};
pub use formatter::CloudwatchFormatter;
pub use log_context::{FieldValue, LogContext};
pub use log_entry::{Location, LogEntry, RECORD_ATTRIBUTES};
pub use log_level::LogLevel;
pub use logger::{Logger, LoggerBuilder, SharedSink};
pub use metrics::LoggerMetrics;
pub use registry::LoggerRegistry;
