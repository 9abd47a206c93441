//! Log event structure
//!
//! A `LogEntry` is captured once per accepted log call. Its record
//! attributes (`message`, `levelname`, `name`, ...) are seeded into the
//! field map at capture so that the transform chain sees one flat set of
//! keys, exactly as they will appear on the wire.

use super::error::{LoggerError, Result};
use super::log_context::{FieldValue, LogContext};
use super::log_level::LogLevel;
use chrono::{DateTime, Utc};
use std::cell::RefCell;
use std::sync::OnceLock;

/// Record attribute names; ad-hoc fields may not reuse them
pub const RECORD_ATTRIBUTES: &[&str] = &[
    "message",
    "levelname",
    "levelno",
    "name",
    "thread",
    "threadName",
    "process",
    "processName",
    "filename",
    "lineno",
    "module",
    "utc_time",
    "timestamp",
];

// Thread-local caches for thread information to avoid repeated allocations
thread_local! {
    static THREAD_ID_CACHE: RefCell<Option<String>> = const { RefCell::new(None) };
    static THREAD_NAME_CACHE: RefCell<Option<Option<String>>> = const { RefCell::new(None) };
}

static PROCESS_NAME: OnceLock<Option<String>> = OnceLock::new();

fn get_thread_id() -> String {
    THREAD_ID_CACHE.with(|cache| {
        cache
            .borrow_mut()
            .get_or_insert_with(|| format!("{:?}", std::thread::current().id()))
            .clone()
    })
}

fn get_thread_name() -> Option<String> {
    THREAD_NAME_CACHE.with(|cache| {
        cache
            .borrow_mut()
            .get_or_insert_with(|| std::thread::current().name().map(String::from))
            .clone()
    })
}

fn get_process_name() -> Option<String> {
    PROCESS_NAME
        .get_or_init(|| {
            std::env::current_exe()
                .ok()
                .and_then(|path| path.file_stem().map(|s| s.to_string_lossy().into_owned()))
        })
        .clone()
}

/// Call site captured by the logging macros
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Location {
    pub file: &'static str,
    pub line: u32,
    pub module_path: &'static str,
}

impl Location {
    /// File name component of `file`
    pub fn filename(&self) -> &'static str {
        self.file.rsplit(['/', '\\']).next().unwrap_or(self.file)
    }
}

#[derive(Debug, Clone)]
pub struct LogEntry {
    pub level: LogLevel,
    pub timestamp: DateTime<Utc>,
    pub fields: LogContext,
}

impl LogEntry {
    /// Capture a new event for logger `name`
    ///
    /// The message is kept verbatim; control characters are escaped by the
    /// JSON encoding, so one call is still one output line.
    pub fn new(name: &str, level: LogLevel, message: impl Into<String>) -> Self {
        let mut fields = LogContext::new()
            .with_field("message", message.into())
            .with_field("levelname", level.to_str())
            .with_field("levelno", i64::from(level.levelno()))
            .with_field("name", name)
            .with_field("thread", get_thread_id())
            .with_field("process", std::process::id());

        if let Some(thread_name) = get_thread_name() {
            fields.add_field("threadName", thread_name);
        }
        if let Some(process_name) = get_process_name() {
            fields.add_field("processName", process_name);
        }

        Self {
            level,
            timestamp: Utc::now(),
            fields,
        }
    }

    /// Override the capture time
    pub fn at(mut self, timestamp: DateTime<Utc>) -> Self {
        self.timestamp = timestamp;
        self
    }

    pub fn with_location(mut self, location: &Location) -> Self {
        self.fields.add_field("filename", location.filename());
        self.fields.add_field("lineno", location.line);
        self.fields.add_field("module", location.module_path);
        self
    }

    /// Merge the caller's ad-hoc fields
    ///
    /// Fails with `ReservedField` when a key names a record attribute.
    pub fn with_context(mut self, context: LogContext) -> Result<Self> {
        for (key, value) in context {
            if RECORD_ATTRIBUTES.contains(&key.as_str()) {
                return Err(LoggerError::reserved_field(key));
            }
            self.fields.add_field(key, value);
        }
        Ok(self)
    }

    /// Message, if not removed by a filter
    pub fn message(&self) -> Option<&str> {
        match self.fields.get("message") {
            Some(FieldValue::String(s)) => Some(s),
            _ => None,
        }
    }
}
