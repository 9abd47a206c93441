//! Logging macros for ergonomic log message formatting.
//!
//! These macros format the message like `format!` and attach the call site
//! (`filename`, `lineno`, `module`) to the record. Each returns the
//! logger's `Result<()>`.
//!
//! # Examples
//!
//! ```
//! use cloudwatch_logging::prelude::*;
//! use cloudwatch_logging::info;
//!
//! let sink = MemorySink::new();
//! let logger = Logger::builder("server").sink(sink.clone()).build();
//!
//! // Basic logging
//! info!(logger, "Server started").unwrap();
//!
//! // With format arguments
//! let port = 8080;
//! info!(logger, "Server listening on port {}", port).unwrap();
//!
//! // With ad-hoc fields
//! info!(logger, fields = LogContext::new().with_field("port", port); "Listening").unwrap();
//!
//! assert_eq!(sink.len(), 3);
//! ```

/// Log a message with automatic formatting.
///
/// # Examples
///
/// ```
/// # use cloudwatch_logging::prelude::*;
/// # let logger = Logger::builder("app").sink(MemorySink::new()).build();
/// use cloudwatch_logging::log;
/// log!(logger, LogLevel::Info, "Simple message").unwrap();
/// log!(logger, LogLevel::Error, "Error code: {}", 500).unwrap();
/// log!(logger, LogLevel::Error, fields = LogContext::new().with_field("code", 500); "Failed").unwrap();
/// ```
#[macro_export]
macro_rules! log {
    ($logger:expr, $level:expr, fields = $fields:expr; $($arg:tt)+) => {
        $logger.log_at(
            $level,
            format!($($arg)+),
            $fields,
            &$crate::core::Location {
                file: file!(),
                line: line!(),
                module_path: module_path!(),
            },
        )
    };
    ($logger:expr, $level:expr, $($arg:tt)+) => {
        $crate::log!($logger, $level, fields = $crate::core::LogContext::new(); $($arg)+)
    };
}

/// Log a debug-level message.
///
/// # Examples
///
/// ```
/// # use cloudwatch_logging::prelude::*;
/// # let logger = Logger::builder("app").min_level(LogLevel::Debug).sink(MemorySink::new()).build();
/// use cloudwatch_logging::debug;
/// debug!(logger, "Debug information").unwrap();
/// debug!(logger, "Counter value: {}", 10).unwrap();
/// ```
#[macro_export]
macro_rules! debug {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::core::LogLevel::Debug, $($arg)+)
    };
}

/// Log an info-level message.
///
/// # Examples
///
/// ```
/// # use cloudwatch_logging::prelude::*;
/// # let logger = Logger::builder("app").sink(MemorySink::new()).build();
/// use cloudwatch_logging::info;
/// info!(logger, "Application started").unwrap();
/// info!(logger, "Processing {} items", 100).unwrap();
/// ```
#[macro_export]
macro_rules! info {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::core::LogLevel::Info, $($arg)+)
    };
}

/// Log a warning-level message.
#[macro_export]
macro_rules! warning {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::core::LogLevel::Warning, $($arg)+)
    };
}

/// Log an error-level message.
///
/// # Examples
///
/// ```
/// # use cloudwatch_logging::prelude::*;
/// # let logger = Logger::builder("app").sink(MemorySink::new()).build();
/// use cloudwatch_logging::error;
/// error!(logger, "Failed to connect to database").unwrap();
/// error!(logger, "Error code: {}, message: {}", 500, "Internal error").unwrap();
/// ```
#[macro_export]
macro_rules! error {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::core::LogLevel::Error, $($arg)+)
    };
}

/// Log a critical-level message.
#[macro_export]
macro_rules! critical {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::core::LogLevel::Critical, $($arg)+)
    };
}
