//! Side-channel diagnostics for recoverable pipeline conditions
//!
//! Diagnostics never abort a log call. By default they are written to
//! stderr; a `DiagnosticCallback` installed on the logger replaces that.
//! A diagnostic never carries a field value.

use super::log_level::LogLevel;
use std::fmt;
use std::sync::Arc;

/// Recoverable condition observed while shaping or delivering a record
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Diagnostic {
    /// An appender key was already present; the existing value was kept
    FieldCollision { logger: String, key: String },
    /// One of several sinks rejected a line that another sink accepted
    SinkFailure {
        logger: String,
        sink: String,
        message: String,
    },
}

impl Diagnostic {
    pub fn level(&self) -> LogLevel {
        match self {
            Diagnostic::FieldCollision { .. } => LogLevel::Warning,
            Diagnostic::SinkFailure { .. } => LogLevel::Error,
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Diagnostic::FieldCollision { logger, key } => write!(
                f,
                "Logger '{}': appended field '{}' is already present, keeping existing value",
                logger, key
            ),
            Diagnostic::SinkFailure {
                logger,
                sink,
                message,
            } => write!(
                f,
                "Logger '{}': sink '{}' failed, line delivered elsewhere: {}",
                logger, sink, message
            ),
        }
    }
}

/// Callback invoked for every diagnostic
///
/// # Example
///
/// ```
/// use cloudwatch_logging::prelude::*;
/// use std::sync::Arc;
///
/// let callback: DiagnosticCallback = Arc::new(|diagnostic: &Diagnostic| {
///     eprintln!("pipeline: {}", diagnostic);
/// });
/// ```
pub type DiagnosticCallback = Arc<dyn Fn(&Diagnostic) + Send + Sync>;

pub(crate) fn report(callback: Option<&DiagnosticCallback>, diagnostic: &Diagnostic) {
    match callback {
        Some(callback) => callback(diagnostic),
        None => eprintln!("[LOGGER {}] {}", diagnostic.level(), diagnostic),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parking_lot::Mutex;

    #[test]
    fn test_collision_display_omits_value() {
        let diagnostic = Diagnostic::FieldCollision {
            logger: "orders".to_string(),
            key: "function_name".to_string(),
        };
        let text = diagnostic.to_string();
        assert!(text.contains("orders"));
        assert!(text.contains("function_name"));
        assert_eq!(diagnostic.level(), LogLevel::Warning);
    }

    #[test]
    fn test_report_uses_callback() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let seen_clone = Arc::clone(&seen);
        let callback: DiagnosticCallback = Arc::new(move |d: &Diagnostic| seen_clone.lock().push(d.clone()));

        let diagnostic = Diagnostic::FieldCollision {
            logger: "app".to_string(),
            key: "k".to_string(),
        };
        report(Some(&callback), &diagnostic);

        assert_eq!(seen.lock().as_slice(), &[diagnostic]);
    }

    #[test]
    fn test_sink_failure_is_error_level() {
        let diagnostic = Diagnostic::SinkFailure {
            logger: "app".to_string(),
            sink: "root".to_string(),
            message: "broken pipe".to_string(),
        };
        assert_eq!(diagnostic.level(), LogLevel::Error);
        assert!(diagnostic.to_string().contains("sink 'root' failed"));
    }
}
