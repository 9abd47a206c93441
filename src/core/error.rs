//! Error types for the logger system

pub type Result<T> = std::result::Result<T, LoggerError>;

#[derive(Debug, thiserror::Error)]
pub enum LoggerError {
    /// A field value cannot be represented as JSON
    #[error("Cannot serialize field '{key}': {message}")]
    Serialization { key: String, message: String },

    /// Logger has neither a sink of its own nor a propagated one
    #[error("Logger '{logger}' has no sink attached")]
    MisconfiguredSink { logger: String },

    /// Ad-hoc field tried to overwrite a record attribute
    #[error("Attempt to overwrite reserved record attribute '{key}'")]
    ReservedField { key: String },

    /// Unknown named filter preset
    #[error("Unknown filter preset '{0}'")]
    UnknownPreset(String),

    /// IO error with context
    #[error("IO error while {operation}: {message}")]
    IoOperation {
        operation: String,
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// Generic IO error
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// Invalid configuration with details
    #[error("Invalid configuration for {component}: {message}")]
    InvalidConfiguration { component: String, message: String },
}

impl LoggerError {
    /// Create a serialization error naming the offending field
    pub fn serialization(key: impl Into<String>, message: impl Into<String>) -> Self {
        LoggerError::Serialization {
            key: key.into(),
            message: message.into(),
        }
    }

    /// Create a misconfigured sink error
    pub fn misconfigured_sink(logger: impl Into<String>) -> Self {
        LoggerError::MisconfiguredSink {
            logger: logger.into(),
        }
    }

    /// Create a reserved field error
    pub fn reserved_field(key: impl Into<String>) -> Self {
        LoggerError::ReservedField { key: key.into() }
    }

    /// Create an IO operation error with context
    pub fn io_operation(
        operation: impl Into<String>,
        message: impl Into<String>,
        source: std::io::Error,
    ) -> Self {
        LoggerError::IoOperation {
            operation: operation.into(),
            message: message.into(),
            source,
        }
    }

    /// Create an invalid configuration error
    pub fn config(component: impl Into<String>, message: impl Into<String>) -> Self {
        LoggerError::InvalidConfiguration {
            component: component.into(),
            message: message.into(),
        }
    }
}
