//! AWS Lambda invocation context

use super::source::ContextAttributes;
use crate::core::FieldValue;
use serde::{Deserialize, Serialize};

/// Attributes read from a Lambda invocation context
pub const LAMBDA_ATTRIBUTES: &[&str] = &[
    "function_name",
    "function_version",
    "invoked_function_arn",
    "memory_limit_in_mb",
    "aws_request_id",
    "log_group_name",
    "log_stream_name",
];

/// Typed Lambda invocation descriptor
///
/// # Example
///
/// ```
/// use cloudwatch_logging::context::{ContextAttributes, LambdaContext};
///
/// let ctx = LambdaContext::default()
///     .with_function_name("TestLambdaFunction")
///     .with_request_id("8f5a9c1e");
/// assert!(ctx.attribute("aws_request_id").is_some());
/// assert!(ctx.attribute("log_group_name").is_none());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LambdaContext {
    pub function_name: Option<String>,
    pub function_version: Option<String>,
    pub invoked_function_arn: Option<String>,
    pub memory_limit_in_mb: Option<u32>,
    pub aws_request_id: Option<String>,
    pub log_group_name: Option<String>,
    pub log_stream_name: Option<String>,
}

impl LambdaContext {
    /// Static attributes from the Lambda runtime environment variables
    ///
    /// `invoked_function_arn` and `aws_request_id` are per invocation and
    /// are left unset.
    pub fn from_env() -> Self {
        let var = |name: &str| std::env::var(name).ok().filter(|v| !v.is_empty());
        Self {
            function_name: var("AWS_LAMBDA_FUNCTION_NAME"),
            function_version: var("AWS_LAMBDA_FUNCTION_VERSION"),
            invoked_function_arn: None,
            memory_limit_in_mb: var("AWS_LAMBDA_FUNCTION_MEMORY_SIZE").and_then(|v| v.parse().ok()),
            aws_request_id: None,
            log_group_name: var("AWS_LAMBDA_LOG_GROUP_NAME"),
            log_stream_name: var("AWS_LAMBDA_LOG_STREAM_NAME"),
        }
    }

    #[must_use]
    pub fn with_function_name(mut self, name: impl Into<String>) -> Self {
        self.function_name = Some(name.into());
        self
    }

    #[must_use]
    pub fn with_request_id(mut self, request_id: impl Into<String>) -> Self {
        self.aws_request_id = Some(request_id.into());
        self
    }

    #[must_use]
    pub fn with_invoked_function_arn(mut self, arn: impl Into<String>) -> Self {
        self.invoked_function_arn = Some(arn.into());
        self
    }
}

impl ContextAttributes for LambdaContext {
    fn attribute(&self, name: &str) -> Option<FieldValue> {
        let text = |v: &Option<String>| v.as_deref().map(FieldValue::from);
        match name {
            "function_name" => text(&self.function_name),
            "function_version" => text(&self.function_version),
            "invoked_function_arn" => text(&self.invoked_function_arn),
            "memory_limit_in_mb" => self.memory_limit_in_mb.map(FieldValue::from),
            "aws_request_id" => text(&self.aws_request_id),
            "log_group_name" => text(&self.log_group_name),
            "log_stream_name" => text(&self.log_stream_name),
            _ => None,
        }
    }
}
