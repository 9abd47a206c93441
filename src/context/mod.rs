//! Invocation context sources
//!
//! A context source reads an enumerated attribute list from an external
//! invocation descriptor and injects the values into every event with
//! appender precedence (fields already present win).

pub mod lambda;
pub mod source;

pub use lambda::{LambdaContext, LAMBDA_ATTRIBUTES};
pub use source::{ContextAttributes, ContextSnapshot, ContextSource, RuntimeEnv};
