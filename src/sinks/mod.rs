//! Sink implementations
//!
//! A sink receives one formatted JSON line per accepted log call.

pub mod console;
pub mod memory;
pub mod stream;

pub use console::ConsoleSink;
pub use memory::MemorySink;
pub use stream::StreamSink;

use crate::core::Result;

/// Byte-stream consumer of formatted log lines
pub trait Sink: Send {
    /// Write one line; the sink adds the trailing newline
    fn write_line(&mut self, line: &str) -> Result<()>;
    fn flush(&mut self) -> Result<()>;
    fn name(&self) -> &str;
}
