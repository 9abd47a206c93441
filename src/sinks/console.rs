//! Console sink: standard output, tailed by the CloudWatch agent

use super::Sink;
use crate::core::{LoggerError, Result};
use std::io::Write;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
enum Stream {
    #[default]
    Stdout,
    Stderr,
}

/// Writes each line to stdout (default) or stderr
#[derive(Debug, Default)]
pub struct ConsoleSink {
    stream: Stream,
}

impl ConsoleSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn stderr() -> Self {
        Self {
            stream: Stream::Stderr,
        }
    }

    fn write_to(out: &mut dyn Write, line: &str) -> std::io::Result<()> {
        // Single write per line
        let mut buf = String::with_capacity(line.len() + 1);
        buf.push_str(line);
        buf.push('\n');
        out.write_all(buf.as_bytes())
    }
}

impl Sink for ConsoleSink {
    fn write_line(&mut self, line: &str) -> Result<()> {
        let result = match self.stream {
            Stream::Stdout => Self::write_to(&mut std::io::stdout().lock(), line),
            Stream::Stderr => Self::write_to(&mut std::io::stderr().lock(), line),
        };
        result.map_err(|e| LoggerError::io_operation("writing log line", self.name().to_string(), e))
    }

    fn flush(&mut self) -> Result<()> {
        match self.stream {
            Stream::Stdout => std::io::stdout().flush()?,
            Stream::Stderr => std::io::stderr().flush()?,
        }
        Ok(())
    }

    fn name(&self) -> &str {
        match self.stream {
            Stream::Stdout => "stdout",
            Stream::Stderr => "stderr",
        }
    }
}
