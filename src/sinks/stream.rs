//! Stream sink over any `io::Write`

use super::Sink;
use crate::core::{LoggerError, Result};
use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::Path;

/// Writes newline-terminated lines to an arbitrary writer
pub struct StreamSink<W: Write + Send> {
    writer: W,
    name: String,
}

impl<W: Write + Send> StreamSink<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            name: "stream".to_string(),
        }
    }

    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn get_ref(&self) -> &W {
        &self.writer
    }
}

impl StreamSink<BufWriter<File>> {
    /// Append to the file at `path`, creating it if needed
    pub fn file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .map_err(|e| LoggerError::io_operation("opening log file", path.display().to_string(), e))?;

        Ok(Self::new(BufWriter::new(file)).with_name(path.display().to_string()))
    }
}

impl<W: Write + Send> Sink for StreamSink<W> {
    fn write_line(&mut self, line: &str) -> Result<()> {
        let mut buf = String::with_capacity(line.len() + 1);
        buf.push_str(line);
        buf.push('\n');
        self.writer.write_all(buf.as_bytes())?;
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }

    fn name(&self) -> &str {
        &self.name
    }
}

impl<W: Write + Send> Drop for StreamSink<W> {
    fn drop(&mut self) {
        // Ensure buffered lines reach the underlying writer
        let _ = self.writer.flush();
    }
}
