//! In-memory sink for tests and inspection

use super::Sink;
use crate::core::Result;
use parking_lot::Mutex;
use std::sync::Arc;

/// Collects lines in memory; clones share the same buffer
///
/// # Example
///
/// ```
/// use cloudwatch_logging::sinks::{MemorySink, Sink};
///
/// let sink = MemorySink::new();
/// let mut writer = sink.clone();
/// writer.write_line("{}").unwrap();
/// assert_eq!(sink.lines(), vec!["{}".to_string()]);
/// ```
#[derive(Debug, Clone, Default)]
pub struct MemorySink {
    lines: Arc<Mutex<Vec<String>>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lines(&self) -> Vec<String> {
        self.lines.lock().clone()
    }

    /// Parse every line as JSON
    pub fn records(&self) -> serde_json::Result<Vec<serde_json::Value>> {
        self.lines.lock().iter().map(|line| serde_json::from_str(line)).collect()
    }

    pub fn len(&self) -> usize {
        self.lines.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.lock().is_empty()
    }

    pub fn clear(&self) {
        self.lines.lock().clear();
    }
}

impl Sink for MemorySink {
    fn write_line(&mut self, line: &str) -> Result<()> {
        self.lines.lock().push(line.to_string());
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        Ok(())
    }

    fn name(&self) -> &str {
        "memory"
    }
}
