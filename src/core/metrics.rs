//! Logger metrics for observability
//!
//! Counters for monitoring the record-shaping pipeline: lines written,
//! calls rejected by the formatter or the sink, and appender collisions.

use std::sync::atomic::{AtomicU64, Ordering};

/// Metrics for logger observability
///
/// # Example
///
/// ```
/// use cloudwatch_logging::LoggerMetrics;
///
/// let metrics = LoggerMetrics::new();
///
/// metrics.record_logged();
/// metrics.record_collision();
///
/// assert_eq!(metrics.total_logged(), 1);
/// assert_eq!(metrics.collisions(), 1);
/// ```
#[derive(Debug, Default)]
pub struct LoggerMetrics {
    /// Lines handed to the sink
    total_logged: AtomicU64,

    /// Calls that failed before or during the write
    failed: AtomicU64,

    /// Calls rejected by the minimum level
    below_level: AtomicU64,

    /// Appender keys that yielded to an existing field
    collisions: AtomicU64,

    /// Sink writes that failed while another sink accepted the line
    sink_errors: AtomicU64,
}

impl LoggerMetrics {
    /// Create a new metrics instance with all counters at zero
    pub const fn new() -> Self {
        Self {
            total_logged: AtomicU64::new(0),
            failed: AtomicU64::new(0),
            below_level: AtomicU64::new(0),
            collisions: AtomicU64::new(0),
            sink_errors: AtomicU64::new(0),
        }
    }

    #[inline]
    pub fn total_logged(&self) -> u64 {
        self.total_logged.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn failed(&self) -> u64 {
        self.failed.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn below_level(&self) -> u64 {
        self.below_level.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn collisions(&self) -> u64 {
        self.collisions.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn record_logged(&self) -> u64 {
        self.total_logged.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_failed(&self) -> u64 {
        self.failed.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_below_level(&self) -> u64 {
        self.below_level.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_collision(&self) -> u64 {
        self.collisions.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn sink_errors(&self) -> u64 {
        self.sink_errors.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn record_sink_error(&self) -> u64 {
        self.sink_errors.fetch_add(1, Ordering::Relaxed)
    }
}
