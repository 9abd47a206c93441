//! Timestamp normalization for the wire format
//!
//! Every record carries two renderings of its own capture time:
//! `utc_time` (`2025-01-08T10:30:45.123Z`, millisecond precision, truncated)
//! and `timestamp` (fractional seconds since the Unix epoch).

use chrono::{DateTime, Utc};

/// strftime pattern for `utc_time`
pub const UTC_TIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.3fZ";

/// Format as `YYYY-MM-DDTHH:MM:SS.mmmZ`
///
/// # Examples
///
/// ```
/// use cloudwatch_logging::core::timestamp::utc_time;
/// use chrono::{TimeZone, Utc};
///
/// let dt = Utc.with_ymd_and_hms(2025, 1, 8, 10, 30, 45).unwrap();
/// assert_eq!(utc_time(&dt), "2025-01-08T10:30:45.000Z");
/// ```
#[must_use]
pub fn utc_time(datetime: &DateTime<Utc>) -> String {
    datetime.format(UTC_TIME_FORMAT).to_string()
}

/// Fractional seconds since the Unix epoch
#[must_use]
pub fn epoch_seconds(datetime: &DateTime<Utc>) -> f64 {
    datetime.timestamp() as f64 + f64::from(datetime.timestamp_subsec_nanos()) / 1e9
}
