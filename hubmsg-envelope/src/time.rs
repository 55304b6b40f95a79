use chrono::prelude::*;

/// The current wall-clock time, in milliseconds since the Unix epoch
pub fn now_millis() -> i64 {
    Utc::now().timestamp_millis()
}

/// Formats a UTC instant the way IoT Hub accepts creation times:
/// `2018-10-01T17:04:32.0000000Z`, always 7 fractional digits (100ns ticks).
pub fn format_hub_timestamp(instant: &DateTime<Utc>) -> String {
    // Leap seconds report nanos >= 1e9
    let ticks = (instant.timestamp_subsec_nanos() / 100).min(9_999_999);
    format!("{}.{:07}Z", instant.format("%Y-%m-%dT%H:%M:%S"), ticks)
}
