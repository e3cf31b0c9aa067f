//! Transcript rendering.
//!
//! Turns a merged message sequence into the canonical line format consumed
//! by the analysis stage:
//!
//! ```text
//! [DD/MM/YYYY, H:MM:SS am|pm] <sender>: <content>
//! ```
//!
//! One logical message per physical line; the 12-hour clock carries no
//! leading zero on the hour. Timestamps render in UTC so the same archive
//! always produces the same transcript.

use chrono::{DateTime, Datelike, TimeZone, Timelike, Utc};

use super::extract::RawMessageRecord;

/// Render a millisecond timestamp as `DD/MM/YYYY, H:MM:SS am|pm`.
pub fn format_timestamp(timestamp_ms: i64) -> String {
    let dt: DateTime<Utc> = Utc
        .timestamp_millis_opt(timestamp_ms)
        .single()
        .unwrap_or(DateTime::UNIX_EPOCH);

    let (hour, ampm) = match dt.hour() {
        0 => (12, "am"),
        h @ 1..=11 => (h, "am"),
        12 => (12, "pm"),
        h => (h - 12, "pm"),
    };

    format!(
        "{:02}/{:02}/{}, {}:{:02}:{:02} {}",
        dt.day(),
        dt.month(),
        dt.year(),
        hour,
        dt.minute(),
        dt.second(),
        ampm
    )
}

/// Collapse embedded line breaks so a message stays on one physical line.
fn single_line(s: &str) -> String {
    s.replace("\r\n", " ").replace(['\n', '\r'], " ")
}

/// Render one record as a transcript line.
pub fn format_line(record: &RawMessageRecord) -> String {
    format!(
        "[{}] {}: {}",
        format_timestamp(record.timestamp_ms),
        single_line(&record.sender),
        single_line(&record.content)
    )
}

/// Render the whole transcript: one line per record, joined with `\n`,
/// no trailing newline.
pub fn render(records: &[RawMessageRecord]) -> String {
    records
        .iter()
        .map(format_line)
        .collect::<Vec<_>>()
        .join("\n")
}
