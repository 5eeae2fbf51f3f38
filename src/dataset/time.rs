//! Timestamp cells.
//!
//! Tables store naive local timestamps (`2024-03-05 14:15:00`). They are
//! mapped to milliseconds as if they were UTC; only differences and
//! ordering matter to the resolver, and formatting maps them back
//! unchanged.

use chrono::{DateTime, NaiveDateTime};

const FORMATS: [&str; 4] = [
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M",
];

/// Parses a timestamp cell into milliseconds.
pub fn parse_timestamp(text: &str) -> Option<i64> {
    let text = text.trim();
    FORMATS
        .iter()
        .find_map(|f| NaiveDateTime::parse_from_str(text, f).ok())
        .map(|dt| dt.and_utc().timestamp_millis())
}

/// Formats milliseconds as `YYYY-MM-DD HH:MM:SS`.
pub fn format_timestamp(time_ms: i64) -> String {
    match DateTime::from_timestamp_millis(time_ms) {
        Some(dt) => dt.naive_utc().format(FORMATS[0]).to_string(),
        None => time_ms.to_string(),
    }
}
