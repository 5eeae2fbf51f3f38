//! Meeting model.
//!
//! A meeting is the unit of work the resolver places: it needs one
//! contiguous interval at one venue. Only the duration matters to the
//! resolver; everything else is carried through for reporting.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

const MS_PER_MINUTE: i64 = 60_000;

/// A meeting awaiting a final time and venue.
///
/// # Time Representation
/// Durations are in milliseconds. `None` means the source data carried
/// no duration; validation rejects such meetings instead of guessing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Meeting {
    /// Unique meeting identifier.
    pub id: String,
    /// Human-readable name.
    pub name: String,
    /// Requested duration (ms).
    pub duration_ms: Option<i64>,
    /// Domain-specific key-value metadata.
    pub attributes: HashMap<String, String>,
}

impl Meeting {
    /// Creates a meeting with the given ID and no duration.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: String::new(),
            duration_ms: None,
            attributes: HashMap::new(),
        }
    }

    /// Sets the meeting name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Sets the duration in milliseconds.
    pub fn with_duration_ms(mut self, duration_ms: i64) -> Self {
        self.duration_ms = Some(duration_ms);
        self
    }

    /// Sets the duration in minutes, saturating at `i64::MAX` ms.
    pub fn with_duration_minutes(self, minutes: i64) -> Self {
        self.with_duration_ms(minutes.saturating_mul(MS_PER_MINUTE))
    }

    /// Adds a domain-specific attribute.
    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(key.into(), value.into());
        self
    }

    /// Occupied interval `[start_ms, start_ms + duration)`.
    ///
    /// `None` if the duration is unknown or the end does not fit in an `i64`.
    pub fn interval_from(&self, start_ms: i64) -> Option<(i64, i64)> {
        let end_ms = start_ms.checked_add(self.duration_ms?)?;
        Some((start_ms, end_ms))
    }
}

/// Parses a duration cell such as `"1 hours 30 minutes"` into milliseconds.
///
/// Accepts any sequence of `<number> <unit>` pairs where the unit is an
/// hour or minute spelling (`hours`, `hour`, `hrs`, `h`, `minutes`, `min`,
/// `m`, ...). A bare integer is read as minutes. Returns `None` when the
/// text is empty, malformed, or too large to express in milliseconds.
pub fn parse_duration_text(text: &str) -> Option<i64> {
    let tokens: Vec<&str> = text.split_whitespace().collect();
    match tokens.as_slice() {
        [] => None,
        [minutes] => minutes.parse::<i64>().ok()?.checked_mul(MS_PER_MINUTE),
        _ if tokens.len() % 2 != 0 => None,
        _ => {
            let mut total = 0i64;
            for pair in tokens.chunks(2) {
                let value: i64 = pair[0].parse().ok()?;
                let unit_ms = match pair[1].to_ascii_lowercase().as_str() {
                    "hours" | "hour" | "hrs" | "hr" | "h" => 60 * MS_PER_MINUTE,
                    "minutes" | "minute" | "mins" | "min" | "m" => MS_PER_MINUTE,
                    _ => return None,
                };
                total = total.checked_add(value.checked_mul(unit_ms)?)?;
            }
            Some(total)
        }
    }
}
