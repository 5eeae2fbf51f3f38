//! Half-open time intervals.
//!
//! # Time Model
//! All times are in milliseconds since the Unix epoch, read from naive
//! (zone-less) timestamps. The resolver only compares instants, so the
//! zone never matters as long as every input shares one.

use serde::{Deserialize, Serialize};

/// A time interval [start, end).
///
/// Half-open interval: includes start, excludes end. Two intervals that
/// merely touch (`a.end_ms == b.start_ms`) do not overlap.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct Interval {
    /// Interval start (ms, inclusive).
    pub start_ms: i64,
    /// Interval end (ms, exclusive).
    pub end_ms: i64,
}

impl Interval {
    /// Creates a new interval.
    pub fn new(start_ms: i64, end_ms: i64) -> Self {
        Self { start_ms, end_ms }
    }

    /// Duration of this interval (ms).
    #[inline]
    pub fn duration_ms(&self) -> i64 {
        self.end_ms - self.start_ms
    }

    /// Whether a timestamp falls within this interval.
    #[inline]
    pub fn contains(&self, time_ms: i64) -> bool {
        time_ms >= self.start_ms && time_ms < self.end_ms
    }

    /// Whether two intervals overlap.
    ///
    /// Equivalent to `!(self.end <= other.start || self.start >= other.end)`.
    pub fn overlaps(&self, other: &Self) -> bool {
        self.start_ms < other.end_ms && other.start_ms < self.end_ms
    }
}
