//! Commitments and final decisions (the resolver's output).
//!
//! A commitment records that a meeting occupies a venue during a
//! half-open interval. Commitments are immutable once recorded; a run only
//! ever adds them.

use serde::{Deserialize, Serialize};

use super::Interval;

/// A finalized (venue, interval) assignment for one meeting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Commitment {
    /// Committed meeting ID.
    pub meeting_id: String,
    /// Venue the meeting occupies.
    pub venue_id: String,
    /// Start time (ms, inclusive).
    pub start_ms: i64,
    /// End time (ms, exclusive).
    pub end_ms: i64,
    /// Support of the candidate that produced this commitment.
    pub support: u32,
}

/// One output row: the chosen venue and start time for a meeting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FinalDecision {
    /// Meeting ID.
    pub meeting_id: String,
    /// Chosen venue ID.
    pub final_venue_id: String,
    /// Chosen start time (ms).
    pub final_time_ms: i64,
}

impl Commitment {
    /// Creates a new commitment.
    pub fn new(
        meeting_id: impl Into<String>,
        venue_id: impl Into<String>,
        start_ms: i64,
        end_ms: i64,
    ) -> Self {
        Self {
            meeting_id: meeting_id.into(),
            venue_id: venue_id.into(),
            start_ms,
            end_ms,
            support: 0,
        }
    }

    /// Sets the supporting participant count.
    pub fn with_support(mut self, support: u32) -> Self {
        self.support = support;
        self
    }

    /// The occupied interval.
    #[inline]
    pub fn interval(&self) -> Interval {
        Interval::new(self.start_ms, self.end_ms)
    }

    /// Total duration (end - start) in ms.
    #[inline]
    pub fn duration_ms(&self) -> i64 {
        self.end_ms - self.start_ms
    }

    /// Whether `[start_ms, end_ms)` overlaps this commitment.
    pub fn overlaps(&self, start_ms: i64, end_ms: i64) -> bool {
        self.interval().overlaps(&Interval::new(start_ms, end_ms))
    }

    /// The output record for this commitment.
    pub fn to_decision(&self) -> FinalDecision {
        FinalDecision {
            meeting_id: self.meeting_id.clone(),
            final_venue_id: self.venue_id.clone(),
            final_time_ms: self.start_ms,
        }
    }
}
