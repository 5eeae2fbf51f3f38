//! Per-venue committed intervals.
//!
//! The ledger is the only state a resolution run mutates. It grows
//! monotonically: commitments are added, never revised or removed.
//!
//! # Invariant
//! For any venue, no two committed intervals overlap (half-open).

use serde::Serialize;
use std::collections::HashMap;
use tracing::warn;

use crate::models::Commitment;

/// Committed intervals grouped by venue.
#[derive(Debug, Clone, Default, Serialize)]
pub struct VenueLedger {
    by_venue: HashMap<String, Vec<Commitment>>,
}

impl VenueLedger {
    /// Creates an empty ledger.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a ledger holding commitments from an earlier run.
    ///
    /// Prior commitments are admitted in order through the same overlap
    /// check as new ones; any that collide with an earlier prior are
    /// dropped with a warning so the invariant holds from the start.
    pub fn from_commitments(prior: impl IntoIterator<Item = Commitment>) -> Self {
        let mut ledger = Self::new();
        for c in prior {
            if let Err(rejected) = ledger.try_commit(c) {
                warn!(
                    meeting_id = %rejected.meeting_id,
                    venue_id = %rejected.venue_id,
                    "dropping prior commitment that overlaps an earlier one"
                );
            }
        }
        ledger
    }

    /// The first commitment at `venue_id` overlapping `[start_ms, end_ms)`.
    pub fn conflict(&self, venue_id: &str, start_ms: i64, end_ms: i64) -> Option<&Commitment> {
        self.by_venue
            .get(venue_id)?
            .iter()
            .find(|c| c.overlaps(start_ms, end_ms))
    }

    /// Whether `[start_ms, end_ms)` is free at `venue_id`.
    pub fn is_free(&self, venue_id: &str, start_ms: i64, end_ms: i64) -> bool {
        self.conflict(venue_id, start_ms, end_ms).is_none()
    }

    /// Records a commitment if its interval is free.
    ///
    /// On conflict the ledger is left untouched and the commitment is
    /// handed back.
    pub fn try_commit(&mut self, commitment: Commitment) -> Result<(), Commitment> {
        if !self.is_free(&commitment.venue_id, commitment.start_ms, commitment.end_ms) {
            return Err(commitment);
        }
        self.by_venue
            .entry(commitment.venue_id.clone())
            .or_default()
            .push(commitment);
        Ok(())
    }

    /// Commitments at a venue, in commit order.
    pub fn commitments_for(&self, venue_id: &str) -> &[Commitment] {
        self.by_venue
            .get(venue_id)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Iterates over every commitment (venue order unspecified).
    pub fn iter(&self) -> impl Iterator<Item = &Commitment> {
        self.by_venue.values().flatten()
    }

    /// Venues with at least one commitment.
    pub fn venue_count(&self) -> usize {
        self.by_venue.len()
    }

    /// Total number of commitments.
    pub fn len(&self) -> usize {
        self.by_venue.values().map(Vec::len).sum()
    }

    /// Whether nothing has been committed.
    pub fn is_empty(&self) -> bool {
        self.by_venue.values().all(Vec::is_empty)
    }
}
