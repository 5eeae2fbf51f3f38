//! Resolution run metrics.
//!
//! # Metrics
//!
//! | Metric | Definition |
//! |--------|-----------|
//! | Resolution rate | committed / (committed + unresolved) |
//! | Already decided | Meetings that kept a prior commitment |
//! | Mean support | Mean participant count behind accepted candidates |
//! | Fallbacks | Meetings that got a candidate other than their top-ranked one |
//! | Venue load | Commitments made per venue in this run |

use serde::Serialize;
use std::collections::BTreeMap;

use super::{Outcome, Resolution};

/// Resolution run summary.
#[derive(Debug, Clone, Serialize)]
pub struct ResolutionSummary {
    /// Meetings processed.
    pub meetings: usize,
    /// Meetings committed in this run.
    pub committed: usize,
    /// Meetings that kept a prior commitment.
    pub already_decided: usize,
    /// Valid meetings with no feasible candidate.
    pub unresolved: usize,
    /// Meetings rejected by validation.
    pub invalid: usize,
    /// Fraction of valid meetings that were committed (0.0..1.0).
    pub resolution_rate: f64,
    /// Mean support of accepted candidates.
    pub mean_support: f64,
    /// Committed meetings whose accepted candidate was not ranked first.
    pub fallbacks: usize,
    /// Commitments made per venue.
    pub commitments_by_venue: BTreeMap<String, usize>,
}

impl ResolutionSummary {
    /// Computes the summary of a finished run.
    pub fn calculate(resolution: &Resolution) -> Self {
        let mut committed = 0usize;
        let mut already_decided = 0usize;
        let mut unresolved = 0usize;
        let mut invalid = 0usize;
        let mut fallbacks = 0usize;
        let mut support_total: u64 = 0;
        let mut commitments_by_venue: BTreeMap<String, usize> = BTreeMap::new();

        for o in resolution.outcomes() {
            match &o.outcome {
                Outcome::Committed { commitment, rank } => {
                    committed += 1;
                    support_total += u64::from(commitment.support);
                    if *rank > 0 {
                        fallbacks += 1;
                    }
                    *commitments_by_venue
                        .entry(commitment.venue_id.clone())
                        .or_insert(0) += 1;
                }
                Outcome::AlreadyDecided(_) => already_decided += 1,
                Outcome::Unresolved => unresolved += 1,
                Outcome::Invalid(_) => invalid += 1,
            }
        }

        let valid = committed + unresolved;
        let resolution_rate = if valid == 0 {
            1.0
        } else {
            committed as f64 / valid as f64
        };
        let mean_support = if committed == 0 {
            0.0
        } else {
            support_total as f64 / committed as f64
        };

        Self {
            meetings: resolution.meeting_count(),
            committed,
            already_decided,
            unresolved,
            invalid,
            resolution_rate,
            mean_support,
            fallbacks,
            commitments_by_venue,
        }
    }

    /// The venue with the most commitments (lowest ID on ties).
    pub fn busiest_venue(&self) -> Option<(&str, usize)> {
        self.commitments_by_venue
            .iter()
            .fold(None, |best, (id, &n)| match best {
                Some((_, m)) if m >= n => best,
                _ => Some((id.as_str(), n)),
            })
    }
}
