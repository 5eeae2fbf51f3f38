//! Greedy slot-conflict resolver.
//!
//! # Algorithm
//!
//! 1. Process meetings in the caller's order.
//! 2. For each meeting, walk its candidates by descending support.
//! 3. Accept the first candidate whose interval `[time, time + duration)`
//!    overlaps no commitment at the same venue.
//! 4. Record the commitment; later meetings see it.
//!
//! A meeting with no acceptable candidate (or no candidates at all) is
//! `Unresolved`. A meeting that fails validation is `Invalid` and leaves
//! the ledger untouched; either way the run continues.
//!
//! A meeting that already holds a prior commitment is `AlreadyDecided`: it
//! keeps that commitment and its candidates are not considered again.
//!
//! # Complexity
//! O(n * c * k) where n=meetings, c=candidates/meeting, k=commitments/venue.
//!
//! There is no backtracking: an early meeting may take a slot that would
//! have let a later meeting resolve.

use serde::Serialize;
use std::collections::{HashMap, HashSet};
use tracing::{debug, info};

use super::VenueLedger;
use crate::models::{Candidate, CandidateSet, Commitment, FinalDecision, Meeting, Venue};
use crate::validation::{validate_meeting, ValidationError};

/// Input container for a resolution run.
#[derive(Debug, Clone, Default)]
pub struct ResolveRequest {
    /// Meetings, in processing order.
    pub meetings: Vec<Meeting>,
    /// Ranked candidates per meeting.
    pub candidates: CandidateSet,
    /// Known venues.
    pub venues: Vec<Venue>,
    /// Commitments carried over from an earlier run.
    pub prior_commitments: Vec<Commitment>,
}

impl ResolveRequest {
    /// Creates a new request.
    pub fn new(meetings: Vec<Meeting>, candidates: CandidateSet, venues: Vec<Venue>) -> Self {
        Self {
            meetings,
            candidates,
            venues,
            prior_commitments: Vec::new(),
        }
    }

    /// Sets commitments that are already fixed before this run.
    pub fn with_prior_commitments(mut self, prior: Vec<Commitment>) -> Self {
        self.prior_commitments = prior;
        self
    }
}

/// What happened to one meeting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum Outcome {
    /// A candidate was accepted. `rank` is its 0-based position in the
    /// meeting's ranked list.
    Committed { commitment: Commitment, rank: usize },
    /// The meeting was decided before this run; the prior commitment stands.
    AlreadyDecided(Commitment),
    /// No candidate cleared the overlap test.
    Unresolved,
    /// The meeting's input was malformed.
    Invalid(ValidationError),
}

/// One meeting's outcome.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MeetingOutcome {
    /// Meeting ID.
    pub meeting_id: String,
    /// Result for this meeting.
    pub outcome: Outcome,
}

/// Result of a resolution run.
///
/// Outcomes are kept in processing order; the ledger holds every
/// commitment, including prior ones.
#[derive(Debug, Clone, Default)]
pub struct Resolution {
    outcomes: Vec<MeetingOutcome>,
    ledger: VenueLedger,
}

impl Resolution {
    /// Outcomes in processing order.
    pub fn outcomes(&self) -> &[MeetingOutcome] {
        &self.outcomes
    }

    /// Final ledger state.
    pub fn ledger(&self) -> &VenueLedger {
        &self.ledger
    }

    /// Outcome for a meeting (first occurrence if the ID was repeated).
    pub fn outcome_for(&self, meeting_id: &str) -> Option<&Outcome> {
        self.outcomes
            .iter()
            .find(|o| o.meeting_id == meeting_id)
            .map(|o| &o.outcome)
    }

    /// Commitment made for a meeting in this run.
    pub fn commitment_for(&self, meeting_id: &str) -> Option<&Commitment> {
        match self.outcome_for(meeting_id)? {
            Outcome::Committed { commitment, .. } => Some(commitment),
            _ => None,
        }
    }

    /// Commitments made in this run, in processing order.
    pub fn commitments(&self) -> impl Iterator<Item = &Commitment> {
        self.outcomes.iter().filter_map(|o| match &o.outcome {
            Outcome::Committed { commitment, .. } => Some(commitment),
            _ => None,
        })
    }

    /// Prior commitments kept for meetings processed in this run.
    pub fn already_decided(&self) -> impl Iterator<Item = &Commitment> {
        self.outcomes.iter().filter_map(|o| match &o.outcome {
            Outcome::AlreadyDecided(commitment) => Some(commitment),
            _ => None,
        })
    }

    /// Output records for decided meetings, in processing order.
    ///
    /// Covers meetings committed in this run and meetings whose prior
    /// decision was kept. Unresolved and invalid meetings are omitted.
    pub fn decisions(&self) -> Vec<FinalDecision> {
        self.outcomes
            .iter()
            .filter_map(|o| match &o.outcome {
                Outcome::Committed { commitment, .. } | Outcome::AlreadyDecided(commitment) => {
                    Some(commitment.to_decision())
                }
                _ => None,
            })
            .collect()
    }

    /// IDs of meetings left without a decision.
    pub fn unresolved(&self) -> Vec<&str> {
        self.outcomes
            .iter()
            .filter(|o| o.outcome == Outcome::Unresolved)
            .map(|o| o.meeting_id.as_str())
            .collect()
    }

    /// Validation errors of rejected meetings.
    pub fn errors(&self) -> Vec<&ValidationError> {
        self.outcomes
            .iter()
            .filter_map(|o| match &o.outcome {
                Outcome::Invalid(e) => Some(e),
                _ => None,
            })
            .collect()
    }

    /// Number of meetings processed.
    pub fn meeting_count(&self) -> usize {
        self.outcomes.len()
    }

    /// Number of meetings committed in this run.
    pub fn committed_count(&self) -> usize {
        self.commitments().count()
    }
}

/// Greedy slot-conflict resolver.
///
/// Picks, per meeting, the best-supported candidate that does not collide
/// with anything already committed at the same venue. Deterministic: the
/// same meetings in the same order with the same candidates always produce
/// the same resolution.
///
/// # Example
///
/// ```
/// use meet_decision::models::{Candidate, CandidateSet, Meeting, Venue};
/// use meet_decision::resolver::GreedyResolver;
///
/// let meetings = vec![
///     Meeting::new("A").with_duration_ms(1000),
///     Meeting::new("B").with_duration_ms(1000),
/// ];
/// let candidates = CandidateSet::from_candidates(vec![
///     Candidate::new("A", 0, "V1", 3),
///     Candidate::new("B", 0, "V1", 3),
/// ]);
/// let venues = vec![Venue::new("V1")];
///
/// let resolution = GreedyResolver::new().resolve(&meetings, &candidates, &venues);
/// assert!(resolution.commitment_for("A").is_some());
/// assert_eq!(resolution.unresolved(), vec!["B"]);
/// ```
#[derive(Debug, Clone, Default)]
pub struct GreedyResolver {
    prior_commitments: Vec<Commitment>,
}

impl GreedyResolver {
    /// Creates a resolver with an empty starting ledger.
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds the ledger with commitments from an earlier run.
    pub fn with_prior_commitments(mut self, prior: Vec<Commitment>) -> Self {
        self.prior_commitments = prior;
        self
    }

    /// Resolves meetings in slice order.
    pub fn resolve(
        &self,
        meetings: &[Meeting],
        candidates: &CandidateSet,
        venues: &[Venue],
    ) -> Resolution {
        let venue_ids: HashSet<&str> = venues.iter().map(|v| v.id.as_str()).collect();
        let mut ledger = VenueLedger::from_commitments(self.prior_commitments.iter().cloned());
        let decided = decided_meetings(&self.prior_commitments, &ledger);
        let mut seen: HashSet<&str> = HashSet::new();
        let mut outcomes = Vec::with_capacity(meetings.len());

        for meeting in meetings {
            let ranked = candidates.get(&meeting.id);
            let outcome = if !seen.insert(meeting.id.as_str()) {
                Outcome::Invalid(ValidationError::duplicate_meeting(&meeting.id))
            } else if let Some(prior) = decided.get(meeting.id.as_str()) {
                Outcome::AlreadyDecided((*prior).clone())
            } else if let Err(e) = validate_meeting(meeting, ranked, &venue_ids) {
                Outcome::Invalid(e)
            } else {
                resolve_meeting(&mut ledger, meeting, ranked)
            };

            match &outcome {
                Outcome::Committed { commitment, rank } => debug!(
                    meeting_id = %meeting.id,
                    venue_id = %commitment.venue_id,
                    start_ms = commitment.start_ms,
                    rank,
                    "committed"
                ),
                Outcome::AlreadyDecided(prior) => debug!(
                    meeting_id = %meeting.id,
                    venue_id = %prior.venue_id,
                    start_ms = prior.start_ms,
                    "already decided"
                ),
                Outcome::Unresolved => debug!(
                    meeting_id = %meeting.id,
                    candidates = ranked.len(),
                    "unresolved"
                ),
                Outcome::Invalid(e) => debug!(meeting_id = %meeting.id, error = %e, "invalid"),
            }

            outcomes.push(MeetingOutcome {
                meeting_id: meeting.id.clone(),
                outcome,
            });
        }

        let resolution = Resolution { outcomes, ledger };
        info!(
            meetings = resolution.meeting_count(),
            committed = resolution.committed_count(),
            already_decided = resolution.already_decided().count(),
            unresolved = resolution.unresolved().len(),
            invalid = resolution.errors().len(),
            "resolution finished"
        );
        resolution
    }

    /// Resolves from a request, combining its prior commitments with ours.
    pub fn resolve_request(&self, request: &ResolveRequest) -> Resolution {
        let mut prior = self.prior_commitments.clone();
        prior.extend(request.prior_commitments.iter().cloned());
        let resolver = Self {
            prior_commitments: prior,
        };
        resolver.resolve(&request.meetings, &request.candidates, &request.venues)
    }
}

/// First admitted prior commitment per meeting ID.
///
/// Priors the ledger rejected as overlapping do not count as decisions.
fn decided_meetings<'a>(
    prior: &'a [Commitment],
    ledger: &VenueLedger,
) -> HashMap<&'a str, &'a Commitment> {
    let mut decided = HashMap::new();
    for c in prior {
        if ledger.commitments_for(&c.venue_id).contains(c) {
            decided.entry(c.meeting_id.as_str()).or_insert(c);
        }
    }
    decided
}

/// Places one already-validated meeting.
///
/// Walks `ranked` in order and commits the first candidate whose interval
/// is free at its venue. Candidates whose end time would overflow are
/// skipped. The ledger is only mutated on success.
pub fn resolve_meeting(
    ledger: &mut VenueLedger,
    meeting: &Meeting,
    ranked: &[Candidate],
) -> Outcome {
    for (rank, candidate) in ranked.iter().enumerate() {
        let Some((start_ms, end_ms)) = meeting.interval_from(candidate.time_ms) else {
            continue;
        };
        let commitment = Commitment::new(&meeting.id, &candidate.venue_id, start_ms, end_ms)
            .with_support(candidate.support);

        if ledger.try_commit(commitment.clone()).is_ok() {
            return Outcome::Committed { commitment, rank };
        }
    }

    Outcome::Unresolved
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::ValidationErrorKind;

    fn venues(ids: &[&str]) -> Vec<Venue> {
        ids.iter().map(|id| Venue::new(*id)).collect()
    }

    fn meeting(id: &str, duration_ms: i64) -> Meeting {
        Meeting::new(id).with_duration_ms(duration_ms)
    }

    #[test]
    fn test_single_candidate_accepted() {
        let meetings = vec![meeting("A", 1000)];
        let cands = CandidateSet::from_candidates(vec![Candidate::new("A", 5000, "V1", 1)]);
        let r = GreedyResolver::new().resolve(&meetings, &cands, &venues(&["V1"]));

        let c = r.commitment_for("A").unwrap();
        assert_eq!(c.venue_id, "V1");
        assert_eq!(c.start_ms, 5000);
        assert_eq!(c.end_ms, 6000);
    }

    #[test]
    fn test_identical_candidates_first_wins() {
        let meetings = vec![meeting("A", 1000), meeting("B", 1000)];
        let cands = CandidateSet::from_candidates(vec![
            Candidate::new("A", 0, "V1", 2),
            Candidate::new("B", 0, "V1", 2),
        ]);
        let r = GreedyResolver::new().resolve(&meetings, &cands, &venues(&["V1"]));

        assert!(r.commitment_for("A").is_some());
        assert_eq!(r.outcome_for("B"), Some(&Outcome::Unresolved));
    }

    #[test]
    fn test_processing_order_matters() {
        let cands = CandidateSet::from_candidates(vec![
            Candidate::new("A", 0, "V1", 2),
            Candidate::new("B", 0, "V1", 2),
        ]);
        let meetings = vec![meeting("B", 1000), meeting("A", 1000)];
        let r = GreedyResolver::new().resolve(&meetings, &cands, &venues(&["V1"]));
        assert!(r.commitment_for("B").is_some());
        assert_eq!(r.unresolved(), vec!["A"]);
    }

    #[test]
    fn test_abutting_candidate_accepted() {
        let meetings = vec![meeting("A", 1000), meeting("B", 1000), meeting("C", 500)];
        let cands = CandidateSet::from_candidates(vec![
            Candidate::new("A", 1000, "V1", 1),
            Candidate::new("B", 2000, "V1", 1), // starts where A ends
            Candidate::new("C", 500, "V1", 1),  // ends where A starts
        ]);
        let r = GreedyResolver::new().resolve(&meetings, &cands, &venues(&["V1"]));
        assert_eq!(r.committed_count(), 3);
    }

    #[test]
    fn test_falls_back_to_lower_ranked_candidate() {
        let meetings = vec![meeting("A", 3000), meeting("B", 1000)];
        let cands = CandidateSet::from_candidates(vec![
            Candidate::new("A", 0, "V1", 9),
            Candidate::new("B", 1000, "V1", 5), // inside A
            Candidate::new("B", 1000, "V2", 4), // other venue, same time
        ]);
        let r = GreedyResolver::new().resolve(&meetings, &cands, &venues(&["V1", "V2"]));

        match r.outcome_for("B").unwrap() {
            Outcome::Committed { commitment, rank } => {
                assert_eq!(commitment.venue_id, "V2");
                assert_eq!(commitment.support, 4);
                assert_eq!(*rank, 1);
            }
            other => panic!("expected commitment, got {other:?}"),
        }
    }

    #[test]
    fn test_empty_candidates_unresolved_without_mutation() {
        let meetings = vec![meeting("A", 1000)];
        let r = GreedyResolver::new().resolve(&meetings, &CandidateSet::new(), &venues(&["V1"]));
        assert_eq!(r.outcome_for("A"), Some(&Outcome::Unresolved));
        assert!(r.ledger().is_empty());
    }

    #[test]
    fn test_invalid_meeting_does_not_stop_run() {
        let meetings = vec![Meeting::new("bad"), meeting("ok", 1000), meeting("zero", 0)];
        let cands = CandidateSet::from_candidates(vec![
            Candidate::new("bad", 0, "V1", 1),
            Candidate::new("ok", 0, "V1", 1),
            Candidate::new("zero", 5000, "V1", 1),
        ]);
        let r = GreedyResolver::new().resolve(&meetings, &cands, &venues(&["V1"]));

        assert!(r.commitment_for("ok").is_some());
        let kinds: Vec<_> = r.errors().iter().map(|e| e.kind).collect();
        assert_eq!(
            kinds,
            vec![
                ValidationErrorKind::MissingDuration,
                ValidationErrorKind::NonPositiveDuration
            ]
        );
        assert_eq!(r.ledger().len(), 1);
    }

    #[test]
    fn test_unknown_venue_rejects_whole_meeting() {
        // The valid top candidate is not used: the meeting aborts.
        let meetings = vec![meeting("A", 1000)];
        let cands = CandidateSet::from_candidates(vec![
            Candidate::new("A", 0, "V1", 5),
            Candidate::new("A", 0, "V9", 1),
        ]);
        let r = GreedyResolver::new().resolve(&meetings, &cands, &venues(&["V1"]));
        match r.outcome_for("A").unwrap() {
            Outcome::Invalid(e) => {
                assert_eq!(e.kind, ValidationErrorKind::UnknownVenue);
                assert_eq!(e.entity_id, "V9");
            }
            other => panic!("expected invalid, got {other:?}"),
        }
        assert!(r.ledger().is_empty());
    }

    #[test]
    fn test_duplicate_meeting_id_rejected() {
        let meetings = vec![meeting("A", 1000), meeting("A", 1000)];
        let cands = CandidateSet::from_candidates(vec![
            Candidate::new("A", 0, "V1", 1),
            Candidate::new("A", 5000, "V1", 1),
        ]);
        let r = GreedyResolver::new().resolve(&meetings, &cands, &venues(&["V1"]));
        assert_eq!(r.meeting_count(), 2);
        assert_eq!(r.committed_count(), 1);
        assert_eq!(r.errors()[0].kind, ValidationErrorKind::DuplicateId);
    }

    #[test]
    fn test_prior_commitments_block_slots() {
        let meetings = vec![meeting("B", 1000)];
        let cands = CandidateSet::from_candidates(vec![
            Candidate::new("B", 0, "V1", 3),
            Candidate::new("B", 1000, "V1", 1),
        ]);
        let request = ResolveRequest::new(meetings, cands, venues(&["V1"]))
            .with_prior_commitments(vec![Commitment::new("A", "V1", 0, 1000)]);
        let r = GreedyResolver::new().resolve_request(&request);

        assert_eq!(r.commitment_for("B").unwrap().start_ms, 1000);
        assert_eq!(r.ledger().len(), 2);
        // Priors for meetings outside this run are not part of its decisions.
        assert_eq!(r.decisions().len(), 1);
    }

    #[test]
    fn test_prior_decided_meeting_not_redecided() {
        let meetings = vec![meeting("A", 1000), meeting("B", 1000)];
        let cands = CandidateSet::from_candidates(vec![
            Candidate::new("A", 0, "V1", 3),
            Candidate::new("A", 5000, "V1", 1),
            Candidate::new("B", 0, "V1", 2),
            Candidate::new("B", 2000, "V1", 1),
        ]);
        let prior = Commitment::new("A", "V1", 0, 1000);
        let r = GreedyResolver::new()
            .with_prior_commitments(vec![prior.clone()])
            .resolve(&meetings, &cands, &venues(&["V1"]));

        assert_eq!(r.outcome_for("A"), Some(&Outcome::AlreadyDecided(prior)));
        assert_eq!(r.commitment_for("B").unwrap().start_ms, 2000);
        assert_eq!(r.ledger().len(), 2);
        assert_eq!(r.committed_count(), 1);
        let ids: Vec<String> = r.decisions().into_iter().map(|d| d.meeting_id).collect();
        assert_eq!(ids, vec!["A", "B"]);
    }

    #[test]
    fn test_rejected_prior_does_not_mark_meeting_decided() {
        let meetings = vec![meeting("B", 1000)];
        let cands = CandidateSet::from_candidates(vec![Candidate::new("B", 5000, "V1", 1)]);
        let r = GreedyResolver::new()
            .with_prior_commitments(vec![
                Commitment::new("A", "V1", 0, 1000),
                Commitment::new("B", "V1", 500, 1500), // overlaps A, dropped
            ])
            .resolve(&meetings, &cands, &venues(&["V1"]));
        assert_eq!(r.commitment_for("B").unwrap().start_ms, 5000);
    }

    #[test]
    fn test_duration_overflow_invalid_without_stopping_run() {
        let meetings = vec![meeting("huge", i64::MAX), meeting("ok", 1000)];
        let cands = CandidateSet::from_candidates(vec![
            Candidate::new("huge", 1_700_000_000_000, "V1", 1),
            Candidate::new("ok", 1_700_000_000_000, "V1", 1),
        ]);
        let r = GreedyResolver::new().resolve(&meetings, &cands, &venues(&["V1"]));

        match r.outcome_for("huge").unwrap() {
            Outcome::Invalid(e) => assert_eq!(e.kind, ValidationErrorKind::DurationOverflow),
            other => panic!("expected invalid, got {other:?}"),
        }
        assert!(r.commitment_for("ok").is_some());
        assert_eq!(r.ledger().len(), 1);
    }

    #[test]
    fn test_resolve_meeting_skips_overflowing_candidate() {
        let mut ledger = VenueLedger::new();
        let m = meeting("A", i64::MAX);
        let ranked = vec![
            Candidate::new("A", 1_700_000_000_000, "V1", 2),
            Candidate::new("A", 0, "V1", 1),
        ];
        match resolve_meeting(&mut ledger, &m, &ranked) {
            Outcome::Committed { commitment, rank } => {
                assert_eq!(rank, 1);
                assert_eq!(commitment.end_ms, i64::MAX);
            }
            other => panic!("expected commitment, got {other:?}"),
        }

        let mut empty = VenueLedger::new();
        assert_eq!(
            resolve_meeting(&mut empty, &m, &ranked[..1]),
            Outcome::Unresolved
        );
        assert!(empty.is_empty());
    }

    #[test]
    fn test_decisions_in_processing_order() {
        let meetings = vec![meeting("Z", 1000), meeting("A", 1000)];
        let cands = CandidateSet::from_candidates(vec![
            Candidate::new("A", 0, "V1", 1),
            Candidate::new("Z", 0, "V2", 1),
        ]);
        let r = GreedyResolver::new().resolve(&meetings, &cands, &venues(&["V1", "V2"]));
        let ids: Vec<String> = r.decisions().into_iter().map(|d| d.meeting_id).collect();
        assert_eq!(ids, vec!["Z", "A"]);
    }

    #[test]
    fn test_resolve_meeting_direct() {
        let mut ledger = VenueLedger::new();
        let m = meeting("A", 100);
        let ranked = vec![Candidate::new("A", 0, "V1", 1)];
        assert!(matches!(
            resolve_meeting(&mut ledger, &m, &ranked),
            Outcome::Committed { rank: 0, .. }
        ));
        assert_eq!(resolve_meeting(&mut ledger, &m, &ranked), Outcome::Unresolved);
        assert_eq!(ledger.len(), 1);
    }
}
