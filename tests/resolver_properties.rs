//! Property tests for the greedy resolver.

use std::collections::HashMap;

use meet_decision::models::{Candidate, CandidateSet, Commitment, Meeting, Venue};
use meet_decision::resolver::{GreedyResolver, Outcome};
use proptest::prelude::*;

const VENUES: [&str; 3] = ["V1", "V2", "V3"];

fn venues() -> Vec<Venue> {
    VENUES.iter().map(|v| Venue::new(*v)).collect()
}

/// Meetings with durations of 1..=8 slots and up to 5 candidates each,
/// on a 15-minute grid over one day.
fn problem() -> impl Strategy<Value = (Vec<Meeting>, CandidateSet)> {
    let meeting = (1i64..=8, prop::collection::vec((0i64..96, 0usize..3, 0u32..6), 0..5));
    prop::collection::vec(meeting, 0..25).prop_map(|specs| {
        let mut meetings = Vec::new();
        let mut candidates = Vec::new();
        for (i, (slots, cands)) in specs.into_iter().enumerate() {
            let id = format!("M{i}");
            meetings.push(Meeting::new(&id).with_duration_minutes(slots * 15));
            for (slot, venue, support) in cands {
                candidates.push(Candidate::new(&id, slot * 15 * 60_000, VENUES[venue], support));
            }
        }
        (meetings, CandidateSet::from_candidates(candidates))
    })
}

proptest! {
    #[test]
    fn committed_intervals_never_overlap_per_venue((meetings, candidates) in problem()) {
        let resolution = GreedyResolver::new().resolve(&meetings, &candidates, &venues());

        let mut by_venue: HashMap<&str, Vec<&Commitment>> = HashMap::new();
        for c in resolution.commitments() {
            by_venue.entry(c.venue_id.as_str()).or_default().push(c);
        }
        for list in by_venue.values() {
            for (i, a) in list.iter().enumerate() {
                for b in &list[i + 1..] {
                    prop_assert!(
                        a.end_ms <= b.start_ms || a.start_ms >= b.end_ms,
                        "{a:?} overlaps {b:?}"
                    );
                }
            }
        }
    }

    #[test]
    fn resolving_twice_gives_identical_output((meetings, candidates) in problem()) {
        let resolver = GreedyResolver::new();
        let first = resolver.resolve(&meetings, &candidates, &venues());
        let second = resolver.resolve(&meetings, &candidates, &venues());
        prop_assert_eq!(first.outcomes(), second.outcomes());
        prop_assert_eq!(first.decisions(), second.decisions());
    }

    #[test]
    fn every_meeting_gets_exactly_one_outcome((meetings, candidates) in problem()) {
        let resolution = GreedyResolver::new().resolve(&meetings, &candidates, &venues());
        prop_assert_eq!(resolution.meeting_count(), meetings.len());
        for (m, o) in meetings.iter().zip(resolution.outcomes()) {
            prop_assert_eq!(&m.id, &o.meeting_id);
        }
    }

    #[test]
    fn accepted_candidate_is_best_free_one((meetings, candidates) in problem()) {
        // Every candidate ranked above the accepted one must have been
        // blocked by a commitment made earlier in the run.
        let resolution = GreedyResolver::new().resolve(&meetings, &candidates, &venues());
        let mut committed: Vec<Commitment> = Vec::new();
        for (m, o) in meetings.iter().zip(resolution.outcomes()) {
            let duration = m.duration_ms.unwrap();
            let ranked = candidates.get(&m.id);
            let blocked = |c: &Candidate| {
                committed.iter().any(|x| {
                    x.venue_id == c.venue_id && x.overlaps(c.time_ms, c.time_ms + duration)
                })
            };
            match &o.outcome {
                Outcome::Committed { commitment, rank } => {
                    prop_assert!(ranked[..*rank].iter().all(|c| blocked(c)));
                    prop_assert!(!blocked(&ranked[*rank]));
                    committed.push(commitment.clone());
                }
                Outcome::Unresolved => prop_assert!(ranked.iter().all(|c| blocked(c))),
                Outcome::Invalid(e) => prop_assert!(false, "unexpected invalid: {e}"),
                Outcome::AlreadyDecided(c) => prop_assert!(false, "no priors given: {c:?}"),
            }
        }
    }
}

#[test]
fn single_candidate_always_accepted_on_empty_ledger() {
    for venue in VENUES {
        let meetings = vec![Meeting::new("A").with_duration_minutes(45)];
        let candidates = CandidateSet::from_candidates(vec![Candidate::new("A", 0, venue, 1)]);
        let r = GreedyResolver::new().resolve(&meetings, &candidates, &venues());
        assert_eq!(r.commitment_for("A").unwrap().venue_id, venue);
    }
}
