//! Candidate (time, venue) proposals and their ranking.
//!
//! A candidate is one combination of start time and venue that some
//! participants of a meeting are jointly available for. Its `support` is
//! the number of distinct participants backing it.
//!
//! # Ranking
//! Candidates of a meeting are ordered by support, descending. The sort is
//! stable, so equal support keeps insertion (first-seen) order. Given the
//! same input order, the ranking is always the same.

use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

/// A ranked (time, venue) proposal for a meeting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Candidate {
    /// Meeting this candidate belongs to.
    pub meeting_id: String,
    /// Proposed start (ms).
    pub time_ms: i64,
    /// Proposed venue.
    pub venue_id: String,
    /// Number of participants available for this combination.
    pub support: u32,
}

impl Candidate {
    /// Creates a new candidate.
    pub fn new(
        meeting_id: impl Into<String>,
        time_ms: i64,
        venue_id: impl Into<String>,
        support: u32,
    ) -> Self {
        Self {
            meeting_id: meeting_id.into(),
            time_ms,
            venue_id: venue_id.into(),
            support,
        }
    }
}

/// Ranked candidate lists keyed by meeting ID.
#[derive(Debug, Clone, Default)]
pub struct CandidateSet {
    by_meeting: HashMap<String, Vec<Candidate>>,
}

impl CandidateSet {
    /// Creates an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a set from candidates in insertion order.
    pub fn from_candidates(candidates: impl IntoIterator<Item = Candidate>) -> Self {
        let mut set = Self::new();
        for c in candidates {
            set.by_meeting
                .entry(c.meeting_id.clone())
                .or_default()
                .push(c);
        }
        for list in set.by_meeting.values_mut() {
            rank(list);
        }
        set
    }

    /// Adds a candidate, keeping the meeting's list ranked.
    pub fn insert(&mut self, candidate: Candidate) {
        let list = self
            .by_meeting
            .entry(candidate.meeting_id.clone())
            .or_default();
        list.push(candidate);
        rank(list);
    }

    /// Files a candidate under an explicit meeting key, even if the
    /// candidate's own `meeting_id` disagrees. Validation reports the
    /// mismatch; the set does not repair it.
    pub fn insert_under(&mut self, meeting_id: impl Into<String>, candidate: Candidate) {
        let list = self.by_meeting.entry(meeting_id.into()).or_default();
        list.push(candidate);
        rank(list);
    }

    /// Ranked candidates for a meeting (empty if none).
    pub fn get(&self, meeting_id: &str) -> &[Candidate] {
        self.by_meeting
            .get(meeting_id)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Meeting IDs that have at least one candidate, sorted.
    pub fn meeting_ids(&self) -> Vec<&str> {
        let mut ids: Vec<&str> = self.by_meeting.keys().map(String::as_str).collect();
        ids.sort_unstable();
        ids
    }

    /// Number of meetings with candidates.
    pub fn len(&self) -> usize {
        self.by_meeting.len()
    }

    /// Whether no meeting has candidates.
    pub fn is_empty(&self) -> bool {
        self.by_meeting.is_empty()
    }

    /// Total number of candidates across all meetings.
    pub fn candidate_count(&self) -> usize {
        self.by_meeting.values().map(Vec::len).sum()
    }
}

/// Stable sort by support, descending.
fn rank(list: &mut [Candidate]) {
    list.sort_by(|a, b| b.support.cmp(&a.support));
}

/// Counts distinct supporters per (time, venue) combination.
///
/// Each observation says "participant P of meeting M is available at T and
/// would accept venue V". The same participant seen twice for one
/// combination counts once.
#[derive(Debug, Default)]
pub struct SupportTally {
    meetings: HashMap<String, MeetingTally>,
    meeting_order: Vec<String>,
}

#[derive(Debug, Default)]
struct MeetingTally {
    order: Vec<(i64, String)>,
    supporters: HashMap<(i64, String), HashSet<String>>,
}

impl SupportTally {
    /// Creates an empty tally.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records one availability observation.
    pub fn observe(&mut self, meeting_id: &str, participant_id: &str, time_ms: i64, venue_id: &str) {
        if !self.meetings.contains_key(meeting_id) {
            self.meeting_order.push(meeting_id.to_string());
        }
        let MeetingTally { order, supporters } =
            self.meetings.entry(meeting_id.to_string()).or_default();
        let key = (time_ms, venue_id.to_string());
        supporters
            .entry(key.clone())
            .or_insert_with(|| {
                order.push(key);
                HashSet::new()
            })
            .insert(participant_id.to_string());
    }

    /// Number of observed (meeting, time, venue) combinations.
    pub fn combination_count(&self) -> usize {
        self.meetings.values().map(|t| t.order.len()).sum()
    }

    /// Converts the tally into ranked candidates.
    ///
    /// Combinations are inserted in first-seen order, so ties in support
    /// are broken by which combination was observed first.
    pub fn into_candidates(self) -> CandidateSet {
        let mut meetings = self.meetings;
        let candidates = self.meeting_order.into_iter().flat_map(|meeting_id| {
            let tally = meetings.remove(&meeting_id).unwrap_or_default();
            let MeetingTally {
                order,
                mut supporters,
            } = tally;
            order
                .into_iter()
                .map(|key| {
                    let support = supporters.remove(&key).map_or(0, |s| s.len() as u32);
                    Candidate::new(meeting_id.clone(), key.0, key.1, support)
                })
                .collect::<Vec<_>>()
        });
        CandidateSet::from_candidates(candidates)
    }
}
