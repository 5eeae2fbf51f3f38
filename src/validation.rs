//! Input validation for meeting decisions.
//!
//! Checks the structural integrity of meetings, venues, and candidates
//! before (or during) resolution. Detects:
//! - Missing or non-positive durations
//! - Candidates whose end time does not fit in an `i64`
//! - Candidates that point at unknown venues
//! - Candidates filed under the wrong meeting, or under no known meeting
//! - Duplicate IDs
//!
//! Two entry points: [`validate_input`] collects every problem in a batch
//! for reporting, [`validate_meeting`] stops at the first problem of one
//! meeting and is what the resolver uses to reject a single meeting
//! without aborting the run.

use crate::models::{Candidate, CandidateSet, Meeting, Venue};
use std::collections::HashSet;
use thiserror::Error;

/// Validation result.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// A validation error.
#[derive(Error, Debug, Clone, PartialEq, Eq, serde::Serialize)]
#[error("{message}")]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Offending meeting or venue ID.
    pub entity_id: String,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize)]
pub enum ValidationErrorKind {
    /// Meeting has no duration.
    MissingDuration,
    /// Meeting duration is zero or negative.
    NonPositiveDuration,
    /// A candidate's start plus the meeting duration overflows.
    DurationOverflow,
    /// A candidate references a venue that doesn't exist.
    UnknownVenue,
    /// Candidates are filed under a meeting that doesn't exist.
    UnknownMeeting,
    /// A candidate carries a different meeting ID than the list it is in.
    CandidateMismatch,
    /// Two entities share the same ID.
    DuplicateId,
}

impl ValidationError {
    fn new(
        kind: ValidationErrorKind,
        entity_id: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            kind,
            entity_id: entity_id.into(),
            message: message.into(),
        }
    }

    /// A meeting ID seen more than once in one run.
    pub fn duplicate_meeting(meeting_id: &str) -> Self {
        Self::new(
            ValidationErrorKind::DuplicateId,
            meeting_id,
            format!("Duplicate meeting ID: {meeting_id}"),
        )
    }
}

/// Validates one meeting and its ranked candidates, failing fast.
///
/// # Returns
/// `Ok(())` if the meeting can be resolved, otherwise the first problem
/// found (duration checks before candidate checks, candidates in rank order).
pub fn validate_meeting(
    meeting: &Meeting,
    candidates: &[Candidate],
    venue_ids: &HashSet<&str>,
) -> Result<(), ValidationError> {
    check_duration(meeting)?;
    for c in candidates {
        check_candidate(meeting, c, venue_ids)?;
    }
    Ok(())
}

/// Validates a whole batch of resolver input.
///
/// Checks:
/// 1. No duplicate venue IDs
/// 2. No duplicate meeting IDs
/// 3. Every meeting has a positive duration
/// 4. Every candidate carries the ID of the meeting it is filed under
/// 5. Every candidate references an existing venue
/// 6. Every candidate's end time is representable
/// 7. No candidates are filed under unknown meetings
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` with all detected issues.
pub fn validate_input(
    meetings: &[Meeting],
    candidates: &CandidateSet,
    venues: &[Venue],
) -> ValidationResult {
    let mut errors = Vec::new();

    // Collect venue IDs
    let mut venue_ids = HashSet::new();
    for v in venues {
        if !venue_ids.insert(v.id.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateId,
                &v.id,
                format!("Duplicate venue ID: {}", v.id),
            ));
        }
    }

    // Collect meeting IDs; check durations and candidates
    let mut meeting_ids = HashSet::new();
    for m in meetings {
        if !meeting_ids.insert(m.id.as_str()) {
            errors.push(ValidationError::duplicate_meeting(&m.id));
            continue;
        }
        if let Err(e) = check_duration(m) {
            errors.push(e);
        }
        for c in candidates.get(&m.id) {
            if let Err(e) = check_candidate(m, c, &venue_ids) {
                errors.push(e);
            }
        }
    }

    // Check for candidates filed under unknown meetings
    for meeting_id in candidates.meeting_ids() {
        if !meeting_ids.contains(meeting_id) {
            errors.push(ValidationError::new(
                ValidationErrorKind::UnknownMeeting,
                meeting_id,
                format!("Candidates filed under unknown meeting '{meeting_id}'"),
            ));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn check_duration(meeting: &Meeting) -> Result<(), ValidationError> {
    match meeting.duration_ms {
        None => Err(ValidationError::new(
            ValidationErrorKind::MissingDuration,
            &meeting.id,
            format!("Meeting '{}' has no duration", meeting.id),
        )),
        Some(d) if d <= 0 => Err(ValidationError::new(
            ValidationErrorKind::NonPositiveDuration,
            &meeting.id,
            format!("Meeting '{}' has non-positive duration {d}ms", meeting.id),
        )),
        Some(_) => Ok(()),
    }
}

fn check_candidate(
    meeting: &Meeting,
    candidate: &Candidate,
    venue_ids: &HashSet<&str>,
) -> Result<(), ValidationError> {
    let meeting_id = meeting.id.as_str();
    if candidate.meeting_id != meeting_id {
        return Err(ValidationError::new(
            ValidationErrorKind::CandidateMismatch,
            meeting_id,
            format!(
                "Meeting '{}' lists a candidate belonging to meeting '{}'",
                meeting_id, candidate.meeting_id
            ),
        ));
    }
    if !venue_ids.contains(candidate.venue_id.as_str()) {
        return Err(ValidationError::new(
            ValidationErrorKind::UnknownVenue,
            &candidate.venue_id,
            format!(
                "Meeting '{}' references unknown venue '{}'",
                meeting_id, candidate.venue_id
            ),
        ));
    }
    if meeting.duration_ms.is_some() && meeting.interval_from(candidate.time_ms).is_none() {
        return Err(ValidationError::new(
            ValidationErrorKind::DurationOverflow,
            meeting_id,
            format!(
                "Meeting '{}' starting at {}ms overflows with its duration",
                meeting_id, candidate.time_ms
            ),
        ));
    }
    Ok(())
}
