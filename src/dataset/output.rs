//! Final-decision table I/O.
//!
//! One row per committed meeting: `meet_id,final_place_id,final_time`.
//! Unresolved and invalid meetings are not written.

use std::collections::HashMap;
use std::path::Path;
use tracing::{info, warn};

use super::tables::{read_table, DecisionRow};
use super::time::{format_timestamp, parse_timestamp};
use crate::error::{Error, Result};
use crate::models::{Commitment, FinalDecision, Meeting};

impl From<&FinalDecision> for DecisionRow {
    fn from(d: &FinalDecision) -> Self {
        Self {
            meet_id: d.meeting_id.clone(),
            final_place_id: d.final_venue_id.clone(),
            final_time: format_timestamp(d.final_time_ms),
        }
    }
}

/// Writes decisions, in the given order, with a header row.
pub fn write_decisions(path: &Path, decisions: &[FinalDecision]) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| Error::io(parent, e))?;
    }
    let mut writer = csv::Writer::from_path(path).map_err(|e| Error::csv(path, e))?;
    // An empty run still gets a header.
    if decisions.is_empty() {
        writer
            .write_record(["meet_id", "final_place_id", "final_time"])
            .map_err(|e| Error::csv(path, e))?;
    }
    for d in decisions {
        writer
            .serialize(DecisionRow::from(d))
            .map_err(|e| Error::csv(path, e))?;
    }
    writer.flush().map_err(|e| Error::io(path, e))?;
    info!(path = %path.display(), rows = decisions.len(), "decisions written");
    Ok(())
}

/// Reads a decision table back.
pub fn read_decisions(path: &Path) -> Result<Vec<FinalDecision>> {
    read_table::<DecisionRow>(path)?
        .into_iter()
        .map(|row| {
            let final_time_ms =
                parse_timestamp(&row.final_time).ok_or_else(|| Error::Timestamp {
                    table: "final decision",
                    value: row.final_time.clone(),
                })?;
            Ok(FinalDecision {
                meeting_id: row.meet_id,
                final_venue_id: row.final_place_id,
                final_time_ms,
            })
        })
        .collect()
}

/// Turns earlier decisions into commitments using the meetings' durations.
///
/// Decisions for unknown meetings, meetings without a positive duration, or
/// whose end time overflows cannot be given an interval and are skipped
/// with a warning.
pub fn prior_commitments(decisions: &[FinalDecision], meetings: &[Meeting]) -> Vec<Commitment> {
    let by_id: HashMap<&str, &Meeting> = meetings
        .iter()
        .filter(|m| m.duration_ms.is_some_and(|d| d > 0))
        .map(|m| (m.id.as_str(), m))
        .collect();

    decisions
        .iter()
        .filter_map(|d| {
            let interval = by_id
                .get(d.meeting_id.as_str())
                .and_then(|m| m.interval_from(d.final_time_ms));
            match interval {
                Some((start_ms, end_ms)) => Some(Commitment::new(
                    &d.meeting_id,
                    &d.final_venue_id,
                    start_ms,
                    end_ms,
                )),
                None => {
                    warn!(meeting_id = %d.meeting_id, "skipping prior decision without a usable interval");
                    None
                }
            }
        })
        .collect()
}
