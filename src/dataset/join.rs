//! Loading the input tables and deriving ranked candidates.
//!
//! # Join
//!
//! availability -> availability_location -> location_option -> location,
//! all inner joins. Each surviving row is one observation: participant
//! `usr_id` of meeting `meet_id` is available at `time_segment` and would
//! meet at `location_id`. Observations are tallied into candidates, walking
//! availability rows in file order and, within one availability, its links
//! in file order. That order is the tie-break of the ranking.
//!
//! Rows whose references do not resolve are dropped and counted in
//! [`JoinStats`].

use serde::Serialize;
use std::collections::{HashMap, HashSet};
use tracing::{info, warn};

use super::tables::{
    read_table, AvailabilityLocationRow, AvailabilityRow, LocationOptionRow, MeetingRow, VenueRow,
};
use super::time::parse_timestamp;
use crate::config::RunConfig;
use crate::error::{Error, Result};
use crate::models::{CandidateSet, Meeting, SupportTally, Venue};

/// Counters describing how the join went.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct JoinStats {
    /// Observations fed into the tally.
    pub observations: usize,
    /// Links whose availability ID is unknown.
    pub dangling_links: usize,
    /// Links whose location option ID is unknown.
    pub unknown_options: usize,
    /// Location options pointing at an unknown venue (counted per link).
    pub unknown_venues: usize,
    /// Availability rows with no link at all.
    pub unlinked_availability: usize,
}

impl JoinStats {
    /// Total number of dropped rows.
    pub fn dropped(&self) -> usize {
        self.dangling_links + self.unknown_options + self.unknown_venues
    }
}

/// All input tables of one run, fully materialized.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    pub meetings: Vec<Meeting>,
    pub venues: Vec<Venue>,
    pub availability: Vec<AvailabilityRow>,
    pub location_options: Vec<LocationOptionRow>,
    pub availability_locations: Vec<AvailabilityLocationRow>,
}

impl Dataset {
    /// Reads every table named by `config`.
    pub fn load(config: &RunConfig) -> Result<Self> {
        let tables = &config.tables;
        let meetings = read_table::<MeetingRow>(&config.table_path(&tables.meetings))?
            .into_iter()
            .map(MeetingRow::into_meeting)
            .collect::<Vec<_>>();
        let venues = read_table::<VenueRow>(&config.table_path(&tables.venues))?
            .into_iter()
            .map(VenueRow::into_venue)
            .collect::<Vec<_>>();
        let availability = read_table(&config.table_path(&tables.availability))?;
        let location_options = read_table(&config.table_path(&tables.location_options))?;
        let availability_locations =
            read_table(&config.table_path(&tables.availability_locations))?;

        let dataset = Self {
            meetings,
            venues,
            availability,
            location_options,
            availability_locations,
        };
        info!(
            dir = %config.dataset_dir.display(),
            meetings = dataset.meetings.len(),
            venues = dataset.venues.len(),
            availability = dataset.availability.len(),
            location_options = dataset.location_options.len(),
            links = dataset.availability_locations.len(),
            "dataset loaded"
        );
        Ok(dataset)
    }

    /// Joins the availability tables into ranked candidates.
    ///
    /// Fails only on an unparseable timestamp; unresolved references are
    /// dropped and counted.
    pub fn candidates(&self) -> Result<(CandidateSet, JoinStats)> {
        let mut stats = JoinStats::default();

        let venue_ids: HashSet<&str> = self.venues.iter().map(|v| v.id.as_str()).collect();

        // A missing option ID falls back to the 1-based row number.
        let option_venue: HashMap<String, &str> = self
            .location_options
            .iter()
            .enumerate()
            .map(|(i, o)| {
                let id = o.id.clone().unwrap_or_else(|| (i + 1).to_string());
                (id, o.location_id.as_str())
            })
            .collect();

        let availability_ids: HashSet<&str> =
            self.availability.iter().map(|a| a.id.as_str()).collect();
        let mut links: HashMap<&str, Vec<&str>> = HashMap::new();
        for link in &self.availability_locations {
            if availability_ids.contains(link.availability_id.as_str()) {
                links
                    .entry(link.availability_id.as_str())
                    .or_default()
                    .push(link.location_option_id.as_str());
            } else {
                stats.dangling_links += 1;
            }
        }

        let mut tally = SupportTally::new();
        for avail in &self.availability {
            let Some(option_ids) = links.get(avail.id.as_str()) else {
                stats.unlinked_availability += 1;
                continue;
            };
            let time_ms = parse_timestamp(&avail.time_segment).ok_or_else(|| Error::Timestamp {
                table: "availability",
                value: avail.time_segment.clone(),
            })?;

            for option_id in option_ids {
                match option_venue.get(*option_id) {
                    None => stats.unknown_options += 1,
                    Some(venue_id) if !venue_ids.contains(venue_id) => stats.unknown_venues += 1,
                    Some(venue_id) => {
                        tally.observe(&avail.meet_id, &avail.usr_id, time_ms, venue_id);
                        stats.observations += 1;
                    }
                }
            }
        }

        if stats.dropped() > 0 {
            warn!(
                dangling_links = stats.dangling_links,
                unknown_options = stats.unknown_options,
                unknown_venues = stats.unknown_venues,
                "dropped availability links with unresolved references"
            );
        }

        let candidates = tally.into_candidates();
        info!(
            observations = stats.observations,
            meetings = candidates.len(),
            candidates = candidates.candidate_count(),
            "candidates derived"
        );
        Ok((candidates, stats))
    }
}
