//! Row types for the input and output tables.
//!
//! Column names follow the snake_case layout; the camelCase spellings of
//! the older layout are accepted as aliases. Columns not listed here are
//! ignored.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{Error, Result};
use crate::models::{parse_duration_text, Meeting, Venue};

/// `meet.csv`
#[derive(Debug, Clone, Deserialize)]
pub struct MeetingRow {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub duration: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default, alias = "holderId")]
    pub holder_id: Option<String>,
}

/// `location.csv`
#[derive(Debug, Clone, Deserialize)]
pub struct VenueRow {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub capacity: Option<String>,
}

/// `availability.csv`: one participant available at one instant.
#[derive(Debug, Clone, Deserialize)]
pub struct AvailabilityRow {
    pub id: String,
    #[serde(alias = "userId", alias = "user_id")]
    pub usr_id: String,
    #[serde(alias = "meetId")]
    pub meet_id: String,
    #[serde(alias = "timestamp")]
    pub time_segment: String,
}

/// `location_option.csv`: a venue proposed for a meeting.
#[derive(Debug, Clone, Deserialize)]
pub struct LocationOptionRow {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(alias = "meetId")]
    pub meet_id: String,
    #[serde(alias = "locationId")]
    pub location_id: String,
}

/// `availability_location.csv`: links an availability to a location option.
#[derive(Debug, Clone, Deserialize)]
pub struct AvailabilityLocationRow {
    #[serde(alias = "availabilityId")]
    pub availability_id: String,
    #[serde(alias = "locationOptionId")]
    pub location_option_id: String,
}

/// `final_decision.csv`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecisionRow {
    #[serde(alias = "meetId")]
    pub meet_id: String,
    #[serde(alias = "finalPlaceId")]
    pub final_place_id: String,
    #[serde(alias = "finalTime")]
    pub final_time: String,
}

impl MeetingRow {
    /// Converts to a domain meeting.
    ///
    /// An empty or unreadable duration becomes `None`; validation rejects
    /// the meeting later without failing the whole table.
    pub fn into_meeting(self) -> Meeting {
        let mut meeting = Meeting::new(self.id);
        meeting.duration_ms = self.duration.as_deref().and_then(parse_duration_text);
        if let Some(name) = self.name {
            meeting.name = name;
        }
        if let Some(status) = self.status {
            meeting = meeting.with_attribute("status", status);
        }
        if let Some(holder) = self.holder_id {
            meeting = meeting.with_attribute("holder_id", holder);
        }
        meeting
    }
}

impl VenueRow {
    /// Converts to a domain venue. A non-numeric capacity is dropped.
    pub fn into_venue(self) -> Venue {
        let mut venue = Venue::new(self.id);
        venue.name = self.name.unwrap_or_default();
        venue.address = self.address.unwrap_or_default();
        venue.capacity = self.capacity.and_then(|c| c.trim().parse().ok());
        venue
    }
}

/// Reads every row of a headed CSV table.
pub fn read_table<T>(path: &Path) -> Result<Vec<T>>
where
    T: for<'de> Deserialize<'de>,
{
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_path(path)
        .map_err(|e| Error::csv(path, e))?;

    reader
        .deserialize()
        .collect::<std::result::Result<Vec<T>, _>>()
        .map_err(|e| Error::csv(path, e))
}
