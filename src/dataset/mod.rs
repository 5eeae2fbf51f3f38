//! Delimited-table input and output.
//!
//! The resolver works on in-memory types; this module is the bridge to the
//! CSV tables produced by the dataset generators. See [`join`] for how
//! availability rows become ranked candidates.

pub mod join;
mod output;
mod tables;
mod time;

pub use join::{Dataset, JoinStats};
pub use output::{prior_commitments, read_decisions, write_decisions};
pub use tables::{
    read_table, AvailabilityLocationRow, AvailabilityRow, DecisionRow, LocationOptionRow,
    MeetingRow, VenueRow,
};
pub use time::{format_timestamp, parse_timestamp};
