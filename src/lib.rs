//! Final time and venue decisions for meetings.
//!
//! Given, per meeting, candidate (time, venue) pairs ranked by how many
//! participants are jointly available for them, picks the best candidate
//! that does not collide with a meeting already placed at the same venue.
//!
//! # Modules
//!
//! - **`models`**: Domain types: `Meeting`, `Venue`, `Candidate`,
//!   `CandidateSet`, `Commitment`, `FinalDecision`
//! - **`resolver`**: `GreedyResolver`, `VenueLedger`, `ResolutionSummary`
//! - **`validation`**: Input integrity checks (durations, venue refs, duplicate IDs)
//! - **`dataset`**: CSV tables in, ranked candidates out, decisions written back
//! - **`sampling`**: Seeded random skipping of meetings
//! - **`config`**: Run configuration (TOML)
//!
//! # Determinism
//!
//! Resolution has no randomness. The same meetings, in the same order, with
//! the same candidates, always yield the same decisions. The only random
//! step, sampling, takes its RNG from the caller.

pub mod config;
pub mod dataset;
pub mod error;
pub mod models;
pub mod resolver;
pub mod sampling;
pub mod validation;

pub use error::{Error, Result};
