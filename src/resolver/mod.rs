//! Greedy final-decision resolver and run metrics.
//!
//! # Algorithm
//!
//! `GreedyResolver` walks meetings in a fixed order and gives each one the
//! best-supported (time, venue) candidate that does not overlap anything
//! already committed at that venue. It is a baseline heuristic: no
//! optimality guarantee, no backtracking.
//!
//! # Concurrency
//!
//! A run is single-threaded. Every commitment can block later meetings, so
//! meetings sharing a candidate venue must be processed in sequence.
//!
//! # Summary
//!
//! `ResolutionSummary` reports how many meetings were committed, left
//! unresolved, or rejected, and how often the top candidate was lost.

mod greedy;
mod ledger;
mod summary;

pub use greedy::{
    resolve_meeting, GreedyResolver, MeetingOutcome, Outcome, ResolveRequest, Resolution,
};
pub use ledger::VenueLedger;
pub use summary::ResolutionSummary;
