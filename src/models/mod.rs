//! Meeting-decision domain models.
//!
//! Provides the data types the resolver consumes and produces.
//!
//! # Domain Mappings
//!
//! | meet-decision | Generic scheduling |
//! |---------------|--------------------|
//! | Meeting | Job (single operation) |
//! | Venue | Unary resource |
//! | Candidate | Ranked start/resource option |
//! | Commitment | Assignment |

mod candidate;
mod commitment;
mod interval;
mod meeting;
mod venue;

pub use candidate::{Candidate, CandidateSet, SupportTally};
pub use commitment::{Commitment, FinalDecision};
pub use interval::Interval;
pub use meeting::{parse_duration_text, Meeting};
pub use venue::Venue;
