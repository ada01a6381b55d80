//! Scheduling domain models.
//!
//! Core data types for the itinerary pipeline, ordered by lifecycle:
//! an immutable [`Session`] enters, gets wrapped as a [`ScoredSession`],
//! competes for a [`TimeSlot`], and ends up as a [`ScheduledSession`] or
//! a [`BackupCandidate`] inside the final [`Schedule`].
//!
//! Sessions are never mutated in place; each pipeline stage produces a
//! new annotated wrapper value.

mod schedule;
mod session;
mod slot;

pub use schedule::{
    BackupCandidate, BackupPool, DailySchedule, DailyStats, Schedule, ScheduledSession, Summary,
    TimeBlock, TransitionReport, VenueTransition,
};
pub use session::{ScoreBreakdown, ScoredSession, Session};
pub use slot::TimeSlot;
