//! Conference itinerary scheduling engine.
//!
//! Turns a pool of time-stamped, venue-tagged session records into a
//! day-by-day itinerary: a buffered, non-overlapping primary schedule
//! plus a ranked pool of backup choices per time slot.
//!
//! # Modules
//!
//! - **`config`**: Immutable engine configuration — score weights, lunch
//!   window, buffers, lookup tables, conference dates
//! - **`models`**: Domain types — `Session`, `ScoredSession`, `TimeSlot`,
//!   `ScheduledSession`, `BackupPool`, `DailySchedule`, `Schedule`
//! - **`scoring`**: Five-component weighted session relevance scoring
//! - **`scheduler`**: Slot derivation, primary assignment, backup
//!   generation, conflict resolution, statistics, and the pipeline entry
//! - **`validation`**: Soft pre-flight input checks
//!
//! # Architecture
//!
//! The engine consumes already-structured, already-filtered session
//! records and produces an in-memory [`models::Schedule`]. Acquisition,
//! field extraction, and rendering are upstream/downstream collaborators,
//! not part of this crate. Assignment is a deliberate greedy heuristic,
//! not an exact solver.
//!
//! # References
//!
//! - Pinedo (2016), "Scheduling: Theory, Algorithms, and Systems"
//! - Brucker (2007), "Scheduling Algorithms"

pub mod config;
pub mod models;
pub mod scheduler;
pub mod scoring;
pub mod validation;
