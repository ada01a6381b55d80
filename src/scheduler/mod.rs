//! The scheduling pipeline.
//!
//! Per day: slot derivation → greedy primary assignment → backup pool
//! generation → conflict resolution → statistics. [`ItineraryScheduler`]
//! runs the pipeline for every configured conference date and folds the
//! results into a single [`Schedule`](crate::models::Schedule).
//!
//! # Algorithm
//!
//! Assignment is greedy and non-backtracking: each slot takes the best
//! unused exact-time candidate, and conflicting primaries are dropped
//! rather than rescheduled. Fast and predictable, not optimal.
//!
//! # Reference
//!
//! Pinedo (2016), "Scheduling: Theory, Algorithms, and Systems", Ch. 4:
//! Priority Dispatching

mod backup;
mod conflict;
mod engine;
mod primary;
mod slots;
mod stats;

pub use backup::{BackupGenerator, BackupPoolStats};
pub use conflict::{ConflictPolicy, ConflictResolver, OverlapCheck};
pub use engine::ItineraryScheduler;
pub use primary::{AssignStrategy, GreedyAssigner};
pub use slots::SlotBuilder;
