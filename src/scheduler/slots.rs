//! Time slot derivation.
//!
//! Derives a day's bookable slots from the time ranges actually present
//! in the candidate sessions: one slot per distinct, non-conflicting time
//! range observed. Ranges overlapping the lunch window are skipped, as
//! are ranges overlapping an already-accepted slot, and the result is
//! truncated to the configured per-day maximum.

use chrono::{NaiveDate, NaiveTime};

use crate::config::EngineConfig;
use crate::models::{ScoredSession, TimeSlot};

/// Builds per-day slots from observed session times.
#[derive(Debug, Clone)]
pub struct SlotBuilder<'a> {
    config: &'a EngineConfig,
}

impl<'a> SlotBuilder<'a> {
    /// Creates a builder over the engine configuration.
    pub fn new(config: &'a EngineConfig) -> Self {
        Self { config }
    }

    /// Derives the slots for one day.
    ///
    /// Sessions missing either endpoint contribute nothing; a day with no
    /// timed sessions yields an empty list, which downstream components
    /// treat as an all-empty day rather than an error.
    pub fn build_slots(&self, sessions: &[ScoredSession], date: NaiveDate) -> Vec<TimeSlot> {
        let mut ranges: Vec<(NaiveTime, NaiveTime)> = sessions
            .iter()
            .filter_map(|s| s.session.time_range())
            .collect();
        ranges.sort();

        let mut slots: Vec<TimeSlot> = Vec::new();
        for (start, end) in ranges {
            if self.config.lunch.overlaps(start, end) {
                continue;
            }
            if slots.iter().any(|slot| slot.overlaps(start, end)) {
                continue;
            }
            slots.push(TimeSlot::new(
                format!("slot_{}", slots.len() + 1),
                date,
                start,
                end,
                self.config.buffer_minutes,
            ));
        }

        slots.truncate(self.config.max_sessions_per_day);
        slots
    }
}
