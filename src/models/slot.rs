//! Time slot model.
//!
//! A slot is a concrete, non-overlapping time window on a given day,
//! derived from observed session times — the engine never invents an
//! arbitrary slot grid. Slots are created fresh per day by the slot
//! builder, never mutated, and discarded after the day's scheduling
//! completes.

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

/// A bookable time window on a conference day.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TimeSlot {
    /// Slot identifier, unique within its day (`slot_1`, `slot_2`, ...).
    pub id: String,
    /// The day this slot belongs to.
    pub date: NaiveDate,
    /// Slot start time.
    pub start: NaiveTime,
    /// Slot end time.
    pub end: NaiveTime,
    /// Travel/transition buffer before the slot (minutes).
    pub buffer_before: i64,
    /// Travel/transition buffer after the slot (minutes).
    pub buffer_after: i64,
}

impl TimeSlot {
    /// Creates a slot.
    pub fn new(
        id: impl Into<String>,
        date: NaiveDate,
        start: NaiveTime,
        end: NaiveTime,
        buffer_minutes: i64,
    ) -> Self {
        Self {
            id: id.into(),
            date,
            start,
            end,
            buffer_before: buffer_minutes,
            buffer_after: buffer_minutes,
        }
    }

    /// Slot duration in minutes.
    #[inline]
    pub fn duration_minutes(&self) -> i64 {
        (self.end - self.start).num_minutes()
    }

    /// Whether another time range overlaps this slot.
    ///
    /// Touching endpoints do not overlap.
    pub fn overlaps(&self, start: NaiveTime, end: NaiveTime) -> bool {
        self.start < end && start < self.end
    }

    /// Whether a session's times exactly match this slot's bounds.
    pub fn matches_exactly(&self, start: NaiveTime, end: NaiveTime) -> bool {
        self.start == start && self.end == end
    }
}
