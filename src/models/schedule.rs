//! Schedule (result) models.
//!
//! The hand-off artifact of the engine: per-day primary assignments,
//! backup pools, blocked ranges, venue-transition reports, and
//! statistics, composed into a cross-day [`Schedule`]. All types here are
//! value objects — nothing mutates them after the aggregator returns.

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

use super::{ScoredSession, TimeSlot};

/// A scored session placed in a primary slot.
///
/// Scheduled start/end normally mirror the slot bounds. A session id
/// occupies at most one primary slot per day.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduledSession {
    /// The scored session filling the slot.
    pub scored: ScoredSession,
    /// Identifier of the slot this session fills.
    pub slot_id: String,
    /// Effective scheduled start.
    pub scheduled_start: NaiveTime,
    /// Effective scheduled end.
    pub scheduled_end: NaiveTime,
}

impl ScheduledSession {
    /// Places a scored session into a slot, adopting the slot bounds.
    pub fn in_slot(scored: ScoredSession, slot: &TimeSlot) -> Self {
        Self {
            scored,
            slot_id: slot.id.clone(),
            scheduled_start: slot.start,
            scheduled_end: slot.end,
        }
    }

    /// Shorthand for the session id.
    #[inline]
    pub fn id(&self) -> &str {
        self.scored.id()
    }

    /// The primary relevance score.
    #[inline]
    pub fn score(&self) -> f64 {
        self.scored.score()
    }
}

/// A non-primary session ranked into a slot's backup pool.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackupCandidate {
    /// The scored session.
    pub scored: ScoredSession,
    /// Backup-specific suitability score (distinct from the primary score).
    pub backup_score: f64,
}

/// Per-slot ranked lists of alternative sessions, best first.
///
/// A session may appear in multiple slots' pools, but never in the
/// primary list of the same day.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BackupPool {
    entries: Vec<(String, Vec<BackupCandidate>)>,
}

impl BackupPool {
    /// Creates an empty pool.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records the ranked candidates for a slot. Slots stay in insertion
    /// order, which follows the slot builder's ordering.
    pub fn insert(&mut self, slot_id: impl Into<String>, candidates: Vec<BackupCandidate>) {
        self.entries.push((slot_id.into(), candidates));
    }

    /// The ranked candidates for a slot.
    pub fn for_slot(&self, slot_id: &str) -> Option<&[BackupCandidate]> {
        self.entries
            .iter()
            .find(|(id, _)| id == slot_id)
            .map(|(_, c)| c.as_slice())
    }

    /// Iterates `(slot_id, candidates)` in slot order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[BackupCandidate])> {
        self.entries
            .iter()
            .map(|(id, c)| (id.as_str(), c.as_slice()))
    }

    /// Mutable iteration, used by conflict pruning.
    pub(crate) fn iter_mut(&mut self) -> impl Iterator<Item = (&str, &mut Vec<BackupCandidate>)> {
        self.entries.iter_mut().map(|(id, c)| (id.as_str(), c))
    }

    /// Total candidates across all slots.
    pub fn total_candidates(&self) -> usize {
        self.entries.iter().map(|(_, c)| c.len()).sum()
    }

    /// Number of slots tracked (with or without candidates).
    pub fn slot_count(&self) -> usize {
        self.entries.len()
    }
}

/// A blocked time range on a day (the lunch window).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TimeBlock {
    /// Label, e.g. `"lunch"`.
    pub label: String,
    /// Block start (inclusive).
    pub start: NaiveTime,
    /// Block end (exclusive).
    pub end: NaiveTime,
}

impl TimeBlock {
    /// Creates a labeled block.
    pub fn new(label: impl Into<String>, start: NaiveTime, end: NaiveTime) -> Self {
        Self {
            label: label.into(),
            start,
            end,
        }
    }
}

/// A venue change between two time-adjacent primary sessions.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VenueTransition {
    /// Venue being left.
    pub from_venue: String,
    /// Venue being entered.
    pub to_venue: String,
    /// Title of the session being left.
    pub from_title: String,
    /// Title of the session being entered.
    pub to_title: String,
    /// Minutes between the first session's end and the second's start.
    pub gap_minutes: i64,
}

/// Venue-transition analysis for one day's final primary list.
///
/// Reporting only: the resolver never swaps sessions to reduce
/// transitions, it just surfaces them for downstream recommendation text.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TransitionReport {
    /// Transitions between consecutive primary sessions.
    pub transitions: Vec<VenueTransition>,
    /// Human-readable advice derived from the transitions.
    pub recommendations: Vec<String>,
}

/// Statistics for a single day, projected over the final lists.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DailyStats {
    /// All input sessions for the day, including time-less ones.
    pub total_sessions: usize,
    /// Final primary count.
    pub scheduled_sessions: usize,
    /// Final backup count across all slots.
    pub backup_sessions: usize,
    /// Mean primary score, rounded to 3 decimals. 0.0 when empty.
    pub average_score: f64,
    /// Primary sessions per venue.
    pub venue_distribution: HashMap<String, usize>,
    /// Primary sessions per matched keyword.
    pub keyword_coverage: HashMap<String, usize>,
    /// Slots the assigner could not fill.
    pub unfilled_slots: usize,
    /// Slots whose pool ended below the configured minimum.
    pub under_provisioned_slots: usize,
}

/// One conference day's result: primary list, backups, blocks, statistics.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DailySchedule {
    /// The day.
    pub date: NaiveDate,
    /// Final primary sessions, in scheduled-start order.
    pub primary: Vec<ScheduledSession>,
    /// Final per-slot backup pools.
    pub backups: BackupPool,
    /// Blocked ranges (always contains the lunch block).
    pub blocked: Vec<TimeBlock>,
    /// Venue-transition report for the final primary list.
    pub transitions: TransitionReport,
    /// Per-day statistics.
    pub stats: DailyStats,
}

impl DailySchedule {
    /// An empty day: no primaries or backups, lunch still blocked.
    pub fn empty(date: NaiveDate, lunch: TimeBlock) -> Self {
        Self {
            date,
            primary: Vec::new(),
            backups: BackupPool::new(),
            blocked: vec![lunch],
            transitions: TransitionReport::default(),
            stats: DailyStats::default(),
        }
    }

    /// Finds the primary session in a given slot.
    pub fn primary_in_slot(&self, slot_id: &str) -> Option<&ScheduledSession> {
        self.primary.iter().find(|s| s.slot_id == slot_id)
    }
}

/// Cross-day summary metrics.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Summary {
    /// Number of conference days aggregated.
    pub total_conference_days: usize,
    /// Primary sessions across all days.
    pub total_scheduled_sessions: usize,
    /// Backup candidates across all days.
    pub total_backup_sessions: usize,
    /// Mean primary score across all days, rounded to 3 decimals.
    pub average_session_score: f64,
    /// Primary sessions per venue, all days.
    pub overall_venue_distribution: HashMap<String, usize>,
    /// Primary sessions per keyword, all days.
    pub overall_keyword_coverage: HashMap<String, usize>,
    /// Scheduled sessions per conference day, rounded to 1 decimal.
    pub schedule_efficiency: f64,
}

/// The complete itinerary: one [`DailySchedule`] per conference date plus
/// a cross-day [`Summary`]. Dates iterate in ascending order regardless
/// of input or execution order.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Schedule {
    /// Per-day schedules, keyed and ordered by date.
    pub days: BTreeMap<NaiveDate, DailySchedule>,
    /// Cross-day summary.
    pub summary: Summary,
}

impl Schedule {
    /// The schedule for a given day, if that date was configured.
    pub fn day(&self, date: NaiveDate) -> Option<&DailySchedule> {
        self.days.get(&date)
    }

    /// Number of days in the schedule.
    pub fn day_count(&self) -> usize {
        self.days.len()
    }
}
