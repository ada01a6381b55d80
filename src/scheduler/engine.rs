//! Itinerary construction pipeline.
//!
//! [`ItineraryScheduler`] is the single entry point. One call runs the
//! whole chain per conference day:
//!
//! 1. score every session ([`SessionScorer`])
//! 2. derive the day's bookable slots ([`SlotBuilder`])
//! 3. fill slots greedily ([`GreedyAssigner`], or a caller strategy)
//! 4. rank per-slot backup pools ([`BackupGenerator`])
//! 5. enforce the transition buffer and prune ([`ConflictResolver`])
//! 6. project statistics ([`DailyStats`], [`Summary`])
//!
//! Days are independent: nothing carries between dates, and the output
//! map iterates in ascending date order regardless of input order. The
//! only hard failure is an invalid configuration, checked up front;
//! malformed sessions are logged and skipped, never fatal.

use std::collections::HashMap;

use chrono::NaiveDate;

use crate::config::{ConfigError, EngineConfig};
use crate::models::{
    DailySchedule, DailyStats, Schedule, ScoredSession, Session, Summary, TimeBlock,
};
use crate::scheduler::backup::BackupGenerator;
use crate::scheduler::conflict::{ConflictPolicy, ConflictResolver};
use crate::scheduler::primary::{AssignStrategy, GreedyAssigner};
use crate::scheduler::slots::SlotBuilder;
use crate::scoring::SessionScorer;
use crate::validation::validate_sessions;

/// End-to-end scheduler for one conference.
///
/// Owns the configuration; sessions are borrowed per call, so one
/// scheduler can build many schedules.
pub struct ItineraryScheduler {
    config: EngineConfig,
    policy: ConflictPolicy,
    strategy: Box<dyn AssignStrategy>,
}

impl ItineraryScheduler {
    /// Creates a scheduler with the greedy assigner and lenient conflicts.
    pub fn new(config: EngineConfig) -> Self {
        Self {
            config,
            policy: ConflictPolicy::default(),
            strategy: Box::new(GreedyAssigner),
        }
    }

    /// Sets the policy for backups whose overlap cannot be determined.
    pub fn with_policy(mut self, policy: ConflictPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Replaces the primary assignment strategy.
    pub fn with_strategy(mut self, strategy: Box<dyn AssignStrategy>) -> Self {
        self.strategy = strategy;
        self
    }

    /// Builds the full schedule.
    ///
    /// Fails only on configuration errors. Sessions on dates outside the
    /// configured window are ignored (and reported by validation); a
    /// configured date with no sessions still yields an empty day.
    pub fn build(&self, sessions: &[Session]) -> Result<Schedule, ConfigError> {
        self.config.validate()?;

        for issue in validate_sessions(sessions, &self.config) {
            log::warn!("input: {issue}");
        }

        let scorer = SessionScorer::new(&self.config)?;
        let scored = scorer.score_all(sessions);

        // score_all is sorted descending; filtering per date preserves that.
        let mut by_date: HashMap<NaiveDate, Vec<ScoredSession>> = HashMap::new();
        for session in scored {
            by_date
                .entry(session.session.date)
                .or_default()
                .push(session);
        }

        let lunch = TimeBlock::new("lunch", self.config.lunch.start, self.config.lunch.end);
        let mut schedule = Schedule::default();
        for &date in &self.config.conference_dates {
            let day = match by_date.get(&date) {
                Some(day_sessions) => self.build_day(date, day_sessions, lunch.clone()),
                None => {
                    log::info!("{date}: no sessions, emitting empty day");
                    DailySchedule::empty(date, lunch.clone())
                }
            };
            schedule.days.insert(date, day);
        }

        schedule.summary = Summary::calculate(&schedule.days, self.config.conference_dates.len());
        log::info!(
            "scheduled {} sessions with {} backups across {} days",
            schedule.summary.total_scheduled_sessions,
            schedule.summary.total_backup_sessions,
            schedule.summary.total_conference_days
        );
        Ok(schedule)
    }

    fn build_day(
        &self,
        date: NaiveDate,
        day_sessions: &[ScoredSession],
        lunch: TimeBlock,
    ) -> DailySchedule {
        let slots = SlotBuilder::new(&self.config).build_slots(day_sessions, date);
        let primary = self.strategy.assign(day_sessions, &slots);
        let backups =
            BackupGenerator::new(&self.config).generate_backups(day_sessions, &primary, &slots);
        let (primary, backups, transitions) = ConflictResolver::new(self.config.buffer_minutes)
            .with_policy(self.policy)
            .resolve(primary, backups);
        let stats = DailyStats::calculate(
            day_sessions.len(),
            &primary,
            &backups,
            &slots,
            self.config.min_backup_count,
        );
        log::info!(
            "{date}: {} slots, {} primary, {} backups",
            slots.len(),
            primary.len(),
            backups.total_candidates()
        );
        DailySchedule {
            date,
            primary,
            backups,
            blocked: vec![lunch],
            transitions,
            stats,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveTime;

    fn t(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    fn date(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 12, day).unwrap()
    }

    fn session(id: &str, day: u32, start: NaiveTime, end: NaiveTime) -> Session {
        Session::new(id, format!("Session {id}"), date(day))
            .with_times(start, end)
            .with_venue("Venetian")
            .with_keyword("AI")
    }

    #[test]
    fn test_end_to_end_single_day() {
        let scheduler = ItineraryScheduler::new(EngineConfig::new(vec![date(1)]));
        let sessions = vec![
            session("a", 1, t(9, 0), t(10, 0)),
            session("b", 1, t(9, 0), t(10, 0)).with_level("Expert"),
            session("c", 1, t(14, 0), t(15, 0)),
        ];

        let schedule = scheduler.build(&sessions).unwrap();
        assert_eq!(schedule.day_count(), 1);
        let day = schedule.day(date(1)).unwrap();

        // Two distinct time ranges, both filled.
        assert_eq!(day.primary.len(), 2);
        // 9:00 slot: "a" and "b" differ only on level (expert=0.7 beats
        // the unknown-level 0.5), so "b" wins. "a" enters slot_1's pool at
        // generation but shares "b"'s exact interval, so the resolver
        // prunes it; the final pool is empty.
        assert_eq!(day.primary[0].id(), "b");
        assert_eq!(day.primary[1].id(), "c");
        assert!(day.backups.for_slot("slot_1").unwrap().is_empty());
        assert_eq!(day.backups.total_candidates(), 0);
        assert_eq!(day.blocked, vec![TimeBlock::new("lunch", t(11, 0), t(13, 0))]);
        assert_eq!(schedule.summary.total_scheduled_sessions, 2);
    }

    #[test]
    fn test_empty_day_still_emitted() {
        let scheduler = ItineraryScheduler::new(EngineConfig::new(vec![date(1), date(2)]));
        let sessions = vec![session("a", 1, t(9, 0), t(10, 0))];

        let schedule = scheduler.build(&sessions).unwrap();
        assert_eq!(schedule.day_count(), 2);
        let empty = schedule.day(date(2)).unwrap();
        assert!(empty.primary.is_empty());
        assert_eq!(empty.blocked.len(), 1);
        assert_eq!(schedule.summary.total_conference_days, 2);
    }

    #[test]
    fn test_days_iterate_ascending_regardless_of_config_order() {
        let scheduler =
            ItineraryScheduler::new(EngineConfig::new(vec![date(3), date(1), date(2)]));
        let schedule = scheduler.build(&[]).unwrap();
        let dates: Vec<NaiveDate> = schedule.days.keys().copied().collect();
        assert_eq!(dates, vec![date(1), date(2), date(3)]);
    }

    #[test]
    fn test_outside_window_session_ignored() {
        let scheduler = ItineraryScheduler::new(EngineConfig::new(vec![date(1)]));
        let sessions = vec![session("x", 9, t(9, 0), t(10, 0))];
        let schedule = scheduler.build(&sessions).unwrap();
        assert!(schedule.day(date(1)).unwrap().primary.is_empty());
        assert_eq!(schedule.summary.total_scheduled_sessions, 0);
    }

    #[test]
    fn test_invalid_config_rejected() {
        let mut config = EngineConfig::new(vec![date(1)]);
        config.weights.keyword = 0.9;
        let scheduler = ItineraryScheduler::new(config);
        assert!(scheduler.build(&[]).is_err());
    }

    #[test]
    fn test_lunch_sessions_never_scheduled() {
        let scheduler = ItineraryScheduler::new(EngineConfig::new(vec![date(1)]));
        let sessions = vec![
            session("lunch-talk", 1, t(11, 30), t(12, 30)),
            session("morning", 1, t(9, 0), t(10, 0)),
        ];
        let schedule = scheduler.build(&sessions).unwrap();
        let day = schedule.day(date(1)).unwrap();
        assert_eq!(day.primary.len(), 1);
        assert_eq!(day.primary[0].id(), "morning");
        assert_eq!(day.backups.total_candidates(), 0);
    }

    #[test]
    fn test_buffer_conflict_drops_later_session() {
        let scheduler = ItineraryScheduler::new(EngineConfig::new(vec![date(1)]));
        let sessions = vec![
            session("first", 1, t(9, 0), t(10, 0)).with_level("Intermediate"),
            session("tight", 1, t(10, 15), t(11, 0)),
        ];
        let schedule = scheduler.build(&sessions).unwrap();
        let day = schedule.day(date(1)).unwrap();
        // Both win their slots, but the 15-minute gap is under the
        // 30-minute buffer, so the later one is dropped.
        assert_eq!(day.primary.len(), 1);
        assert_eq!(day.primary[0].id(), "first");
    }
}
