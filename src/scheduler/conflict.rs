//! Conflict resolution.
//!
//! Re-validates the day's primary list for buffer-respecting
//! non-overlap, drops violators (the engine never reschedules), prunes
//! backups that collide with the final primary list, and reports venue
//! transitions between consecutive finals.
//!
//! # Undeterminable overlaps
//!
//! An overlap test against a session with missing times cannot be
//! decided. Rather than silently passing such pairs as "no conflict",
//! the check returns [`OverlapCheck::Unknown`] and the configured
//! [`ConflictPolicy`] decides: `Lenient` keeps the entry (logged),
//! `Strict` drops it.

use chrono::NaiveTime;
use log::{debug, warn};

use crate::models::{
    BackupPool, ScheduledSession, TransitionReport, VenueTransition,
};

/// Outcome of a buffered-overlap test.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverlapCheck {
    /// The buffered intervals overlap.
    Overlap,
    /// The buffered intervals are disjoint.
    Clear,
    /// One side is missing a time; the test cannot be decided.
    Unknown,
}

/// How undeterminable overlaps are handled.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ConflictPolicy {
    /// Treat unknown as non-conflicting and log it (original behavior).
    #[default]
    Lenient,
    /// Drop entries whose conflicts cannot be determined.
    Strict,
}

/// Advisory threshold for flagging tight venue transitions. Independent
/// of the drop buffer: a gap can satisfy the buffer and still be a
/// tight walk between venues.
const SHORT_GAP_MINUTES: i64 = 30;

/// Minutes from midnight; buffered arithmetic stays in plain integers so
/// it cannot wrap around the day boundary.
fn minutes(t: NaiveTime) -> i64 {
    (t - NaiveTime::MIN).num_minutes()
}

/// Buffered-interval overlap over known times.
fn buffered_overlap(
    start1: NaiveTime,
    end1: NaiveTime,
    start2: NaiveTime,
    end2: NaiveTime,
    buffer_minutes: i64,
) -> bool {
    let (s1, e1) = (minutes(start1), minutes(end1));
    let (s2, e2) = (minutes(start2), minutes(end2));
    s1 < e2 + buffer_minutes && s2 < e1 + buffer_minutes
}

/// Re-validates primaries and prunes colliding backups.
#[derive(Debug, Clone, Copy)]
pub struct ConflictResolver {
    buffer_minutes: i64,
    policy: ConflictPolicy,
}

impl ConflictResolver {
    /// Creates a resolver with the given buffer and the lenient policy.
    pub fn new(buffer_minutes: i64) -> Self {
        Self {
            buffer_minutes,
            policy: ConflictPolicy::Lenient,
        }
    }

    /// Sets the undeterminable-overlap policy.
    pub fn with_policy(mut self, policy: ConflictPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Resolves the day.
    ///
    /// Returns the final primary list (sorted by scheduled start), the
    /// pruned backup pool, and the venue-transition report.
    pub fn resolve(
        &self,
        primary: Vec<ScheduledSession>,
        backups: BackupPool,
    ) -> (Vec<ScheduledSession>, BackupPool, TransitionReport) {
        let final_primary = self.drop_conflicting_primaries(primary);
        let final_backups = self.prune_backups(&final_primary, backups);
        let transitions = self.transition_report(&final_primary);
        (final_primary, final_backups, transitions)
    }

    /// Left-to-right greedy acceptance over the start-sorted list: a
    /// session conflicting with any already-accepted session is dropped
    /// and logged, vacating its slot for the day.
    fn drop_conflicting_primaries(
        &self,
        mut primary: Vec<ScheduledSession>,
    ) -> Vec<ScheduledSession> {
        primary.sort_by_key(|s| s.scheduled_start);

        let mut accepted: Vec<ScheduledSession> = Vec::new();
        for session in primary {
            let conflict = accepted.iter().any(|prev| {
                buffered_overlap(
                    session.scheduled_start,
                    session.scheduled_end,
                    prev.scheduled_start,
                    prev.scheduled_end,
                    self.buffer_minutes,
                )
            });
            if conflict {
                warn!(
                    "dropping '{}' ({}): conflicts with an accepted session within \
                     the {}-minute buffer",
                    session.scored.session.title,
                    session.id(),
                    self.buffer_minutes
                );
            } else {
                accepted.push(session);
            }
        }
        accepted
    }

    /// Drops backups whose buffered interval collides with any final
    /// primary interval. Candidates without times follow the policy.
    fn prune_backups(
        &self,
        final_primary: &[ScheduledSession],
        mut backups: BackupPool,
    ) -> BackupPool {
        let primary_times: Vec<(NaiveTime, NaiveTime)> = final_primary
            .iter()
            .map(|s| (s.scheduled_start, s.scheduled_end))
            .collect();

        for (slot_id, candidates) in backups.iter_mut() {
            candidates.retain(|candidate| {
                match self.backup_check(candidate.scored.session.time_range(), &primary_times) {
                    OverlapCheck::Clear => true,
                    OverlapCheck::Overlap => false,
                    OverlapCheck::Unknown => match self.policy {
                        ConflictPolicy::Lenient => {
                            debug!(
                                "backup '{}' in {} has no usable times; kept under \
                                 the lenient policy",
                                candidate.scored.id(),
                                slot_id
                            );
                            true
                        }
                        ConflictPolicy::Strict => false,
                    },
                }
            });
        }
        backups
    }

    fn backup_check(
        &self,
        range: Option<(NaiveTime, NaiveTime)>,
        primary_times: &[(NaiveTime, NaiveTime)],
    ) -> OverlapCheck {
        let Some((start, end)) = range else {
            return OverlapCheck::Unknown;
        };
        let collides = primary_times
            .iter()
            .any(|&(ps, pe)| buffered_overlap(start, end, ps, pe, self.buffer_minutes));
        if collides {
            OverlapCheck::Overlap
        } else {
            OverlapCheck::Clear
        }
    }

    /// Reporting only: venue changes between consecutive finals. No
    /// session swapping happens here even when transitions pile up.
    fn transition_report(&self, final_primary: &[ScheduledSession]) -> TransitionReport {
        let mut report = TransitionReport::default();

        for pair in final_primary.windows(2) {
            let (cur, next) = (&pair[0], &pair[1]);
            if cur.scored.session.venue == next.scored.session.venue {
                continue;
            }
            report.transitions.push(VenueTransition {
                from_venue: cur.scored.session.venue.clone(),
                to_venue: next.scored.session.venue.clone(),
                from_title: cur.scored.session.title.clone(),
                to_title: next.scored.session.title.clone(),
                gap_minutes: minutes(next.scheduled_start) - minutes(cur.scheduled_end),
            });
        }

        if report.transitions.len() > 3 {
            report
                .recommendations
                .push("Consider grouping sessions by venue to reduce travel time".to_string());
        }
        for transition in &report.transitions {
            if transition.gap_minutes < SHORT_GAP_MINUTES {
                report.recommendations.push(format!(
                    "Short transition time ({} min) between {} and {}",
                    transition.gap_minutes, transition.from_venue, transition.to_venue
                ));
            }
        }
        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::EngineConfig;
    use crate::models::{BackupCandidate, Session, TimeSlot};
    use crate::scoring::SessionScorer;
    use chrono::NaiveDate;

    fn t(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 12, 1).unwrap()
    }

    fn placed(id: &str, venue: &str, start: NaiveTime, end: NaiveTime) -> ScheduledSession {
        let config = EngineConfig::new(vec![date()]);
        let scorer = SessionScorer::new(&config).unwrap();
        let session = Session::new(id, id, date())
            .with_venue(venue)
            .with_times(start, end);
        let scored = scorer.score_all(std::slice::from_ref(&session)).remove(0);
        let slot = TimeSlot::new(format!("slot_{id}"), date(), start, end, 30);
        ScheduledSession::in_slot(scored, &slot)
    }

    fn candidate(id: &str, times: Option<(NaiveTime, NaiveTime)>) -> BackupCandidate {
        let config = EngineConfig::new(vec![date()]);
        let scorer = SessionScorer::new(&config).unwrap();
        let mut session = Session::new(id, id, date());
        if let Some((s, e)) = times {
            session = session.with_times(s, e);
        }
        BackupCandidate {
            scored: scorer.score_all(std::slice::from_ref(&session)).remove(0),
            backup_score: 0.5,
        }
    }

    #[test]
    fn test_buffered_overlap() {
        // 15-minute gap is inside a 30-minute buffer
        assert!(buffered_overlap(t(10, 15), t(11, 0), t(9, 0), t(10, 0), 30));
        // 30-minute gap exactly matches the buffer: clear
        assert!(!buffered_overlap(t(10, 30), t(11, 0), t(9, 0), t(10, 0), 30));
        // Plain overlap regardless of buffer
        assert!(buffered_overlap(t(9, 30), t(10, 30), t(9, 0), t(10, 0), 0));
    }

    #[test]
    fn test_buffer_violation_dropped() {
        // Gap of 15 min < 30 min buffer: the later session is dropped.
        let primary = vec![
            placed("second", "Wynn", t(10, 15), t(11, 0)),
            placed("first", "Venetian", t(9, 0), t(10, 0)),
        ];
        let resolver = ConflictResolver::new(30);

        let (finals, _, _) = resolver.resolve(primary, BackupPool::new());
        assert_eq!(finals.len(), 1);
        assert_eq!(finals[0].id(), "first");
    }

    #[test]
    fn test_non_conflicting_kept_in_start_order() {
        let primary = vec![
            placed("pm", "Wynn", t(14, 0), t(15, 0)),
            placed("am", "Venetian", t(9, 0), t(10, 0)),
        ];
        let resolver = ConflictResolver::new(30);

        let (finals, _, _) = resolver.resolve(primary, BackupPool::new());
        assert_eq!(finals.len(), 2);
        assert_eq!(finals[0].id(), "am");
        assert_eq!(finals[1].id(), "pm");
    }

    #[test]
    fn test_backups_pruned_against_final_primaries() {
        let primary = vec![placed("p", "Venetian", t(9, 0), t(10, 0))];
        let mut backups = BackupPool::new();
        backups.insert(
            "slot_1",
            vec![
                candidate("collides", Some((t(10, 15), t(11, 0)))),
                candidate("clear", Some((t(14, 0), t(15, 0)))),
            ],
        );
        let resolver = ConflictResolver::new(30);

        let (_, pruned, _) = resolver.resolve(primary, backups);
        let ids: Vec<&str> = pruned
            .for_slot("slot_1")
            .unwrap()
            .iter()
            .map(|c| c.scored.id())
            .collect();
        assert_eq!(ids, vec!["clear"]);
    }

    #[test]
    fn test_unknown_times_follow_policy() {
        let primary = vec![placed("p", "Venetian", t(9, 0), t(10, 0))];
        let mut backups = BackupPool::new();
        backups.insert("slot_1", vec![candidate("untimed", None)]);

        let lenient = ConflictResolver::new(30);
        let (_, kept, _) = lenient.resolve(primary.clone(), backups.clone());
        assert_eq!(kept.for_slot("slot_1").unwrap().len(), 1);

        let strict = ConflictResolver::new(30).with_policy(ConflictPolicy::Strict);
        let (_, dropped, _) = strict.resolve(primary, backups);
        assert!(dropped.for_slot("slot_1").unwrap().is_empty());
    }

    #[test]
    fn test_transition_report() {
        let primary = vec![
            placed("a", "Venetian", t(9, 0), t(10, 0)),
            placed("b", "Wynn", t(10, 45), t(11, 0)),
            placed("c", "Wynn", t(14, 0), t(15, 0)),
        ];
        // Buffer 0 so nothing is dropped; we only want the report.
        let resolver = ConflictResolver::new(0);

        let (_, _, report) = resolver.resolve(primary, BackupPool::new());
        assert_eq!(report.transitions.len(), 1);
        assert_eq!(report.transitions[0].from_venue, "Venetian");
        assert_eq!(report.transitions[0].to_venue, "Wynn");
        assert_eq!(report.transitions[0].gap_minutes, 45);
        // 45-minute gap clears the advisory threshold, and one transition
        // is too few for grouping advice.
        assert!(report.recommendations.is_empty());
    }

    #[test]
    fn test_short_gap_recommendation() {
        let primary = vec![
            placed("a", "Venetian", t(9, 0), t(9, 30)),
            placed("b", "Caesars Forum", t(9, 45), t(10, 15)),
        ];
        // Buffer 10 lets both survive (gap 15 >= 10) but the gap still
        // sits under the 30-minute advisory threshold.
        let resolver = ConflictResolver::new(10);

        let (finals, _, report) = resolver.resolve(primary, BackupPool::new());
        assert_eq!(finals.len(), 2);
        assert_eq!(report.transitions.len(), 1);
        assert!(report
            .recommendations
            .iter()
            .any(|r| r.contains("Short transition time (15 min)")));
    }

    #[test]
    fn test_venue_grouping_recommendation() {
        let venues = ["A", "B", "C", "D", "E"];
        let primary: Vec<ScheduledSession> = venues
            .iter()
            .enumerate()
            .map(|(i, venue)| {
                let start = t(8 + 2 * i as u32, 0);
                let end = t(9 + 2 * i as u32, 0);
                placed(&format!("s{i}"), venue, start, end)
            })
            .collect();
        let resolver = ConflictResolver::new(30);

        let (finals, _, report) = resolver.resolve(primary, BackupPool::new());
        assert_eq!(finals.len(), 5);
        assert_eq!(report.transitions.len(), 4);
        assert!(report
            .recommendations
            .iter()
            .any(|r| r.contains("grouping sessions by venue")));
    }
}
