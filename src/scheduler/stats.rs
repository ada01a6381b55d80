//! Schedule statistics.
//!
//! Pure projections over the final per-day lists: nothing here mutates
//! the schedule or enforces invariants. Soft failures (unfilled slots,
//! under-provisioned backup pools) are counted for the caller to act on,
//! never raised.
//!
//! | Metric | Definition |
//! |--------|-----------|
//! | Average score | mean primary score, 3 decimals |
//! | Venue distribution | primary sessions per venue |
//! | Keyword coverage | primary sessions per matched keyword |
//! | Schedule efficiency | scheduled sessions ÷ conference days, 1 decimal |

use chrono::NaiveDate;
use std::collections::BTreeMap;

use crate::models::{BackupPool, DailySchedule, DailyStats, ScheduledSession, Summary, TimeSlot};
use crate::scoring::round3;

fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

impl DailyStats {
    /// Projects one day's statistics over the final lists.
    ///
    /// `total_sessions` counts every input session for the day, including
    /// ones excluded from assignment for missing times.
    pub fn calculate(
        total_sessions: usize,
        primary: &[ScheduledSession],
        backups: &BackupPool,
        slots: &[TimeSlot],
        min_backup_count: usize,
    ) -> Self {
        let mut stats = Self {
            total_sessions,
            scheduled_sessions: primary.len(),
            backup_sessions: backups.total_candidates(),
            unfilled_slots: slots.len().saturating_sub(primary.len()),
            ..Self::default()
        };

        if !primary.is_empty() {
            let sum: f64 = primary.iter().map(|s| s.score()).sum();
            stats.average_score = round3(sum / primary.len() as f64);
        }

        for session in primary {
            let venue = &session.scored.session.venue;
            let venue_key = if venue.is_empty() { "Unknown" } else { venue };
            *stats
                .venue_distribution
                .entry(venue_key.to_string())
                .or_insert(0) += 1;
            for keyword in &session.scored.session.keywords_matched {
                *stats.keyword_coverage.entry(keyword.clone()).or_insert(0) += 1;
            }
        }

        for (_, candidates) in backups.iter() {
            if candidates.len() < min_backup_count {
                stats.under_provisioned_slots += 1;
            }
        }

        stats
    }
}

impl Summary {
    /// Folds per-day results into the cross-day summary.
    ///
    /// `conference_days` is the configured date count, which also covers
    /// all-empty days.
    pub fn calculate(days: &BTreeMap<NaiveDate, DailySchedule>, conference_days: usize) -> Self {
        let mut summary = Self {
            total_conference_days: conference_days,
            ..Self::default()
        };

        let mut scores: Vec<f64> = Vec::new();
        for day in days.values() {
            summary.total_scheduled_sessions += day.stats.scheduled_sessions;
            summary.total_backup_sessions += day.stats.backup_sessions;

            for session in &day.primary {
                if session.score() > 0.0 {
                    scores.push(session.score());
                }
            }
            for (venue, count) in &day.stats.venue_distribution {
                *summary
                    .overall_venue_distribution
                    .entry(venue.clone())
                    .or_insert(0) += count;
            }
            for (keyword, count) in &day.stats.keyword_coverage {
                *summary
                    .overall_keyword_coverage
                    .entry(keyword.clone())
                    .or_insert(0) += count;
            }
        }

        if !scores.is_empty() {
            let sum: f64 = scores.iter().sum();
            summary.average_session_score = round3(sum / scores.len() as f64);
        }
        if conference_days > 0 {
            summary.schedule_efficiency =
                round1(summary.total_scheduled_sessions as f64 / conference_days as f64);
        }
        summary
    }
}
