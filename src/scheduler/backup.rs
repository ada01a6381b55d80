//! Backup pool generation.
//!
//! For every slot, independently ranks all non-primary sessions whose
//! times sit within a fixed tolerance of the slot bounds and keeps a
//! top-N pool. The backup score is distinct from the primary relevance
//! score: it discounts the original score and rewards tight time fit,
//! topical diversity, and venue convenience.

use std::collections::{HashMap, HashSet};

use log::warn;

use crate::config::EngineConfig;
use crate::models::{BackupCandidate, BackupPool, ScheduledSession, ScoredSession, TimeSlot};

/// How far a candidate's endpoints may drift from the slot bounds.
const TIME_TOLERANCE_MINUTES: i64 = 30;

/// Cap on the combined time-compatibility bonus.
const MAX_TIME_BONUS: f64 = 0.2;

/// Cap on the diversity bonus.
const MAX_DIVERSITY_BONUS: f64 = 0.15;

/// Flat venue bonus for a named but untabled venue.
const KNOWN_VENUE_BONUS: f64 = 0.02;

/// Ranks per-slot backup pools.
#[derive(Debug, Clone)]
pub struct BackupGenerator<'a> {
    config: &'a EngineConfig,
}

impl<'a> BackupGenerator<'a> {
    /// Creates a generator over the engine configuration.
    pub fn new(config: &'a EngineConfig) -> Self {
        Self { config }
    }

    /// Builds the backup pool for one day.
    ///
    /// Primary sessions are excluded by id. A slot with no compatible
    /// candidate gets an empty list — legal, but reported by statistics.
    pub fn generate_backups(
        &self,
        all_sessions: &[ScoredSession],
        primary: &[ScheduledSession],
        slots: &[TimeSlot],
    ) -> BackupPool {
        let primary_ids: HashSet<&str> = primary.iter().map(|s| s.id()).collect();
        let keep = self.config.min_backup_count.max(3);

        let mut pool = BackupPool::new();
        for slot in slots {
            let mut candidates: Vec<BackupCandidate> = all_sessions
                .iter()
                .filter(|s| !primary_ids.contains(s.id()))
                .filter(|s| self.fits_slot(s, slot))
                .map(|s| BackupCandidate {
                    scored: s.clone(),
                    backup_score: self.backup_score(s, slot),
                })
                .collect();

            candidates.sort_by(|a, b| {
                b.backup_score
                    .partial_cmp(&a.backup_score)
                    .unwrap_or(std::cmp::Ordering::Equal)
            });
            candidates.truncate(keep);

            if candidates.len() < self.config.min_backup_count {
                warn!(
                    "slot {} has {} backups, below the minimum of {}",
                    slot.id,
                    candidates.len(),
                    self.config.min_backup_count
                );
            }
            pool.insert(slot.id.clone(), candidates);
        }
        pool
    }

    /// Time compatibility: both endpoints within tolerance of the slot,
    /// and never inside the lunch block. Missing times are incompatible.
    fn fits_slot(&self, scored: &ScoredSession, slot: &TimeSlot) -> bool {
        let Some((start, end)) = scored.session.time_range() else {
            return false;
        };
        if self.config.lunch.overlaps(start, end) {
            return false;
        }
        let start_diff = (start - slot.start).num_minutes().abs();
        let end_diff = (end - slot.end).num_minutes().abs();
        start_diff <= TIME_TOLERANCE_MINUTES && end_diff <= TIME_TOLERANCE_MINUTES
    }

    /// Backup suitability: discounted original score plus capped bonuses.
    fn backup_score(&self, scored: &ScoredSession, slot: &TimeSlot) -> f64 {
        let base = scored.score() * 0.7;
        let total = base
            + self.time_bonus(scored, slot)
            + self.diversity_bonus(scored)
            + self.venue_bonus(scored);
        total.min(1.0)
    }

    /// Linear decay of 0.1 per hour of offset on each endpoint, averaged.
    fn time_bonus(&self, scored: &ScoredSession, slot: &TimeSlot) -> f64 {
        let Some((start, end)) = scored.session.time_range() else {
            return 0.0;
        };
        let start_diff = (start - slot.start).num_minutes().abs() as f64;
        let end_diff = (end - slot.end).num_minutes().abs() as f64;

        let start_bonus = (MAX_TIME_BONUS - (start_diff / 60.0) * 0.1).max(0.0);
        let end_bonus = (MAX_TIME_BONUS - (end_diff / 60.0) * 0.1).max(0.0);
        (start_bonus + end_bonus) / 2.0
    }

    /// Keyword breadth plus a premium for the configured high-value set.
    fn diversity_bonus(&self, scored: &ScoredSession) -> f64 {
        let keywords = &scored.session.keywords_matched;
        let breadth = (keywords.len() as f64 * 0.03).min(0.1);

        let high_value_hits = keywords
            .iter()
            .filter(|k| {
                let lower = k.to_lowercase();
                self.config.high_value_keywords.iter().any(|hv| *hv == lower)
            })
            .count();

        (breadth + high_value_hits as f64 * 0.02).min(MAX_DIVERSITY_BONUS)
    }

    /// Convenience-table lookup (longest substring match), else a small
    /// flat bonus for any named venue.
    fn venue_bonus(&self, scored: &ScoredSession) -> f64 {
        let venue = scored.session.venue.to_lowercase();
        if venue.is_empty() {
            return 0.0;
        }

        let mut best: Option<(usize, f64)> = None;
        for (name, bonus) in &self.config.backup_venue_bonus {
            if venue.contains(name.as_str()) {
                match best {
                    Some((len, _)) if name.len() <= len => {}
                    _ => best = Some((name.len(), *bonus)),
                }
            }
        }
        best.map(|(_, bonus)| bonus).unwrap_or(KNOWN_VENUE_BONUS)
    }
}

/// Pool-level statistics, for reporting.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BackupPoolStats {
    /// Candidates across all slots.
    pub total_backups: usize,
    /// Slots with at least one candidate.
    pub slots_with_backups: usize,
    /// Mean candidates per slot.
    pub average_backups_per_slot: f64,
    /// Slots meeting the configured minimum.
    pub slots_meeting_minimum: usize,
    /// Backup scores at or above 0.7.
    pub high: usize,
    /// Backup scores in [0.5, 0.7).
    pub medium: usize,
    /// Backup scores below 0.5.
    pub low: usize,
    /// Candidates per matched keyword.
    pub keyword_coverage: HashMap<String, usize>,
}

impl BackupPoolStats {
    /// Projects statistics over a pool.
    pub fn calculate(pool: &BackupPool, min_backup_count: usize) -> Self {
        let mut stats = Self {
            total_backups: pool.total_candidates(),
            ..Self::default()
        };

        let mut slot_counts = Vec::new();
        for (_, candidates) in pool.iter() {
            slot_counts.push(candidates.len());
            if !candidates.is_empty() {
                stats.slots_with_backups += 1;
            }
            if candidates.len() >= min_backup_count {
                stats.slots_meeting_minimum += 1;
            }
            for candidate in candidates {
                if candidate.backup_score >= 0.7 {
                    stats.high += 1;
                } else if candidate.backup_score >= 0.5 {
                    stats.medium += 1;
                } else {
                    stats.low += 1;
                }
                for keyword in &candidate.scored.session.keywords_matched {
                    *stats.keyword_coverage.entry(keyword.clone()).or_insert(0) += 1;
                }
            }
        }

        if !slot_counts.is_empty() {
            stats.average_backups_per_slot =
                stats.total_backups as f64 / slot_counts.len() as f64;
        }
        stats
    }
}
