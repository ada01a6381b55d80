//! Engine configuration.
//!
//! All tunable knobs for the scheduling pipeline live here: score weights,
//! the lunch window, buffer minutes, backup requirements, and the venue /
//! level / keyword lookup tables. Configuration is immutable once handed
//! to the engine — components receive it by reference and never mutate it.
//!
//! # Validation
//!
//! [`EngineConfig::validate`] is called fail-fast by the engine entry
//! point. Fatal problems (weights not summing to 1.0, an empty conference
//! date list, an inverted lunch window, a negative buffer) surface as
//! [`ConfigError`] before any session is touched.

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use thiserror::Error;

/// Tolerance when checking that score weights sum to 1.0.
const WEIGHT_SUM_EPSILON: f64 = 1e-6;

/// Fatal configuration error. Surfaced before scheduling starts.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Score weights must sum to 1.0.
    #[error("score weights sum to {actual}, expected 1.0")]
    WeightSumMismatch { actual: f64 },
    /// At least one conference date is required.
    #[error("conference date list is empty")]
    NoConferenceDates,
    /// The lunch window must have start < end.
    #[error("lunch window is inverted: {start} >= {end}")]
    InvertedLunchWindow { start: NaiveTime, end: NaiveTime },
    /// Buffer minutes must be non-negative.
    #[error("buffer minutes is negative: {0}")]
    NegativeBuffer(i64),
}

/// Weights for the five scoring components. Must sum to 1.0.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ScoreWeights {
    /// Weight of keyword relevance.
    pub keyword: f64,
    /// Weight of session difficulty level preference.
    pub level: f64,
    /// Weight of venue convenience.
    pub venue: f64,
    /// Weight of speaker signal.
    pub speaker: f64,
    /// Weight of topical uniqueness.
    pub uniqueness: f64,
}

impl ScoreWeights {
    /// Sum of all component weights.
    pub fn sum(&self) -> f64 {
        self.keyword + self.level + self.venue + self.speaker + self.uniqueness
    }

    /// Whether the weights sum to 1.0 within tolerance.
    pub fn is_normalized(&self) -> bool {
        (self.sum() - 1.0).abs() <= WEIGHT_SUM_EPSILON
    }
}

impl Default for ScoreWeights {
    fn default() -> Self {
        Self {
            keyword: 0.40,
            level: 0.20,
            venue: 0.20,
            speaker: 0.10,
            uniqueness: 0.10,
        }
    }
}

/// The daily lunch block `[start, end)`. Excluded from scheduling.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct LunchWindow {
    /// Block start (inclusive).
    pub start: NaiveTime,
    /// Block end (exclusive).
    pub end: NaiveTime,
}

impl LunchWindow {
    /// Creates a lunch window.
    pub fn new(start: NaiveTime, end: NaiveTime) -> Self {
        Self { start, end }
    }

    /// Whether a session interval overlaps this block.
    ///
    /// Touching endpoints do not overlap.
    pub fn overlaps(&self, start: NaiveTime, end: NaiveTime) -> bool {
        start < self.end && end > self.start
    }
}

impl Default for LunchWindow {
    fn default() -> Self {
        Self {
            start: NaiveTime::from_hms_opt(11, 0, 0).expect("valid time"),
            end: NaiveTime::from_hms_opt(13, 0, 0).expect("valid time"),
        }
    }
}

/// Engine configuration.
///
/// Built with `with_*` setters from sensible defaults; only the
/// conference date list has no default and must be supplied.
///
/// # Example
///
/// ```
/// use chrono::NaiveDate;
/// use confsched::config::EngineConfig;
///
/// let config = EngineConfig::new(vec![
///     NaiveDate::from_ymd_opt(2025, 12, 1).unwrap(),
///     NaiveDate::from_ymd_opt(2025, 12, 2).unwrap(),
/// ])
/// .with_buffer_minutes(30)
/// .with_min_backup_count(2);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Component weights for the primary relevance score.
    pub weights: ScoreWeights,
    /// Daily lunch block, excluded from slots, primaries, and backups.
    pub lunch: LunchWindow,
    /// Minimum gap enforced between consecutive primary sessions (minutes).
    pub buffer_minutes: i64,
    /// Minimum desired backups per slot. Pools keep `max(this, 3)` entries.
    pub min_backup_count: usize,
    /// Maximum bookable slots per day.
    pub max_sessions_per_day: usize,
    /// Venue convenience table (lowercase substring → score in [0,1]).
    pub venue_convenience: HashMap<String, f64>,
    /// Venues excluded outright; matching sessions score 0.0 on venue.
    pub excluded_venues: Vec<String>,
    /// Difficulty level preference table (lowercase level → score).
    pub level_scores: HashMap<String, f64>,
    /// Venue bonus table used by backup ranking (lowercase substring → bonus).
    pub backup_venue_bonus: HashMap<String, f64>,
    /// Keywords whose presence earns the backup diversity bonus.
    pub high_value_keywords: Vec<String>,
    /// Speaker-name markers treated as seniority/organization signal.
    pub seniority_markers: Vec<String>,
    /// Title/description markers treated as uniqueness signal.
    pub uniqueness_markers: Vec<String>,
    /// Conference days, in the order supplied. Output is sorted ascending.
    pub conference_dates: Vec<NaiveDate>,
}

impl EngineConfig {
    /// Creates a configuration with default tables for the given dates.
    pub fn new(conference_dates: Vec<NaiveDate>) -> Self {
        Self {
            weights: ScoreWeights::default(),
            lunch: LunchWindow::default(),
            buffer_minutes: 30,
            min_backup_count: 2,
            max_sessions_per_day: 8,
            venue_convenience: default_venue_convenience(),
            excluded_venues: vec!["mgm grand".into(), "mandalay bay".into()],
            level_scores: default_level_scores(),
            backup_venue_bonus: default_backup_venue_bonus(),
            high_value_keywords: vec![
                "ai".into(),
                "architect".into(),
                "lakehouse".into(),
                "devops".into(),
            ],
            seniority_markers: vec![
                "principal".into(),
                "senior".into(),
                "distinguished".into(),
                "chief".into(),
                "head of".into(),
                "aws".into(),
                "amazon".into(),
            ],
            uniqueness_markers: vec![
                "new".into(),
                "preview".into(),
                "announcement".into(),
                "launch".into(),
                "exclusive".into(),
                "deep dive".into(),
                "hands-on".into(),
                "workshop".into(),
                "lab".into(),
                "demo".into(),
                "case study".into(),
                "real-world".into(),
                "production".into(),
                "scale".into(),
            ],
            conference_dates,
        }
    }

    /// Sets the score weights.
    pub fn with_weights(mut self, weights: ScoreWeights) -> Self {
        self.weights = weights;
        self
    }

    /// Sets the lunch window.
    pub fn with_lunch(mut self, lunch: LunchWindow) -> Self {
        self.lunch = lunch;
        self
    }

    /// Sets the inter-session buffer.
    pub fn with_buffer_minutes(mut self, minutes: i64) -> Self {
        self.buffer_minutes = minutes;
        self
    }

    /// Sets the minimum backup count.
    pub fn with_min_backup_count(mut self, count: usize) -> Self {
        self.min_backup_count = count;
        self
    }

    /// Sets the maximum slots per day.
    pub fn with_max_sessions_per_day(mut self, count: usize) -> Self {
        self.max_sessions_per_day = count;
        self
    }

    /// Replaces the venue convenience table.
    pub fn with_venue_convenience(mut self, table: HashMap<String, f64>) -> Self {
        self.venue_convenience = table;
        self
    }

    /// Replaces the excluded venue list.
    pub fn with_excluded_venues(mut self, venues: Vec<String>) -> Self {
        self.excluded_venues = venues;
        self
    }

    /// Replaces the level preference table.
    pub fn with_level_scores(mut self, table: HashMap<String, f64>) -> Self {
        self.level_scores = table;
        self
    }

    /// Replaces the high-value keyword list.
    pub fn with_high_value_keywords(mut self, keywords: Vec<String>) -> Self {
        self.high_value_keywords = keywords;
        self
    }

    /// Validates the configuration.
    ///
    /// Returns the first fatal problem found. Called by the engine before
    /// any scheduling work.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.weights.is_normalized() {
            return Err(ConfigError::WeightSumMismatch {
                actual: self.weights.sum(),
            });
        }
        if self.conference_dates.is_empty() {
            return Err(ConfigError::NoConferenceDates);
        }
        if self.lunch.start >= self.lunch.end {
            return Err(ConfigError::InvertedLunchWindow {
                start: self.lunch.start,
                end: self.lunch.end,
            });
        }
        if self.buffer_minutes < 0 {
            return Err(ConfigError::NegativeBuffer(self.buffer_minutes));
        }
        Ok(())
    }
}

fn default_venue_convenience() -> HashMap<String, f64> {
    [
        ("venetian", 0.9),
        ("palazzo", 0.9),
        ("wynn", 0.8),
        ("encore", 0.8),
        ("aria", 0.7),
        ("bellagio", 0.7),
        ("caesars", 0.6),
        ("mirage", 0.6),
        ("treasure island", 0.5),
        ("flamingo", 0.5),
        ("linq", 0.4),
        ("paris", 0.4),
        ("bally", 0.3),
        ("harrah", 0.3),
        ("rio", 0.2),
        ("orleans", 0.2),
    ]
    .into_iter()
    .map(|(k, v)| (k.to_string(), v))
    .collect()
}

fn default_level_scores() -> HashMap<String, f64> {
    [
        ("beginner", 0.6),
        ("intermediate", 1.0),
        ("advanced", 0.8),
        ("expert", 0.7),
    ]
    .into_iter()
    .map(|(k, v)| (k.to_string(), v))
    .collect()
}

fn default_backup_venue_bonus() -> HashMap<String, f64> {
    [
        ("venetian", 0.10),
        ("palazzo", 0.10),
        ("wynn", 0.08),
        ("encore", 0.08),
        ("aria", 0.06),
        ("bellagio", 0.06),
        ("caesars", 0.04),
        ("mirage", 0.04),
    ]
    .into_iter()
    .map(|(k, v)| (k.to_string(), v))
    .collect()
}
