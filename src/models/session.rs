//! Session (input record) model and scoring annotations.
//!
//! A session is a single schedulable activity with a fixed date, time,
//! and venue. Sessions arrive already structured and keyword-filtered;
//! the engine treats them as immutable values and attaches annotations
//! (score, slot, backup rank) through wrapper types instead of mutating
//! shared records.

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::config::ScoreWeights;

/// Duration assumed when a session carries no explicit duration.
pub const DEFAULT_DURATION_MINUTES: i64 = 60;

/// An immutable conference session record.
///
/// Start and end times are optional: upstream extraction sometimes fails
/// to recover them. Sessions missing either endpoint are excluded from
/// slot derivation and assignment but still counted in daily statistics.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    /// Unique session identifier.
    pub id: String,
    /// Session title.
    pub title: String,
    /// Abstract / long description.
    pub description: String,
    /// Conference day this session runs on.
    pub date: NaiveDate,
    /// Local start time (minute precision). `None` = not extracted.
    pub start_time: Option<NaiveTime>,
    /// Local end time (minute precision). `None` = not extracted.
    pub end_time: Option<NaiveTime>,
    /// Duration in minutes. Defaults to [`DEFAULT_DURATION_MINUTES`].
    pub duration_minutes: i64,
    /// Venue name.
    pub venue: String,
    /// Room within the venue.
    pub room: String,
    /// Session kind (talk, workshop, chalk talk, ...).
    pub kind: String,
    /// Content track.
    pub track: String,
    /// Speaker names.
    pub speakers: Vec<String>,
    /// Difficulty level. `None` = not extracted.
    pub level: Option<String>,
    /// Interest keywords matched by the upstream filter.
    pub keywords_matched: Vec<String>,
}

impl Session {
    /// Creates a session with the given identity and date.
    pub fn new(id: impl Into<String>, title: impl Into<String>, date: NaiveDate) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            description: String::new(),
            date,
            start_time: None,
            end_time: None,
            duration_minutes: DEFAULT_DURATION_MINUTES,
            venue: String::new(),
            room: String::new(),
            kind: String::new(),
            track: String::new(),
            speakers: Vec::new(),
            level: None,
            keywords_matched: Vec::new(),
        }
    }

    /// Sets start and end times.
    pub fn with_times(mut self, start: NaiveTime, end: NaiveTime) -> Self {
        self.start_time = Some(start);
        self.end_time = Some(end);
        self
    }

    /// Sets the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Sets the duration in minutes.
    pub fn with_duration(mut self, minutes: i64) -> Self {
        self.duration_minutes = minutes;
        self
    }

    /// Sets the venue.
    pub fn with_venue(mut self, venue: impl Into<String>) -> Self {
        self.venue = venue.into();
        self
    }

    /// Sets the room.
    pub fn with_room(mut self, room: impl Into<String>) -> Self {
        self.room = room.into();
        self
    }

    /// Sets the session kind.
    pub fn with_kind(mut self, kind: impl Into<String>) -> Self {
        self.kind = kind.into();
        self
    }

    /// Sets the content track.
    pub fn with_track(mut self, track: impl Into<String>) -> Self {
        self.track = track.into();
        self
    }

    /// Adds a speaker.
    pub fn with_speaker(mut self, speaker: impl Into<String>) -> Self {
        self.speakers.push(speaker.into());
        self
    }

    /// Sets the difficulty level.
    pub fn with_level(mut self, level: impl Into<String>) -> Self {
        self.level = Some(level.into());
        self
    }

    /// Adds a matched interest keyword.
    pub fn with_keyword(mut self, keyword: impl Into<String>) -> Self {
        self.keywords_matched.push(keyword.into());
        self
    }

    /// Both endpoints present, i.e. usable for slot derivation.
    pub fn has_times(&self) -> bool {
        self.start_time.is_some() && self.end_time.is_some()
    }

    /// The `(start, end)` pair, when both endpoints are present.
    pub fn time_range(&self) -> Option<(NaiveTime, NaiveTime)> {
        match (self.start_time, self.end_time) {
            (Some(s), Some(e)) => Some((s, e)),
            _ => None,
        }
    }
}

/// Component scores, the weights used, and the weighted total.
///
/// The total is always re-derivable from components and weights; there is
/// no hidden state.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    /// Keyword relevance component (0..1).
    pub keyword: f64,
    /// Level preference component (0..1).
    pub level: f64,
    /// Venue convenience component (0..1).
    pub venue: f64,
    /// Speaker signal component (0..1).
    pub speaker: f64,
    /// Topical uniqueness component (0..1).
    pub uniqueness: f64,
    /// Weights the total was computed with.
    pub weights: ScoreWeights,
    /// Weighted total, rounded to 3 decimals.
    pub total: f64,
}

impl ScoreBreakdown {
    /// Recomputes the total from components and weights (unrounded).
    pub fn derive_total(&self) -> f64 {
        self.keyword * self.weights.keyword
            + self.level * self.weights.level
            + self.venue * self.weights.venue
            + self.speaker * self.weights.speaker
            + self.uniqueness * self.weights.uniqueness
    }
}

/// A session annotated with its relevance score.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoredSession {
    /// The underlying session record.
    pub session: Session,
    /// Score components and weighted total.
    pub breakdown: ScoreBreakdown,
}

impl ScoredSession {
    /// The weighted total score.
    #[inline]
    pub fn score(&self) -> f64 {
        self.breakdown.total
    }

    /// Shorthand for the session id.
    #[inline]
    pub fn id(&self) -> &str {
        &self.session.id
    }
}
