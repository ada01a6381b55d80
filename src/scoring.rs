//! Session relevance scoring.
//!
//! Assigns each candidate session a score in [0, 1] from five
//! independently computed, weighted components:
//!
//! | Component | Weight (default) | Signal |
//! |-----------|-----------------|--------|
//! | Keyword | 0.40 | matched interest keywords, title hits |
//! | Level | 0.20 | difficulty preference table |
//! | Venue | 0.20 | venue convenience table |
//! | Speaker | 0.10 | speaker count, seniority markers |
//! | Uniqueness | 0.10 | launch/deep-dive markers in title/description |
//!
//! Scoring is a pure function of the session's fields and the injected
//! configuration: the same session always yields the same
//! [`ScoreBreakdown`].

use crate::config::{ConfigError, EngineConfig};
use crate::models::{ScoreBreakdown, ScoredSession, Session};

/// Thresholds for the high/medium score buckets in [`ScoringStats`].
const HIGH_SCORE_THRESHOLD: f64 = 0.8;
const MEDIUM_SCORE_THRESHOLD: f64 = 0.6;

/// Rounds to 3 decimals, the precision carried by reported scores.
pub(crate) fn round3(value: f64) -> f64 {
    (value * 1000.0).round() / 1000.0
}

/// Deterministic five-component session scorer.
///
/// Holds a reference to the engine configuration; the weight table is
/// validated at construction and the scorer fails fast on a malformed
/// one.
#[derive(Debug, Clone)]
pub struct SessionScorer<'a> {
    config: &'a EngineConfig,
}

impl<'a> SessionScorer<'a> {
    /// Creates a scorer, rejecting weight tables that do not sum to 1.0.
    pub fn new(config: &'a EngineConfig) -> Result<Self, ConfigError> {
        if !config.weights.is_normalized() {
            return Err(ConfigError::WeightSumMismatch {
                actual: config.weights.sum(),
            });
        }
        Ok(Self { config })
    }

    /// Scores a single session.
    pub fn score(&self, session: &Session) -> ScoreBreakdown {
        let keyword = self.keyword_component(session);
        let level = self.level_component(session);
        let venue = self.venue_component(session);
        let speaker = self.speaker_component(session);
        let uniqueness = self.uniqueness_component(session);

        let weights = self.config.weights;
        let total = keyword * weights.keyword
            + level * weights.level
            + venue * weights.venue
            + speaker * weights.speaker
            + uniqueness * weights.uniqueness;

        ScoreBreakdown {
            keyword,
            level,
            venue,
            speaker,
            uniqueness,
            weights,
            total: round3(total),
        }
    }

    /// Scores all sessions and sorts them descending by total.
    ///
    /// The sort is stable: ties keep their original relative order, which
    /// downstream tie-breaking relies on.
    pub fn score_all(&self, sessions: &[Session]) -> Vec<ScoredSession> {
        let mut scored: Vec<ScoredSession> = sessions
            .iter()
            .map(|s| ScoredSession {
                session: s.clone(),
                breakdown: self.score(s),
            })
            .collect();

        scored.sort_by(|a, b| {
            b.score()
                .partial_cmp(&a.score())
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        scored
    }

    /// Keyword relevance: 0 without matches, else base 0.5 plus bonuses
    /// for match count and for keywords appearing in the title.
    fn keyword_component(&self, session: &Session) -> f64 {
        if session.keywords_matched.is_empty() {
            return 0.0;
        }

        let match_bonus = (session.keywords_matched.len() as f64 * 0.1).min(0.3);

        let title = session.title.to_lowercase();
        let title_hits = session
            .keywords_matched
            .iter()
            .filter(|k| title.contains(&k.to_lowercase()))
            .count();
        let title_bonus = (title_hits as f64 * 0.1).min(0.2);

        (0.5 + match_bonus + title_bonus).min(1.0)
    }

    /// Level preference: configured table lookup, neutral 0.5 otherwise.
    fn level_component(&self, session: &Session) -> f64 {
        match &session.level {
            Some(level) if !level.is_empty() => self
                .config
                .level_scores
                .get(&level.to_lowercase())
                .copied()
                .unwrap_or(0.5),
            _ => 0.5,
        }
    }

    /// Venue convenience: longest case-insensitive substring match wins.
    /// Excluded venues score 0.0; unknown venues are neutral.
    fn venue_component(&self, session: &Session) -> f64 {
        let venue = session.venue.to_lowercase();
        if venue.is_empty() {
            return 0.5;
        }

        if self
            .config
            .excluded_venues
            .iter()
            .any(|ex| venue.contains(&ex.to_lowercase()))
        {
            return 0.0;
        }

        let mut best: Option<(usize, f64)> = None;
        for (name, score) in &self.config.venue_convenience {
            if venue.contains(name.as_str()) {
                match best {
                    Some((len, _)) if name.len() <= len => {}
                    _ => best = Some((name.len(), *score)),
                }
            }
        }
        best.map(|(_, score)| score).unwrap_or(0.5)
    }

    /// Speaker signal: neutral base plus bonuses for speaker count and
    /// for names carrying a seniority/organization marker.
    fn speaker_component(&self, session: &Session) -> f64 {
        if session.speakers.is_empty() {
            return 0.5;
        }

        let count_bonus = (session.speakers.len() as f64 * 0.1).min(0.3);

        let marker_hits = session
            .speakers
            .iter()
            .filter(|speaker| {
                let name = speaker.to_lowercase();
                self.config
                    .seniority_markers
                    .iter()
                    .any(|m| name.contains(m.as_str()))
            })
            .count();
        let marker_bonus = (marker_hits as f64 * 0.1).min(0.2);

        (0.5 + count_bonus + marker_bonus).min(1.0)
    }

    /// Topical uniqueness: 0.1 per marker in the title, 0.05 per marker
    /// found only in the description.
    fn uniqueness_component(&self, session: &Session) -> f64 {
        let title = session.title.to_lowercase();
        let description = session.description.to_lowercase();

        let mut score: f64 = 0.5;
        for marker in &self.config.uniqueness_markers {
            if title.contains(marker.as_str()) {
                score += 0.1;
            } else if description.contains(marker.as_str()) {
                score += 0.05;
            }
        }
        score.min(1.0)
    }
}

/// Scoring distribution over a scored batch, for reporting.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScoringStats {
    /// Sessions scored.
    pub total_sessions: usize,
    /// Mean total score.
    pub average_score: f64,
    /// Lowest total score.
    pub min_score: f64,
    /// Highest total score.
    pub max_score: f64,
    /// Scores in [0.8, 1.0].
    pub high: usize,
    /// Scores in [0.6, 0.8).
    pub medium: usize,
    /// Scores in [0.0, 0.6).
    pub low: usize,
}

impl ScoringStats {
    /// Projects statistics over a scored batch. Empty input yields the
    /// all-zero default.
    pub fn calculate(scored: &[ScoredSession]) -> Self {
        if scored.is_empty() {
            return Self::default();
        }

        let scores: Vec<f64> = scored.iter().map(|s| s.score()).collect();
        let sum: f64 = scores.iter().sum();

        Self {
            total_sessions: scored.len(),
            average_score: round3(sum / scores.len() as f64),
            min_score: scores.iter().copied().fold(f64::INFINITY, f64::min),
            max_score: scores.iter().copied().fold(f64::NEG_INFINITY, f64::max),
            high: scores.iter().filter(|s| **s >= HIGH_SCORE_THRESHOLD).count(),
            medium: scores
                .iter()
                .filter(|s| **s >= MEDIUM_SCORE_THRESHOLD && **s < HIGH_SCORE_THRESHOLD)
                .count(),
            low: scores.iter().filter(|s| **s < MEDIUM_SCORE_THRESHOLD).count(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ScoreWeights;
    use chrono::NaiveDate;

    fn config() -> EngineConfig {
        EngineConfig::new(vec![NaiveDate::from_ymd_opt(2025, 12, 1).unwrap()])
    }

    fn session(id: &str) -> Session {
        Session::new(id, "A session", NaiveDate::from_ymd_opt(2025, 12, 1).unwrap())
    }

    #[test]
    fn test_rejects_bad_weights() {
        let config = config().with_weights(ScoreWeights {
            keyword: 0.9,
            level: 0.9,
            venue: 0.0,
            speaker: 0.0,
            uniqueness: 0.0,
        });
        assert!(SessionScorer::new(&config).is_err());
    }

    #[test]
    fn test_keyword_component() {
        let config = config();
        let scorer = SessionScorer::new(&config).unwrap();

        // No matches → 0
        assert_eq!(scorer.score(&session("S1")).keyword, 0.0);

        // Two matches, one in the title: 0.5 + 0.2 + 0.1
        let s = Session::new("S2", "AI in production", date())
            .with_keyword("AI")
            .with_keyword("ETL");
        let b = scorer.score(&s);
        assert!((b.keyword - 0.8).abs() < 1e-9);

        // Bonuses cap: many matches all in the title → 0.5 + 0.3 + 0.2
        let mut s = Session::new("S3", "ai etl devops trino kiro", date());
        for k in ["ai", "etl", "devops", "trino", "kiro"] {
            s = s.with_keyword(k);
        }
        assert!((scorer.score(&s).keyword - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_level_component() {
        let config = config();
        let scorer = SessionScorer::new(&config).unwrap();

        let b = scorer.score(&session("S1").with_level("Intermediate"));
        assert!((b.level - 1.0).abs() < 1e-9);
        let b = scorer.score(&session("S2").with_level("beginner"));
        assert!((b.level - 0.6).abs() < 1e-9);
        // Unknown and missing are neutral
        let b = scorer.score(&session("S3").with_level("ninja"));
        assert!((b.level - 0.5).abs() < 1e-9);
        let b = scorer.score(&session("S4"));
        assert!((b.level - 0.5).abs() < 1e-9);
    }

    #[test]
    fn test_venue_component() {
        let config = config();
        let scorer = SessionScorer::new(&config).unwrap();

        let b = scorer.score(&session("S1").with_venue("The Venetian, Level 2"));
        assert!((b.venue - 0.9).abs() < 1e-9);
        // Excluded venue scores zero, not neutral
        let b = scorer.score(&session("S2").with_venue("MGM Grand Arena"));
        assert!((b.venue - 0.0).abs() < 1e-9);
        // Unknown venue is neutral
        let b = scorer.score(&session("S3").with_venue("Downtown Hall"));
        assert!((b.venue - 0.5).abs() < 1e-9);
        // Missing venue is neutral
        let b = scorer.score(&session("S4"));
        assert!((b.venue - 0.5).abs() < 1e-9);
    }

    #[test]
    fn test_venue_longest_match_wins() {
        let mut config = config();
        config
            .venue_convenience
            .insert("treasure".to_string(), 0.9);
        // "treasure island" (longer) carries 0.5 and must win over "treasure"
        let scorer = SessionScorer::new(&config).unwrap();
        let b = scorer.score(&session("S1").with_venue("Treasure Island"));
        assert!((b.venue - 0.5).abs() < 1e-9);
    }

    #[test]
    fn test_speaker_component() {
        let config = config();
        let scorer = SessionScorer::new(&config).unwrap();

        // No speakers → neutral
        assert!((scorer.score(&session("S1")).speaker - 0.5).abs() < 1e-9);

        // Two speakers, one senior: 0.5 + 0.2 + 0.1
        let s = session("S2")
            .with_speaker("Jordan Lee, Senior Engineer")
            .with_speaker("Sam Park");
        assert!((scorer.score(&s).speaker - 0.8).abs() < 1e-9);

        // Organization affiliation counts as a marker too: 0.5 + 0.1 + 0.1
        let s = session("S3").with_speaker("Alex Rivera, AWS");
        assert!((scorer.score(&s).speaker - 0.7).abs() < 1e-9);
    }

    #[test]
    fn test_uniqueness_component() {
        let config = config();
        let scorer = SessionScorer::new(&config).unwrap();

        // "deep dive" in title (+0.1), "production" only in description (+0.05)
        let s = Session::new("S1", "Deep dive into stream processing", date())
            .with_description("Lessons from production rollouts.");
        assert!((scorer.score(&s).uniqueness - 0.65).abs() < 1e-9);

        // Six title markers would push past 1.0; the component caps there.
        let s = Session::new(
            "S2",
            "New exclusive hands-on workshop: launch preview",
            date(),
        );
        assert!((scorer.score(&s).uniqueness - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_total_bounds_and_rederivable() {
        let config = config();
        let scorer = SessionScorer::new(&config).unwrap();
        let s = Session::new("S1", "New hands-on AI workshop deep dive", date())
            .with_keyword("AI")
            .with_venue("Venetian")
            .with_level("intermediate")
            .with_speaker("Principal Engineer");

        let b = scorer.score(&s);
        assert!(b.total >= 0.0 && b.total <= 1.0);
        // Rounded-to-3 total matches the derivation within rounding error
        assert!((b.total - b.derive_total()).abs() < 5e-4);
    }

    #[test]
    fn test_scoring_idempotent() {
        let config = config();
        let scorer = SessionScorer::new(&config).unwrap();
        let s = session("S1").with_keyword("AI").with_venue("Wynn");

        let a = scorer.score(&s);
        let b = scorer.score(&s);
        assert_eq!(a.total, b.total);
        assert_eq!(a.keyword, b.keyword);
        assert_eq!(a.venue, b.venue);
    }

    #[test]
    fn test_score_all_sorted_descending_stable() {
        let config = config();
        let scorer = SessionScorer::new(&config).unwrap();

        // "high" outscores the two identical "mid" sessions; the mids keep
        // their input order.
        let sessions = vec![
            session("mid_a").with_venue("Caesars Forum"),
            session("high").with_keyword("AI").with_venue("Venetian"),
            session("mid_b").with_venue("Caesars Forum"),
        ];
        let scored = scorer.score_all(&sessions);
        assert_eq!(scored[0].id(), "high");
        assert_eq!(scored[1].id(), "mid_a");
        assert_eq!(scored[2].id(), "mid_b");
        assert!(scored[0].score() >= scored[1].score());
        assert!((scored[1].score() - scored[2].score()).abs() < 1e-9);
    }

    #[test]
    fn test_scoring_stats() {
        let config = config();
        let scorer = SessionScorer::new(&config).unwrap();
        let scored = scorer.score_all(&[
            session("a").with_keyword("AI").with_venue("Venetian"),
            session("b"),
        ]);

        let stats = ScoringStats::calculate(&scored);
        assert_eq!(stats.total_sessions, 2);
        assert_eq!(stats.high + stats.medium + stats.low, 2);
        assert!(stats.min_score <= stats.max_score);
        assert!(stats.average_score > 0.0);

        assert_eq!(ScoringStats::calculate(&[]), ScoringStats::default());
    }

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 12, 1).unwrap()
    }
}
