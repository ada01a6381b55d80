//! Input validation.
//!
//! Soft checks over the raw session list. Findings are advisory: the
//! scheduling pipeline logs them and continues, since a malformed or
//! out-of-window session is simply never placed. Hard configuration
//! errors live in [`crate::config::ConfigError`] instead.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::EngineConfig;
use crate::models::Session;

/// A single advisory finding about the input data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Error)]
pub enum ValidationIssue {
    /// The same session id appears more than once.
    #[error("duplicate session id '{id}'")]
    DuplicateId {
        /// The repeated identifier.
        id: String,
    },
    /// The session's start is at or after its end.
    #[error("session '{id}' has an inverted time range ({start} >= {end})")]
    InvertedTimeRange {
        /// Session identifier.
        id: String,
        /// Declared start, as formatted.
        start: String,
        /// Declared end, as formatted.
        end: String,
    },
    /// Exactly one of start/end is present; such sessions are skipped.
    #[error("session '{id}' has only one time endpoint")]
    PartialTimes {
        /// Session identifier.
        id: String,
    },
    /// The session date is not one of the configured conference dates.
    #[error("session '{id}' on {date} is outside the conference window")]
    OutsideConference {
        /// Session identifier.
        id: String,
        /// The offending date, ISO formatted.
        date: String,
    },
}

/// Runs all soft checks and collects every finding.
///
/// Never fails: an empty vector means a clean input.
pub fn validate_sessions(sessions: &[Session], config: &EngineConfig) -> Vec<ValidationIssue> {
    let mut issues = Vec::new();
    let mut seen: HashSet<&str> = HashSet::new();
    let mut reported_dup: HashSet<&str> = HashSet::new();
    let dates: HashSet<_> = config.conference_dates.iter().collect();

    for session in sessions {
        if !seen.insert(&session.id) && reported_dup.insert(&session.id) {
            issues.push(ValidationIssue::DuplicateId {
                id: session.id.clone(),
            });
        }

        match (session.start_time, session.end_time) {
            (Some(start), Some(end)) if start >= end => {
                issues.push(ValidationIssue::InvertedTimeRange {
                    id: session.id.clone(),
                    start: start.format("%H:%M").to_string(),
                    end: end.format("%H:%M").to_string(),
                });
            }
            (Some(_), None) | (None, Some(_)) => {
                issues.push(ValidationIssue::PartialTimes {
                    id: session.id.clone(),
                });
            }
            _ => {}
        }

        if !dates.contains(&session.date) {
            issues.push(ValidationIssue::OutsideConference {
                id: session.id.clone(),
                date: session.date.to_string(),
            });
        }
    }

    issues
}
