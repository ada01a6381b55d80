//! Primary assignment.
//!
//! Greedily fills each slot with the best-scoring unused session whose
//! time range exactly matches the slot bounds. The strategy sits behind
//! a small trait so an exact solver could replace the greedy version
//! without touching the rest of the pipeline.

use std::collections::HashSet;

use crate::models::{ScheduledSession, ScoredSession, TimeSlot};

/// Assignment strategy seam.
///
/// Implementations receive the score-sorted candidates and the ordered
/// slots for one day and return the primary list. Each session id must be
/// assigned to at most one slot.
pub trait AssignStrategy {
    /// Fills the slots from the candidate pool.
    fn assign(&self, sessions: &[ScoredSession], slots: &[TimeSlot]) -> Vec<ScheduledSession>;
}

/// Greedy, non-backtracking assigner.
///
/// For each slot in builder order, takes the first not-yet-used session
/// in the score-sorted input whose times exactly match the slot. Because
/// the input sort is stable and descending, "first match" is also
/// "highest score, ties to the earlier input position". A slot with no
/// exact-time candidate stays unfilled; this never blocks later slots.
#[derive(Debug, Clone, Copy, Default)]
pub struct GreedyAssigner;

impl AssignStrategy for GreedyAssigner {
    fn assign(&self, sessions: &[ScoredSession], slots: &[TimeSlot]) -> Vec<ScheduledSession> {
        let mut used: HashSet<&str> = HashSet::new();
        let mut primary = Vec::new();

        for slot in slots {
            let pick = sessions.iter().find(|s| {
                if used.contains(s.id()) {
                    return false;
                }
                s.session
                    .time_range()
                    .is_some_and(|(start, end)| slot.matches_exactly(start, end))
            });

            if let Some(scored) = pick {
                used.insert(scored.id());
                primary.push(ScheduledSession::in_slot(scored.clone(), slot));
            }
        }

        primary
    }
}
