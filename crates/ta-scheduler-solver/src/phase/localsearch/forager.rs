//! Foragers for local search move selection
//!
//! Foragers collect accepted moves during a step and select the
//! best one to apply.

use std::fmt::Debug;

use ta_scheduler_core::HardMediumSoftScore;

use crate::heuristic::AssignmentMove;

/// Collects accepted moves during a step and picks one.
pub trait LocalSearchForager: Send + Debug {
    fn step_started(&mut self);

    fn add_move(&mut self, m: AssignmentMove, score: HardMediumSoftScore);

    /// Returns true once enough moves have been collected.
    fn is_quit_early(&self) -> bool;

    /// Picks the best collected move; `None` if nothing was accepted.
    fn pick_move(&mut self) -> Option<(AssignmentMove, HardMediumSoftScore)>;
}

/// Keeps the first `accepted_count_limit` accepted moves and picks the
/// best of them. Ties go to the earliest.
#[derive(Debug, Clone)]
pub struct AcceptedCountForager {
    accepted_count_limit: usize,
    accepted_moves: Vec<(AssignmentMove, HardMediumSoftScore)>,
}

impl AcceptedCountForager {
    pub fn new(accepted_count_limit: usize) -> Self {
        Self {
            accepted_count_limit: accepted_count_limit.max(1),
            accepted_moves: Vec::new(),
        }
    }

    pub fn accepted_count_limit(&self) -> usize {
        self.accepted_count_limit
    }
}

impl LocalSearchForager for AcceptedCountForager {
    fn step_started(&mut self) {
        self.accepted_moves.clear();
    }

    fn add_move(&mut self, m: AssignmentMove, score: HardMediumSoftScore) {
        self.accepted_moves.push((m, score));
    }

    fn is_quit_early(&self) -> bool {
        self.accepted_moves.len() >= self.accepted_count_limit
    }

    fn pick_move(&mut self) -> Option<(AssignmentMove, HardMediumSoftScore)> {
        let mut best: Option<(AssignmentMove, HardMediumSoftScore)> = None;
        for (m, score) in self.accepted_moves.drain(..) {
            if best.as_ref().map_or(true, |(_, best_score)| score > *best_score) {
                best = Some((m, score));
            }
        }
        best
    }
}
