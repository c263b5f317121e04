//! Foragers for construction heuristic move selection
//!
//! Foragers pick one of the candidate moves generated for a placement.
//! They return an index into the placement's moves.

use std::fmt::Debug;

use ta_scheduler_scoring::ScoreDirector;

use super::Placement;
use crate::heuristic::Move;

/// Picks the move to apply for a placement.
pub trait ConstructionForager: Send + Debug {
    /// Returns the index of the chosen move, or `None` to leave the slot
    /// empty. Evaluated moves are undone before returning.
    fn pick_move_index<D: ScoreDirector + ?Sized>(
        &self,
        placement: &Placement,
        score_director: &mut D,
    ) -> Option<usize>;
}

/// Takes the first doable candidate without scoring anything.
#[derive(Debug, Clone, Copy, Default)]
pub struct FirstFitForager;

impl FirstFitForager {
    pub fn new() -> Self {
        Self
    }
}

impl ConstructionForager for FirstFitForager {
    fn pick_move_index<D: ScoreDirector + ?Sized>(
        &self,
        placement: &Placement,
        score_director: &mut D,
    ) -> Option<usize> {
        placement
            .moves
            .iter()
            .position(|m| m.is_doable(score_director.working_solution()))
    }
}

/// Scores every candidate and takes the best; ties go to the earliest.
#[derive(Debug, Clone, Copy, Default)]
pub struct BestFitForager;

impl BestFitForager {
    pub fn new() -> Self {
        Self
    }
}

impl ConstructionForager for BestFitForager {
    fn pick_move_index<D: ScoreDirector + ?Sized>(
        &self,
        placement: &Placement,
        score_director: &mut D,
    ) -> Option<usize> {
        let mut best = None;
        for (idx, m) in placement.moves.iter().enumerate() {
            if !m.is_doable(score_director.working_solution()) {
                continue;
            }
            m.do_move(score_director);
            let score = score_director.calculate_score();
            m.undo_move(score_director);

            if best.map_or(true, |(_, best_score)| score > best_score) {
                best = Some((idx, score));
            }
        }
        best.map(|(idx, _)| idx)
    }
}
