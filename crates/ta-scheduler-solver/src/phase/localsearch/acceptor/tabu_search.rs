//! Slot tabu acceptor.

use std::collections::VecDeque;

use rand::rngs::StdRng;

use ta_scheduler_core::HardMediumSoftScore;

use super::Acceptor;
use crate::heuristic::{AssignmentMove, Move};

/// Forbids moves touching a slot changed in the last `slot_tabu_size`
/// steps, unless the move beats the best score seen in this phase
/// (aspiration). Any other move is accepted; pair with a forager that
/// collects many moves per step.
#[derive(Debug, Clone)]
pub struct TabuSearchAcceptor {
    slot_tabu_size: usize,
    tabu_slots: VecDeque<usize>,
    best_score: Option<HardMediumSoftScore>,
}

impl TabuSearchAcceptor {
    pub const DEFAULT_SLOT_TABU_SIZE: usize = 7;

    pub fn new(slot_tabu_size: usize) -> Self {
        Self {
            slot_tabu_size,
            tabu_slots: VecDeque::with_capacity(slot_tabu_size + 2),
            best_score: None,
        }
    }

    pub fn is_tabu(&self, slot: usize) -> bool {
        self.tabu_slots.contains(&slot)
    }
}

impl Default for TabuSearchAcceptor {
    fn default() -> Self {
        Self::new(Self::DEFAULT_SLOT_TABU_SIZE)
    }
}

impl Acceptor for TabuSearchAcceptor {
    fn is_accepted(
        &mut self,
        _last_step_score: &HardMediumSoftScore,
        move_score: &HardMediumSoftScore,
        mv: &AssignmentMove,
        _rng: &mut StdRng,
    ) -> bool {
        if self.best_score.is_some_and(|best| *move_score > best) {
            return true;
        }
        !mv.slots().iter().any(|&slot| self.is_tabu(slot))
    }

    fn phase_started(&mut self, initial_score: &HardMediumSoftScore) {
        self.tabu_slots.clear();
        self.best_score = Some(*initial_score);
    }

    fn phase_ended(&mut self) {
        self.tabu_slots.clear();
    }

    fn step_ended(&mut self, step_score: &HardMediumSoftScore, step_move: &AssignmentMove) {
        if self.best_score.map_or(true, |best| *step_score > best) {
            self.best_score = Some(*step_score);
        }
        for &slot in step_move.slots() {
            self.tabu_slots.retain(|&s| s != slot);
            self.tabu_slots.push_back(slot);
        }
        while self.tabu_slots.len() > self.slot_tabu_size {
            self.tabu_slots.pop_front();
        }
    }
}
