//! Acceptors for local search move acceptance.
//!
//! Acceptors decide whether a candidate move may become the next step,
//! comparing its score with the previous step's score.

mod hill_climbing;
mod late_acceptance;
mod simulated_annealing;
mod tabu_search;

use std::fmt::Debug;

use rand::rngs::StdRng;

use ta_scheduler_core::HardMediumSoftScore;

use crate::heuristic::AssignmentMove;

pub use hill_climbing::HillClimbingAcceptor;
pub use late_acceptance::LateAcceptanceAcceptor;
pub use simulated_annealing::SimulatedAnnealingAcceptor;
pub use tabu_search::TabuSearchAcceptor;

/// Trait for accepting or rejecting moves in local search.
pub trait Acceptor: Send + Debug {
    /// Returns true if `mv`, resulting in `move_score`, should be accepted
    /// given the previous step's score.
    fn is_accepted(
        &mut self,
        last_step_score: &HardMediumSoftScore,
        move_score: &HardMediumSoftScore,
        mv: &AssignmentMove,
        rng: &mut StdRng,
    ) -> bool;

    fn phase_started(&mut self, _initial_score: &HardMediumSoftScore) {}

    fn phase_ended(&mut self) {}

    fn step_started(&mut self) {}

    /// Called when a step ends with an applied move.
    fn step_ended(&mut self, _step_score: &HardMediumSoftScore, _step_move: &AssignmentMove) {}
}

impl<A: Acceptor + ?Sized> Acceptor for Box<A> {
    fn is_accepted(
        &mut self,
        last_step_score: &HardMediumSoftScore,
        move_score: &HardMediumSoftScore,
        mv: &AssignmentMove,
        rng: &mut StdRng,
    ) -> bool {
        (**self).is_accepted(last_step_score, move_score, mv, rng)
    }

    fn phase_started(&mut self, initial_score: &HardMediumSoftScore) {
        (**self).phase_started(initial_score)
    }

    fn phase_ended(&mut self) {
        (**self).phase_ended()
    }

    fn step_started(&mut self) {
        (**self).step_started()
    }

    fn step_ended(&mut self, step_score: &HardMediumSoftScore, step_move: &AssignmentMove) {
        (**self).step_ended(step_score, step_move)
    }
}
