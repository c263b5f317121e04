//! Late acceptance acceptor.

use rand::rngs::StdRng;

use ta_scheduler_config::DEFAULT_LATE_ACCEPTANCE_SIZE;
use ta_scheduler_core::HardMediumSoftScore;

use super::Acceptor;
use crate::heuristic::AssignmentMove;

/// Accepts moves that improve on the last step, or match the step score
/// from `late_acceptance_size` steps ago.
///
/// Keeps a circular buffer of recent step scores.
///
/// # Example
///
/// ```
/// use ta_scheduler_solver::phase::localsearch::LateAcceptanceAcceptor;
///
/// let acceptor = LateAcceptanceAcceptor::new(400);
/// # let _ = acceptor;
/// ```
#[derive(Debug, Clone)]
pub struct LateAcceptanceAcceptor {
    late_acceptance_size: usize,
    score_history: Vec<Option<HardMediumSoftScore>>,
    current_index: usize,
}

impl LateAcceptanceAcceptor {
    /// Creates an acceptor remembering `late_acceptance_size` step scores
    /// (at least one).
    pub fn new(late_acceptance_size: usize) -> Self {
        let late_acceptance_size = late_acceptance_size.max(1);
        Self {
            late_acceptance_size,
            score_history: vec![None; late_acceptance_size],
            current_index: 0,
        }
    }
}

impl Default for LateAcceptanceAcceptor {
    fn default() -> Self {
        Self::new(DEFAULT_LATE_ACCEPTANCE_SIZE)
    }
}

impl Acceptor for LateAcceptanceAcceptor {
    fn is_accepted(
        &mut self,
        last_step_score: &HardMediumSoftScore,
        move_score: &HardMediumSoftScore,
        _mv: &AssignmentMove,
        _rng: &mut StdRng,
    ) -> bool {
        if move_score > last_step_score {
            return true;
        }
        match &self.score_history[self.current_index] {
            Some(late_score) => move_score >= late_score,
            None => true,
        }
    }

    fn phase_started(&mut self, initial_score: &HardMediumSoftScore) {
        for slot in &mut self.score_history {
            *slot = Some(*initial_score);
        }
        self.current_index = 0;
    }

    fn step_ended(&mut self, step_score: &HardMediumSoftScore, _step_move: &AssignmentMove) {
        self.score_history[self.current_index] = Some(*step_score);
        self.current_index = (self.current_index + 1) % self.late_acceptance_size;
    }
}
