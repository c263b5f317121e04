//! Hill climbing acceptor.

use rand::rngs::StdRng;

use ta_scheduler_core::HardMediumSoftScore;

use super::Acceptor;
use crate::heuristic::AssignmentMove;

/// Accepts moves that do not worsen the score.
///
/// Equal scores pass so the search can walk across plateaus.
#[derive(Debug, Clone, Copy, Default)]
pub struct HillClimbingAcceptor;

impl HillClimbingAcceptor {
    pub fn new() -> Self {
        Self
    }
}

impl Acceptor for HillClimbingAcceptor {
    fn is_accepted(
        &mut self,
        last_step_score: &HardMediumSoftScore,
        move_score: &HardMediumSoftScore,
        _mv: &AssignmentMove,
        _rng: &mut StdRng,
    ) -> bool {
        move_score >= last_step_score
    }
}
